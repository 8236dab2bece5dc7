use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::analysis::{AnalysisReport, AnalysisResult, MatchedPosting};
use crate::catalog::InternshipPosting;
use crate::error::AnalyzeError;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a rating on the 0-10 scale: "7.5/10", "8/10"
pub fn format_rating(score: f64) -> String {
    let formatted = format!("{:.1}", score);
    let trimmed = formatted.strip_suffix(".0").unwrap_or(&formatted);
    format!("{}/10", trimmed)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Trimmed, non-empty entries of a feedback list
fn clean_items(items: &[String]) -> Vec<&str> {
    items
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

fn format_section(heading: &str, items: &[&str], use_colors: bool) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    if use_colors {
        lines.push(heading.bold().to_string());
    } else {
        lines.push(heading.to_string());
    }
    if items.is_empty() {
        lines.push("  (none)".to_string());
    }
    for item in items {
        lines.push(format!("  - {}", item));
    }
    lines.join("\n")
}

/// Format the analysis block: rating, strengths, weaknesses, suggestions.
/// The suggestions block is left out when there are none.
pub fn format_analysis(analysis: &AnalysisResult, use_colors: bool) -> String {
    let rating = format_rating(analysis.score());
    let mut blocks = Vec::new();

    if use_colors {
        blocks.push(format!("{} {}", "Overall Rating:".bold(), rating.cyan().bold()));
    } else {
        blocks.push(format!("Overall Rating: {}", rating));
    }

    blocks.push(format_section("Strengths", &clean_items(analysis.strengths()), use_colors));
    blocks.push(format_section(
        "Areas to Improve",
        &clean_items(analysis.weaknesses()),
        use_colors,
    ));

    let suggestions = clean_items(analysis.suggestions());
    if !suggestions.is_empty() {
        blocks.push(format_section("Suggestions", &suggestions, use_colors));
    }

    if let Some(raw) = analysis.raw_analysis().map(str::trim).filter(|r| !r.is_empty()) {
        if use_colors {
            blocks.push(format!("{}\n{}", "Detailed Analysis".bold(), raw.dimmed()));
        } else {
            blocks.push(format!("Detailed Analysis\n{}", raw));
        }
    }

    blocks.join("\n\n")
}

/// Required skills in display order, matched ones marked with "*"
fn format_required_skills(matched: &MatchedPosting, use_colors: bool) -> String {
    matched
        .posting
        .skills_required
        .iter()
        .map(|skill| {
            if !matched.has_skill_match(skill) {
                skill.to_string()
            } else if use_colors {
                format!("{}*", skill).green().to_string()
            } else {
                format!("{}*", skill)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_recommendation(idx: usize, matched: &MatchedPosting, use_colors: bool) -> String {
    let posting = &matched.posting;
    let index_str = format!("{:>2}.", idx + 1);
    let percent = format!("{}% Match", matched.match_percentage);

    let mut lines = Vec::new();
    if use_colors {
        lines.push(format!(
            "{} {}  {}",
            index_str.dimmed(),
            posting.title.bold(),
            percent.green().bold()
        ));
        lines.push(format!("    {}", posting.company.cyan()));
    } else {
        lines.push(format!("{} {}  {}", index_str, posting.title, percent));
        lines.push(format!("    {}", posting.company));
    }
    lines.push(format!("    {} | {}", posting.location, posting.category));
    lines.push(format!("    {}", posting.description));

    let matched_skills = matched.matched_skills();
    if !matched_skills.is_empty() {
        lines.push(format!("    Your Matching Skills: {}", matched_skills.join(", ")));
    }
    lines.push(format!(
        "    All Required Skills: {}",
        format_required_skills(matched, use_colors)
    ));

    lines.join("\n")
}

/// Format the recommendations list, one multi-line block per posting
pub fn format_recommendations(recommendations: &[MatchedPosting], use_colors: bool) -> String {
    let heading = format!("Recommended Internships ({})", recommendations.len());
    let heading = if use_colors {
        heading.bold().to_string()
    } else {
        heading
    };

    if recommendations.is_empty() {
        return format!("{}\nNo internships match this rating.", heading);
    }

    let body = recommendations
        .iter()
        .enumerate()
        .map(|(idx, matched)| format_recommendation(idx, matched, use_colors))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n\n{}", heading, body)
}

/// Success notice followed by the analysis and its recommendations
pub fn format_report(report: &AnalysisReport, use_colors: bool) -> String {
    let notice = if use_colors {
        format!(
            "{} Your resume has been analyzed successfully.",
            "Analysis complete!".green().bold()
        )
    } else {
        "Analysis complete! Your resume has been analyzed successfully.".to_string()
    };

    format!(
        "{}\n\n{}\n\n{}",
        notice,
        format_analysis(&report.analysis, use_colors),
        format_recommendations(&report.recommendations, use_colors)
    )
}

/// "Title: message" for a failed attempt
pub fn format_error(error: &AnalyzeError, use_colors: bool) -> String {
    if use_colors {
        format!("{} {}", format!("{}:", error.title()).red().bold(), error.user_message())
    } else {
        format!("{}: {}", error.title(), error.user_message())
    }
}

/// Format the catalog as a table with columns: Id, Range, Title @ Company, Location
/// No headers (minimal format, same as the recommendation index)
/// Id column: 3 chars, right-aligned
/// Range column: 5 chars (fits "10-10")
pub fn format_catalog_table(postings: &[InternshipPosting], use_colors: bool) -> String {
    if postings.is_empty() {
        return "No internships found.".to_string();
    }

    let term_width = get_terminal_width();
    let id_width = 3;
    let range_width = 5;
    let separator = "  ";

    postings
        .iter()
        .map(|posting| {
            let id_str = format!("{:>width$}", posting.id, width = id_width);
            let range_str = format!("{:<width$}", posting.score_range.to_string(), width = range_width);

            let fixed_width = id_width + range_width + separator.len() * 3 + posting.location.chars().count();
            let short_ref = posting.short_ref();
            let title = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_title(&short_ref, width - fixed_width)
                } else {
                    truncate_title(&short_ref, 20)
                }
            } else {
                short_ref
            };

            if use_colors {
                format!(
                    "{}{}{}{}{}{}{}",
                    id_str.dimmed(),
                    separator,
                    range_str.bold(),
                    separator,
                    title,
                    separator,
                    posting.location.cyan()
                )
            } else {
                format!(
                    "{}{}{}{}{}{}{}",
                    id_str, separator, range_str, separator, title, separator, posting.location
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the catalog as tab-separated values for scripting
/// Columns: id, low, high, title, company, location, category (no headers, no colors)
pub fn format_tsv(postings: &[InternshipPosting]) -> String {
    if postings.is_empty() {
        return String::new();
    }

    postings
        .iter()
        .map(|p| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                p.id,
                p.score_range.low(),
                p.score_range.high(),
                p.title,
                p.company,
                p.location,
                p.category
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
