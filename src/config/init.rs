use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, save_config, validate_config, Config, MockConfig, SourceMode};
use crate::matching::{MatchConfig, DEFAULT_LIMIT};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Parse a wizard answer for the source mode.
fn parse_source_mode(input: &str) -> Result<SourceMode, String> {
    match input.trim().to_lowercase().as_str() {
        "live" => Ok(SourceMode::Live),
        "mock" => Ok(SourceMode::Mock),
        other => Err(format!("expected 'live' or 'mock', got '{}'", other)),
    }
}

/// Parse a wizard answer for the match limit. "all" keeps every match.
fn parse_limit(input: &str) -> Result<Option<usize>, String> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    match input.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(Some(n)),
        Err(_) => Err("must be a positive number or 'all'".to_string()),
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("SkillSync Configuration Wizard");
    println!("==============================");
    println!();

    let defaults = Config::default();

    // 1. Source
    println!("'live' uploads your resume to the analysis backend; 'mock' fabricates a sample analysis offline.");
    let source = loop {
        let input = prompt_with_default("Analysis source (live/mock)", "live")?;
        match parse_source_mode(&input) {
            Ok(mode) => break mode,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 2. Backend
    println!();
    let backend_url = loop {
        let input = prompt_with_default("Backend URL", &defaults.backend_url)?;
        match crate::source::live::normalize_base_url(&input) {
            Ok(_) => break input,
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    let timeout = loop {
        let input = prompt_with_default("Request timeout", &defaults.timeout)?;
        match humantime::parse_duration(&input) {
            Ok(d) if !d.is_zero() => break input,
            Ok(_) => println!("  Invalid: must be greater than zero. Try again."),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    };

    // 3. Matching
    println!();
    let configure_matching = prompt_yes_no("Configure matching? (n accepts defaults)", false)?;
    let matching = if configure_matching {
        println!("Matching keeps the first postings (in catalog order) whose score range contains your rating.");
        loop {
            let input = prompt_with_default("Maximum postings to show ('all' for no limit)", &DEFAULT_LIMIT.to_string())?;
            match parse_limit(&input) {
                Ok(limit) => break MatchConfig { limit },
                Err(e) => println!("  Invalid: {}. Try again.", e),
            }
        }
    } else {
        MatchConfig::default()
    };

    // 4. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        backend_url,
        source,
        timeout,
        catalog: None,
        matching,
        mock: MockConfig::default(),
    };
    if let Err(errors) = validate_config(&config) {
        anyhow::bail!("Generated config is invalid: {}", errors.join("; "));
    }

    save_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `skillsync analyze <resume.pdf>` to get started.");

    Ok(())
}
