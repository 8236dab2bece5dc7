use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::InternshipPosting;

/// Which collaborator produced an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Mock,
    Live,
}

/// The scored evaluation of a resume.
///
/// Each data source has its own variant; callers read the common fields
/// through the accessors instead of probing for optional keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum AnalysisResult {
    /// Fabricated from fixtures by the mock source.
    Simulated {
        score: f64,
        strengths: Vec<String>,
        weaknesses: Vec<String>,
        suggestions: Vec<String>,
    },
    /// Returned by the backend analysis endpoint.
    Backend {
        overall_rating: f64,
        strengths: Vec<String>,
        weaknesses: Vec<String>,
        suggestions: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        raw_analysis: Option<String>,
    },
}

impl AnalysisResult {
    /// Rating on the 0-10 scale
    pub fn score(&self) -> f64 {
        match self {
            AnalysisResult::Simulated { score, .. } => *score,
            AnalysisResult::Backend { overall_rating, .. } => *overall_rating,
        }
    }

    pub fn strengths(&self) -> &[String] {
        match self {
            AnalysisResult::Simulated { strengths, .. }
            | AnalysisResult::Backend { strengths, .. } => strengths,
        }
    }

    pub fn weaknesses(&self) -> &[String] {
        match self {
            AnalysisResult::Simulated { weaknesses, .. }
            | AnalysisResult::Backend { weaknesses, .. } => weaknesses,
        }
    }

    pub fn suggestions(&self) -> &[String] {
        match self {
            AnalysisResult::Simulated { suggestions, .. }
            | AnalysisResult::Backend { suggestions, .. } => suggestions,
        }
    }

    pub fn raw_analysis(&self) -> Option<&str> {
        match self {
            AnalysisResult::Simulated { .. } => None,
            AnalysisResult::Backend { raw_analysis, .. } => raw_analysis.as_deref(),
        }
    }

    pub fn source(&self) -> SourceKind {
        match self {
            AnalysisResult::Simulated { .. } => SourceKind::Mock,
            AnalysisResult::Backend { .. } => SourceKind::Live,
        }
    }
}

/// Where a posting's match percentage came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchProvenance {
    /// Derived locally from the analysis score and the posting's score range.
    ScoreRange,
    /// Supplied by the backend together with the skills it found in the resume.
    Backend { matched_skills: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPosting {
    #[serde(flatten)]
    pub posting: InternshipPosting,
    pub match_percentage: u8,
    pub provenance: MatchProvenance,
}

impl MatchedPosting {
    /// Skills the backend asserted the resume contains. Empty for locally
    /// derived matches.
    pub fn matched_skills(&self) -> &[String] {
        match &self.provenance {
            MatchProvenance::ScoreRange => &[],
            MatchProvenance::Backend { matched_skills } => matched_skills,
        }
    }

    pub fn has_skill_match(&self, skill: &str) -> bool {
        self.matched_skills().iter().any(|s| s == skill)
    }
}

/// Outcome of one analyze action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub analysis: AnalysisResult,
    pub recommendations: Vec<MatchedPosting>,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn new(analysis: AnalysisResult, recommendations: Vec<MatchedPosting>) -> Self {
        Self {
            analysis,
            recommendations,
            analyzed_at: Utc::now(),
        }
    }

    pub fn source(&self) -> SourceKind {
        self.analysis.source()
    }
}
