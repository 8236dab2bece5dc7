//! JSON shapes exchanged with the backend analysis endpoint.

use serde::Deserialize;

use super::types::{AnalysisReport, AnalysisResult, MatchProvenance, MatchedPosting};
use crate::catalog::{Catalog, InternshipPosting, ScoreRange};

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: WireAnalysis,
    #[serde(default)]
    pub recommendations: Vec<WireRecommendation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireAnalysis {
    pub overall_rating: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub raw_analysis: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireRecommendation {
    pub id: u32,
    pub title: String,
    pub company: String,
    pub location: String,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    pub match_percentage: f64,
    #[serde(default)]
    pub score_range: Option<ScoreRange>,
}

/// Failure body. FastAPI puts a string here for handled errors and a list of
/// validation problems otherwise, so only string details are surfaced.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The human-readable detail, if the body carried a non-blank string.
    pub fn message(&self) -> Option<&str> {
        self.detail
            .as_ref()
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl WireAnalysis {
    pub fn into_result(self) -> AnalysisResult {
        AnalysisResult::Backend {
            overall_rating: self.overall_rating,
            strengths: self.strengths,
            weaknesses: self.weaknesses,
            suggestions: self.suggestions.unwrap_or_default(),
            raw_analysis: self.raw_analysis,
        }
    }
}

impl WireRecommendation {
    /// Convert to a matched posting. The backend's ranking and percentage are
    /// kept as-is; a missing `score_range` is filled from the local catalog.
    pub fn into_matched(self, catalog: &Catalog) -> MatchedPosting {
        let score_range = self
            .score_range
            .or_else(|| catalog.get(self.id).map(|p| p.score_range))
            .unwrap_or_else(ScoreRange::full);

        let skills_required = self.skills_required;
        let (matched_skills, dropped): (Vec<String>, Vec<String>) = self
            .matched_skills
            .into_iter()
            .partition(|skill| skills_required.contains(skill));
        if !dropped.is_empty() {
            tracing::warn!(id = self.id, ?dropped, "backend matched skills not listed as required");
        }

        MatchedPosting {
            posting: InternshipPosting {
                id: self.id,
                title: self.title,
                company: self.company,
                location: self.location,
                category: self.category,
                description: self.description,
                skills_required,
                score_range,
            },
            match_percentage: clamp_percentage(self.match_percentage),
            provenance: MatchProvenance::Backend { matched_skills },
        }
    }
}

impl AnalyzeResponse {
    /// Adapter for the live source.
    pub fn into_report(self, catalog: &Catalog) -> AnalysisReport {
        let recommendations = self
            .recommendations
            .into_iter()
            .map(|r| r.into_matched(catalog))
            .collect();
        AnalysisReport::new(self.analysis.into_result(), recommendations)
    }
}

fn clamp_percentage(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
