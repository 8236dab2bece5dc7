pub mod types;
pub mod wire;

pub use types::{AnalysisReport, AnalysisResult, MatchProvenance, MatchedPosting, SourceKind};
pub use wire::{AnalyzeResponse, ErrorBody};
