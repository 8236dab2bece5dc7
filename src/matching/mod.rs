pub mod config;
pub mod engine;
pub mod validation;

pub use config::{MatchConfig, DEFAULT_LIMIT};
pub use engine::{match_percentage, match_postings};
pub use validation::{validate_catalog, validate_matching};
