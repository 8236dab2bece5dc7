use serde::{Deserialize, Serialize};

/// Default cap on locally matched postings.
pub const DEFAULT_LIMIT: usize = 5;

/// Matching configuration.
///
/// Example YAML:
/// ```yaml
/// matching:
///   limit: 5      # omit or set to null to keep every match
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MatchConfig {
    /// Maximum number of postings returned (default: 5). `None` keeps all.
    #[serde(default = "default_limit")]
    pub limit: Option<usize>,
}

fn default_limit() -> Option<usize> {
    Some(DEFAULT_LIMIT)
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

impl MatchConfig {
    pub fn unlimited() -> Self {
        Self { limit: None }
    }

    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}
