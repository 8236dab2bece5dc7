use super::config::MatchConfig;
use crate::catalog::Catalog;

/// Validate matching configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_matching(config: &MatchConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.limit == Some(0) {
        errors.push("matching.limit: must be at least 1 (use null for no limit)".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check a loaded catalog for ranges the matcher cannot use well.
///
/// Ranges outside the 0-10 rating scale can never (or only partly) be hit and
/// are reported; an empty catalog is reported too.
pub fn validate_catalog(catalog: &Catalog) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if catalog.is_empty() {
        errors.push("catalog: contains no postings".to_string());
    }

    for (i, posting) in catalog.iter().enumerate() {
        let range = posting.score_range;
        if range.low() < 0 || range.high() > 10 {
            errors.push(format!(
                "catalog[{}] (id {}).score_range: '{}' is outside the 0-10 rating scale",
                i, posting.id, range
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
