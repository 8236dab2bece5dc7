mod data;
pub mod types;

pub use data::builtin_postings;
pub use types::{InternshipPosting, ScoreRange};

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// Read-only set of internship postings.
///
/// Order is significant: the matcher preserves it, so the first postings in
/// the catalog win when results are truncated.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    postings: Vec<InternshipPosting>,
}

impl Catalog {
    /// The catalog compiled into the binary
    pub fn builtin() -> Self {
        Self {
            postings: builtin_postings(),
        }
    }

    /// Build a catalog, rejecting duplicate posting ids.
    pub fn from_postings(postings: Vec<InternshipPosting>) -> Result<Self> {
        let mut seen = HashSet::new();
        for posting in &postings {
            if !seen.insert(posting.id) {
                anyhow::bail!("Duplicate posting id {} in catalog", posting.id);
            }
        }
        Ok(Self { postings })
    }

    /// Load a catalog from a JSON array of postings (the backend's
    /// `internships` format).
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open catalog file at {}", path.display()))?;

        let postings: Vec<InternshipPosting> = serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse catalog: invalid JSON in {}", path.display()))?;

        tracing::debug!(count = postings.len(), path = %path.display(), "loaded catalog");
        Self::from_postings(postings)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InternshipPosting> {
        self.postings.iter()
    }

    pub fn postings(&self) -> &[InternshipPosting] {
        &self.postings
    }

    pub fn get(&self, id: u32) -> Option<&InternshipPosting> {
        self.postings.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 12);
        assert_eq!(catalog.get(13).unwrap().company, "DialogFlow Labs");
        assert!(catalog.get(1).is_none());
    }

    #[test]
    fn test_builtin_ranges_are_well_formed() {
        for posting in Catalog::builtin().iter() {
            let range = posting.score_range;
            assert!(range.low() <= range.high(), "posting {}", posting.id);
            assert!(range.low() >= 0 && range.high() <= 10, "posting {}", posting.id);
        }
    }

    #[test]
    fn test_from_postings_rejects_duplicate_ids() {
        let mut postings = builtin_postings();
        let copy = postings[0].clone();
        postings.push(copy);
        let err = Catalog::from_postings(postings).unwrap_err();
        assert!(err.to_string().contains("Duplicate posting id 9"));
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{
                "id": 1,
                "title": "Rust Intern",
                "company": "Ferris Inc",
                "location": "Remote",
                "skills_required": ["Rust", "Tokio"],
                "score_range": [8, 10],
                "category": "Systems",
                "description": "Write async services."
            }}]"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(1).unwrap().skills_required, vec!["Rust", "Tokio"]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/skillsync/catalog.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to open catalog file"));
    }

    #[test]
    fn test_load_rejects_inverted_range() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "title": "t", "company": "c", "location": "l",
                 "skills_required": [], "score_range": [9, 3],
                 "category": "x", "description": "d"}}]"#
        )
        .unwrap();

        let err = Catalog::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse catalog"));
    }
}
