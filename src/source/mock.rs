use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use super::AnalysisSource;
use crate::analysis::{AnalysisReport, AnalysisResult, SourceKind};
use crate::catalog::Catalog;
use crate::error::AnalyzeError;
use crate::matching::{match_postings, MatchConfig};
use crate::upload::{validate_resume, ResumeFile};

pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// A canned analysis the mock source can hand out.
#[derive(Debug, Clone, PartialEq)]
pub struct MockFixture {
    pub score: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

impl MockFixture {
    /// Adapter for the mock source.
    pub fn into_result(self) -> AnalysisResult {
        AnalysisResult::Simulated {
            score: self.score,
            strengths: self.strengths,
            weaknesses: self.weaknesses,
            suggestions: self.suggestions,
        }
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_fixtures() -> Vec<MockFixture> {
    vec![
        MockFixture {
            score: 7.5,
            strengths: owned(&[
                "Strong programming fundamentals in JavaScript and Python",
                "Good experience with React framework",
                "Solid understanding of database concepts",
                "Active GitHub profile with multiple projects",
            ]),
            weaknesses: owned(&[
                "Limited experience with cloud platforms",
                "Could improve system design knowledge",
                "Lacks experience with containerization tools",
            ]),
            suggestions: owned(&[
                "Consider learning Docker and Kubernetes",
                "Gain experience with AWS or other cloud platforms",
                "Work on larger scale projects to improve system design skills",
            ]),
        },
        MockFixture {
            score: 6.2,
            strengths: owned(&[
                "Good foundation in computer science concepts",
                "Experience with web development technologies",
                "Strong problem-solving skills demonstrated through projects",
            ]),
            weaknesses: owned(&[
                "Limited professional experience",
                "Could strengthen knowledge of modern frameworks",
                "Needs more experience with version control",
            ]),
            suggestions: owned(&[
                "Contribute to open source projects",
                "Learn modern development frameworks like React or Angular",
                "Practice with Git and collaborative development",
            ]),
        },
    ]
}

/// Chooses which fixture answers a request.
pub trait FixturePicker: Send + Sync {
    /// Return an index in `0..count`; `count` is never zero.
    fn pick(&self, count: usize) -> usize;
}

/// Uniformly random choice.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl FixturePicker for RandomPicker {
    fn pick(&self, count: usize) -> usize {
        rand::rng().random_range(0..count)
    }
}

/// Always the same fixture (wraps around when out of bounds).
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl FixturePicker for FixedPicker {
    fn pick(&self, count: usize) -> usize {
        self.0 % count
    }
}

/// Stand-in for the backend: a fixture analysis matched against the local
/// catalog after a simulated delay.
pub struct MockSource {
    fixtures: Vec<MockFixture>,
    picker: Box<dyn FixturePicker>,
    delay: Duration,
    catalog: Arc<Catalog>,
    matching: MatchConfig,
}

impl MockSource {
    pub fn new(catalog: Arc<Catalog>, matching: MatchConfig) -> Self {
        Self {
            fixtures: default_fixtures(),
            picker: Box::new(RandomPicker),
            delay: DEFAULT_DELAY,
            catalog,
            matching,
        }
    }

    pub fn with_fixtures(mut self, fixtures: Vec<MockFixture>) -> Self {
        self.fixtures = fixtures;
        self
    }

    pub fn with_picker(mut self, picker: impl FixturePicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl AnalysisSource for MockSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Mock
    }

    async fn analyze(&self, file: &ResumeFile) -> Result<AnalysisReport, AnalyzeError> {
        validate_resume(file)?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.fixtures.is_empty() {
            return Err(AnalyzeError::UnknownFailure(
                "mock source has no fixtures".to_string(),
            ));
        }
        let index = self.picker.pick(self.fixtures.len()).min(self.fixtures.len() - 1);
        let analysis = self.fixtures[index].clone().into_result();
        tracing::debug!(index, score = analysis.score(), "picked mock fixture");

        let recommendations = match_postings(analysis.score(), &self.catalog, &self.matching);
        Ok(AnalysisReport::new(analysis, recommendations))
    }
}
