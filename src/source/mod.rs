pub mod live;
pub mod mock;

pub use live::BackendClient;
pub use mock::{default_fixtures, FixedPicker, FixturePicker, MockFixture, MockSource, RandomPicker};

use async_trait::async_trait;

use crate::analysis::{AnalysisReport, SourceKind};
use crate::error::AnalyzeError;
use crate::upload::ResumeFile;

/// Something that turns a resume into an analysis plus recommendations.
///
/// The session only talks to this trait, so tests and the mock mode can swap
/// the backend out.
#[async_trait]
pub trait AnalysisSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    async fn analyze(&self, file: &ResumeFile) -> Result<AnalysisReport, AnalyzeError>;
}
