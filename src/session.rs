use crate::analysis::AnalysisReport;
use crate::error::AnalyzeError;
use crate::source::AnalysisSource;
use crate::upload::{validate_resume, ResumeFile};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    FileSelected {
        file: ResumeFile,
    },
    Analyzing {
        file: ResumeFile,
        ticket: AnalysisTicket,
    },
    Succeeded {
        file: ResumeFile,
        report: AnalysisReport,
    },
    Failed {
        file: ResumeFile,
        error: AnalyzeError,
    },
}

/// Identifies one analysis attempt. Only the latest ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisTicket(u64);

/// Holds the state of one upload-and-analyze session.
///
/// `Idle -> FileSelected -> Analyzing -> {Succeeded, Failed}`; reset or a new
/// selection discards any result.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    next_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            next_ticket: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selected_file(&self) -> Option<&ResumeFile> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::FileSelected { file }
            | SessionState::Analyzing { file, .. }
            | SessionState::Succeeded { file, .. }
            | SessionState::Failed { file, .. } => Some(file),
        }
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match &self.state {
            SessionState::Succeeded { report, .. } => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AnalyzeError> {
        match &self.state {
            SessionState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.state, SessionState::Analyzing { .. })
    }

    /// Choose a resume. Non-PDF files are rejected and leave the state as it
    /// was; an accepted file clears any previous result.
    pub fn select_file(&mut self, file: ResumeFile) -> Result<(), AnalyzeError> {
        validate_resume(&file)?;
        tracing::debug!(file = %file.name, "file selected");
        self.state = SessionState::FileSelected { file };
        Ok(())
    }

    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }

    /// Start an attempt. Starting again while one is in flight supersedes it.
    pub fn begin_analysis(&mut self) -> Result<(AnalysisTicket, ResumeFile), AnalyzeError> {
        let file = self.selected_file().cloned().ok_or(AnalyzeError::NoFileSelected)?;

        self.next_ticket += 1;
        let ticket = AnalysisTicket(self.next_ticket);
        self.state = SessionState::Analyzing {
            file: file.clone(),
            ticket,
        };
        Ok((ticket, file))
    }

    /// Record the outcome of an attempt. Returns false, leaving the state
    /// untouched, when the ticket is not the one currently in flight.
    pub fn finish(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<AnalysisReport, AnalyzeError>,
    ) -> bool {
        let file = match &self.state {
            SessionState::Analyzing { file, ticket: current } if *current == ticket => file.clone(),
            _ => {
                tracing::debug!(?ticket, "dropping stale analysis result");
                return false;
            }
        };

        self.state = match outcome {
            Ok(report) => SessionState::Succeeded { file, report },
            Err(error) => SessionState::Failed { file, error },
        };
        true
    }

    /// Run one full attempt against `source`.
    pub async fn analyze(
        &mut self,
        source: &dyn AnalysisSource,
    ) -> Result<&AnalysisReport, AnalyzeError> {
        let (ticket, file) = self.begin_analysis()?;
        tracing::debug!(file = %file.name, source = ?source.kind(), "analyzing");

        let outcome = source.analyze(&file).await;
        self.finish(ticket, outcome);

        match &self.state {
            SessionState::Succeeded { report, .. } => Ok(report),
            SessionState::Failed { error, .. } => Err(error.clone()),
            _ => Err(AnalyzeError::UnknownFailure(
                "analysis finished in an unexpected state".to_string(),
            )),
        }
    }
}
