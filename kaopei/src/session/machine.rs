use super::error::{SessionError, SessionResult};
use super::model::{
    AnalysisTicket, CompletionOutcome, PhaseKind, SessionEvent, SessionNotice, SessionPhase,
    TransitionRecord,
};
use crate::analysis::prelude::{AnalysisClient, AnalysisError, AnalysisResult};
use crate::intake::prelude::{IntakeError, UploadedImage};
use tracing::{debug, warn};

/// One upload-through-result cycle, and every cycle after it.
#[derive(Debug, Default)]
pub struct SessionController {
    phase: SessionPhase,
    error: Option<SessionNotice>,
    generation: u64,
    transition_history: Vec<TransitionRecord>,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn error(&self) -> Option<&SessionNotice> {
        self.error.as_ref()
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.phase.image()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            SessionPhase::Showing { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn history(&self) -> &[TransitionRecord] {
        &self.transition_history
    }

    /// Applies the outcome of picking a file. A rejected file only sets the error,
    /// whatever was shown before stays.
    pub fn apply_selection(
        &mut self,
        selection: Result<UploadedImage, IntakeError>,
    ) -> SessionResult<PhaseKind> {
        let from = self.kind();
        if !matches!(from, PhaseKind::Idle | PhaseKind::Previewing) {
            return Err(self.invalid(SessionEvent::SelectImage));
        }

        match selection {
            Ok(image) => {
                self.error = None;
                self.enter(from, SessionEvent::SelectImage, SessionPhase::Previewing { image });
            }
            Err(e) => {
                debug!("Selection rejected: {:?}", e);
                self.error = Some(SessionNotice::from(&e));
            }
        }

        Ok(self.kind())
    }

    /// Starts an analysis of the previewed image. Returns `None` when there is
    /// nothing to analyze or one is already running.
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        let SessionPhase::Previewing { image } = &self.phase else {
            debug!("Ignoring analysis request while {}", self.kind());
            return None;
        };

        let image = image.clone();
        self.generation += 1;
        self.error = None;
        self.enter(
            PhaseKind::Previewing,
            SessionEvent::BeginAnalysis,
            SessionPhase::Analyzing {
                image: image.clone(),
                generation: self.generation,
            },
        );

        Some(AnalysisTicket::new(self.generation, image))
    }

    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> CompletionOutcome {
        let current = std::mem::take(&mut self.phase);
        let image = match current {
            SessionPhase::Analyzing { image, generation } if generation == ticket.generation() => {
                image
            }
            other => {
                debug!(
                    "Dropping stale analysis {} while {}",
                    ticket.generation(),
                    other.kind()
                );
                self.phase = other;
                return CompletionOutcome::Stale;
            }
        };

        match outcome {
            Ok(result) => {
                self.enter(
                    PhaseKind::Analyzing,
                    SessionEvent::AnalysisSucceeded,
                    SessionPhase::Showing { image, result },
                );
                CompletionOutcome::Showing
            }
            Err(e) => {
                warn!("Analysis failed: {}", e);
                self.error = Some(SessionNotice::from(&e));
                self.enter(
                    PhaseKind::Analyzing,
                    SessionEvent::AnalysisFailed,
                    SessionPhase::Previewing { image },
                );
                CompletionOutcome::Failed
            }
        }
    }

    /// Runs one analysis of the previewed image to completion.
    pub async fn analyze(&mut self, client: &AnalysisClient) -> Option<CompletionOutcome> {
        let ticket = self.begin_analysis()?;
        let outcome = client.analyze(ticket.image()).await;
        Some(self.complete_analysis(ticket, outcome))
    }

    pub fn reset(&mut self) -> SessionResult<PhaseKind> {
        let from = self.kind();
        match from {
            PhaseKind::Analyzing => return Err(self.invalid(SessionEvent::Reset)),
            PhaseKind::Idle => {
                self.error = None;
            }
            PhaseKind::Previewing | PhaseKind::Showing => {
                self.error = None;
                self.generation += 1;
                self.enter(from, SessionEvent::Reset, SessionPhase::Idle);
            }
        }

        Ok(self.kind())
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn enter(&mut self, from: PhaseKind, event: SessionEvent, next: SessionPhase) {
        let record = TransitionRecord::new(from, event, next.kind());
        debug!(from = %record.from, event = %record.event, to = %record.to, "session transition");
        self.phase = next;
        self.transition_history.push(record);
    }

    fn invalid(&self, event: SessionEvent) -> SessionError {
        let from = self.kind();
        warn!(from = %from, event = %event, "invalid session transition requested");
        SessionError::InvalidTransition { from, event }
    }
}

impl std::fmt::Display for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionPhase::{}", self.kind())
    }
}
