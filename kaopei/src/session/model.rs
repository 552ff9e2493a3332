use crate::analysis::prelude::{AnalysisError, AnalysisResult};
use crate::intake::prelude::{IntakeError, UploadedImage};

/// Where a session is. Each variant owns exactly the data that phase needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Previewing {
        image: UploadedImage,
    },
    Analyzing {
        image: UploadedImage,
        generation: u64,
    },
    Showing {
        image: UploadedImage,
        result: AnalysisResult,
    },
}

impl SessionPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            SessionPhase::Idle => PhaseKind::Idle,
            SessionPhase::Previewing { .. } => PhaseKind::Previewing,
            SessionPhase::Analyzing { .. } => PhaseKind::Analyzing,
            SessionPhase::Showing { .. } => PhaseKind::Showing,
        }
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        match self {
            SessionPhase::Idle => None,
            SessionPhase::Previewing { image }
            | SessionPhase::Analyzing { image, .. }
            | SessionPhase::Showing { image, .. } => Some(image),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum PhaseKind {
    Idle,
    Previewing,
    Analyzing,
    Showing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SessionEvent {
    #[strum(serialize = "select image")]
    SelectImage,
    #[strum(serialize = "begin analysis")]
    BeginAnalysis,
    #[strum(serialize = "analysis succeeded")]
    AnalysisSucceeded,
    #[strum(serialize = "analysis failed")]
    AnalysisFailed,
    #[strum(serialize = "reset")]
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRecord {
    pub from: PhaseKind,
    pub event: SessionEvent,
    pub to: PhaseKind,
}

impl TransitionRecord {
    pub fn new(from: PhaseKind, event: SessionEvent, to: PhaseKind) -> Self {
        Self { from, event, to }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSource {
    Intake,
    Analysis,
}

/// The error banner. Lives next to the phase, not inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionNotice {
    pub source: NoticeSource,
    pub message: String,
}

impl From<&IntakeError> for SessionNotice {
    fn from(value: &IntakeError) -> Self {
        Self {
            source: NoticeSource::Intake,
            message: value.to_string(),
        }
    }
}

impl From<&AnalysisError> for SessionNotice {
    fn from(value: &AnalysisError) -> Self {
        Self {
            source: NoticeSource::Analysis,
            message: value.user_message().to_string(),
        }
    }
}

/// Handed out by `begin_analysis`; a completion is only applied with the ticket of
/// the analysis still in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTicket {
    generation: u64,
    image: UploadedImage,
}

impl AnalysisTicket {
    pub(super) fn new(generation: u64, image: UploadedImage) -> Self {
        Self { generation, image }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn image(&self) -> &UploadedImage {
        &self.image
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    Showing,
    Failed,
    /// The session moved on (reset or a newer analysis); nothing changed.
    Stale,
}
