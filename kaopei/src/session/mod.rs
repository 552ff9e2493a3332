mod error;
mod machine;
mod model;

pub mod prelude {
    pub use super::error::{SessionError, SessionResult};
    pub use super::machine::SessionController;
    pub use super::model::{
        AnalysisTicket, CompletionOutcome, NoticeSource, PhaseKind, SessionEvent, SessionNotice,
        SessionPhase, TransitionRecord,
    };
}
