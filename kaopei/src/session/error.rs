use super::model::{PhaseKind, SessionEvent};
use thiserror::Error;

pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("invalid session transition: from {from} using event {event}")]
    InvalidTransition { from: PhaseKind, event: SessionEvent },
}
