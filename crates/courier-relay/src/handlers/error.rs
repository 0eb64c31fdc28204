use crate::protocol::FrameError;

/// Errors surfaced by frame handlers.
///
/// These are logged by the read pump and never terminate the session.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] FrameError),

    #[error("Session '{0}' is not registered")]
    UnknownSession(String),
}
