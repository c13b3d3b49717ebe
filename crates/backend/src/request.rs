use crate::session::SessionId;

/// A message to be sent to the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChatRequest {
    /// The user input, already trimmed and never empty.
    pub message: String,
    /// The session whose conversation memory the message belongs to.
    pub session_id: SessionId,
}
