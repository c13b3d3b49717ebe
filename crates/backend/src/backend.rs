use std::error::Error;

use crate::error::ErrorKind;
use crate::outcome::SendOutcome;
use crate::request::ChatRequest;
use crate::session::SessionId;

/// The error type for a backend.
pub trait BackendError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A type that represents a chat backend, which answers user messages
/// and keeps a conversation memory per session.
///
/// Once the backend is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the backend should be prepared for being dropped anytime.
pub trait Backend: Send + Sync {
    /// The error type that may be returned by the backend.
    type Error: BackendError;

    /// Sends a user message and waits for the backend to answer it.
    ///
    /// The returned future must be fully independent of `self`. It never
    /// fails in the `Result` sense: every way the exchange can end is a
    /// variant of [`SendOutcome`].
    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = SendOutcome<Self::Error>> + Send + 'static;

    /// Deletes the conversation memory the backend keeps for a session.
    fn delete_conversation(
        &self,
        session_id: &SessionId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static;
}
