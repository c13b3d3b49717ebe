/// The kind of transport-level failure that occurred.
///
/// Application-level failures (the backend answered but refused to
/// process a message) are not errors, see [`crate::SendOutcome`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The backend could not be reached, or the connection was dropped
    /// before a complete response was received.
    Unreachable,
    /// A response was received, but it could not be understood.
    MalformedResponse,
    /// The backend answered with a status that doesn't mean success.
    UnexpectedStatus,
    /// Any other errors.
    Other,
}
