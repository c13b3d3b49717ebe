use little_chat_actor::ActorDeadError;

/// Errors returned by [`crate::ConversationController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    /// The controller has been shut down, or its task is gone.
    #[error("the conversation controller has stopped")]
    Stopped,
}

impl From<ActorDeadError> for Error {
    #[inline]
    fn from(_: ActorDeadError) -> Self {
        Error::Stopped
    }
}
