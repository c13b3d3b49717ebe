//! Transcript-related types.

use chrono::Local;

/// Who a message comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// The user typed it.
    User,
    /// The backend answered with it.
    Assistant,
    /// Something went wrong while exchanging the previous user message.
    Error,
}

/// A message in the transcript.
///
/// Messages are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Message {
    role: Role,
    content: String,
    timestamp: String,
}

impl Message {
    /// Creates a message stamped with the current local time.
    #[inline]
    pub fn new<S: Into<String>>(role: Role, content: S) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Local::now().format("%H:%M:%S").to_string(),
        }
    }

    /// Returns the role of this message.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the text body of this message.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the time this message was created at, for display only.
    #[inline]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// The error returned when a message can't be added to a transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptError {
    /// User and assistant messages must have content.
    #[error("{0:?} message must not be empty")]
    EmptyContent(Role),
}

/// The ordered record of exchanged messages, and whether a message is
/// currently waiting for its answer.
///
/// Only the controller mutates a transcript. Other parties get clones
/// through [`crate::ConversationController::snapshot`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
    pending: bool,
}

impl Transcript {
    /// Returns all messages, in the order they were added.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the most recently added message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns `true` if a sent message is waiting for its answer.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if there are no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub(crate) fn append(
        &mut self,
        message: Message,
    ) -> Result<(), TranscriptError> {
        if message.role != Role::Error && message.content.is_empty() {
            return Err(TranscriptError::EmptyContent(message.role));
        }
        self.messages.push(message);
        Ok(())
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.messages.clear();
    }

    #[inline]
    pub(crate) fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
    }
}
