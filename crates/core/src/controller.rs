mod builder;
mod state;

use little_chat_actor::Actor;
use little_chat_backend::SessionId;

use crate::error::Error;
use crate::transcript::Transcript;
pub use builder::ControllerBuilder;
use state::{Clear, ControllerState, Snapshot, Submit};

/// What happened to a submitted text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Submission {
    /// A send cycle has started, and the user message is already in the
    /// transcript.
    Started,
    /// The text was blank. Nothing happened.
    Blank,
    /// Another message is still waiting for its answer. Nothing happened.
    Busy,
}

/// The composition root that the presentation layer talks to.
///
/// The controller owns the transcript and the session identifier, and
/// handles submit and clear triggers one at a time on its own task. At
/// most one message is waiting for an answer at any moment: submitting
/// while one is outstanding is a silent no-op.
///
/// A clear may be triggered at any time, even while a message is
/// waiting. The transcript is only emptied once the backend confirms;
/// an answer that arrives after a confirmed clear is discarded.
///
/// Cloning the controller is cheap, and clones drive the same
/// conversation.
#[derive(Clone)]
pub struct ConversationController {
    handle: Actor<ControllerState>,
    session_id: SessionId,
}

impl ConversationController {
    fn spawn_from_builder(builder: ControllerBuilder) -> Self {
        let ControllerBuilder {
            client,
            session_id,
            callbacks,
        } = builder;

        let session_id = session_id.unwrap_or_else(SessionId::generate);
        debug!("starting conversation {session_id}");
        let state = ControllerState::new(client, session_id.clone(), callbacks);
        Self {
            handle: Actor::spawn(state, Some("conversation")),
            session_id,
        }
    }

    /// Submits a text typed by the user.
    ///
    /// The text is trimmed first. Once this returns
    /// [`Submission::Started`], the user message is in the transcript and
    /// the answer is on its way.
    pub async fn submit<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<Submission, Error> {
        Ok(self.handle.call(Submit(text.into())).await?)
    }

    /// Asks the backend to forget the conversation, and clears the
    /// transcript once it confirms.
    ///
    /// The result is reported through the `on_cleared` and
    /// `on_reset_failed` callbacks.
    #[inline]
    pub fn clear(&self) -> Result<(), Error> {
        Ok(self.handle.send(Clear)?)
    }

    /// Returns a copy of the current transcript.
    pub async fn snapshot(&self) -> Result<Transcript, Error> {
        Ok(self.handle.call(Snapshot).await?)
    }

    /// Returns the identifier scoping the backend's conversation memory.
    #[inline]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Stops the controller, abandoning any outstanding request.
    #[inline]
    pub fn shutdown(&self) {
        self.handle.stop();
    }
}
