use little_chat_backend::{Backend, SessionId};

use super::ConversationController;
use super::state::Callbacks;
use crate::backend_client::BackendClient;
use crate::transcript::Message;

/// [`ConversationController`] builder.
pub struct ControllerBuilder {
    pub(super) client: BackendClient,
    pub(super) session_id: Option<SessionId>,
    pub(super) callbacks: Callbacks,
}

impl ControllerBuilder {
    /// Creates a new builder with the specified backend.
    #[inline]
    pub fn with_backend<B: Backend + 'static>(backend: B) -> Self {
        Self {
            client: BackendClient::new(backend),
            session_id: None,
            callbacks: Callbacks::default(),
        }
    }

    /// Uses the given session identifier instead of generating one.
    #[inline]
    pub fn with_session_id<S: Into<SessionId>>(mut self, session_id: S) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Attaches a callback to be invoked when a message is added to the
    /// transcript.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&Message) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_message = Some(Box::new(on_message));
        self
    }

    /// Attaches a callback to be invoked when a send cycle has ended and
    /// the controller accepts submissions again.
    #[inline]
    pub fn on_idle(mut self, on_idle: impl Fn() + Send + Sync + 'static) -> Self {
        self.callbacks.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Attaches a callback to be invoked when the transcript is cleared.
    #[inline]
    pub fn on_cleared(
        mut self,
        on_cleared: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_cleared = Some(Box::new(on_cleared));
        self
    }

    /// Attaches a callback to be invoked with the reason when a clear
    /// fails. The transcript is left untouched in that case.
    #[inline]
    pub fn on_reset_failed(
        mut self,
        on_reset_failed: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        self.callbacks.on_reset_failed = Some(Box::new(on_reset_failed));
        self
    }

    /// Builds the controller.
    ///
    /// This must be called within a tokio runtime.
    #[inline]
    pub fn build(self) -> ConversationController {
        ConversationController::spawn_from_builder(self)
    }
}
