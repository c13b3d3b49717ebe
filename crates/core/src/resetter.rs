use little_chat_backend::SessionId;

use crate::backend_client::BackendClient;
use crate::transcript::Transcript;

/// How a reset ended.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ResetOutcome {
    /// The backend forgot the conversation.
    Confirmed,
    /// The backend couldn't be asked, or refused. Carries the reason for
    /// diagnostics.
    Failed(String),
}

/// Clears the conversation memory on the backend, and mirrors it locally
/// only once the backend confirms.
pub(crate) struct ConversationResetter {
    client: BackendClient,
}

impl ConversationResetter {
    #[inline]
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub fn begin(
        &self,
        session_id: &SessionId,
    ) -> impl Future<Output = ResetOutcome> + Send + 'static {
        let fut = self.client.delete_conversation(session_id.clone());
        async move {
            match fut.await {
                Ok(()) => ResetOutcome::Confirmed,
                Err(err) => ResetOutcome::Failed(format!("{err}")),
            }
        }
    }

    /// Applies the outcome of a reset, returns `true` if the transcript
    /// has been cleared.
    ///
    /// Failures never show up in the transcript, they are only logged.
    pub fn finish(transcript: &mut Transcript, outcome: &ResetOutcome) -> bool {
        match outcome {
            ResetOutcome::Confirmed => {
                transcript.clear();
                true
            }
            ResetOutcome::Failed(reason) => {
                warn!("failed to clear the conversation: {reason}");
                false
            }
        }
    }
}
