use little_chat_backend::{ChatRequest, SendOutcome, SessionId};

use crate::backend_client::{BackendClient, BoxedBackendError};
use crate::transcript::{Message, Role, Transcript};

/// Shown when the backend refuses a message without saying why.
pub const FALLBACK_ERROR_TEXT: &str = "The server could not process the message.";

/// Shown when no usable response was obtained from the backend.
pub const CONNECTION_ERROR_TEXT: &str = "Could not connect to the server.";

/// How a send cycle ended.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CycleOutcome {
    /// The backend answered.
    Replied(String),
    /// The backend was reachable but refused to process the message.
    Rejected(Option<String>),
    /// No usable response was obtained.
    Unreachable,
}

impl CycleOutcome {
    fn from_send_outcome(outcome: SendOutcome<BoxedBackendError>) -> Self {
        match outcome {
            SendOutcome::Success(text) if text.is_empty() => {
                warn!("backend answered with an empty response");
                CycleOutcome::Rejected(None)
            }
            SendOutcome::Success(text) => CycleOutcome::Replied(text),
            SendOutcome::ApplicationFailure(text) => {
                CycleOutcome::Rejected(text.filter(|text| !text.is_empty()))
            }
            SendOutcome::TransportFailure(err) => {
                error!("failed to send the message ({:?}): {err}", err.kind());
                CycleOutcome::Unreachable
            }
        }
    }

    /// Turns the outcome into the follow-up message of its cycle.
    pub fn into_message(self) -> Message {
        match self {
            CycleOutcome::Replied(text) => Message::new(Role::Assistant, text),
            CycleOutcome::Rejected(text) => Message::new(
                Role::Error,
                text.unwrap_or_else(|| FALLBACK_ERROR_TEXT.to_owned()),
            ),
            CycleOutcome::Unreachable => {
                Message::new(Role::Error, CONNECTION_ERROR_TEXT)
            }
        }
    }
}

/// Runs send cycles: one optimistic user message, one remote call and
/// exactly one follow-up message.
///
/// The cycle is split in two halves so that the transcript is never
/// borrowed across the remote call. [`MessageDispatcher::begin`] writes
/// the user message and returns the in-flight call, and
/// [`MessageDispatcher::finish`] resolves it into the transcript.
pub(crate) struct MessageDispatcher {
    client: BackendClient,
}

impl MessageDispatcher {
    #[inline]
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Starts a cycle for the given text, which must be trimmed and
    /// non-empty, and the transcript must not be pending.
    pub fn begin(
        &self,
        transcript: &mut Transcript,
        text: String,
        session_id: &SessionId,
    ) -> impl Future<Output = CycleOutcome> + Send + 'static {
        debug_assert!(!transcript.is_pending());

        if let Err(err) = transcript.append(Message::new(Role::User, &*text)) {
            error!("failed to record the user message: {err}");
        }
        transcript.set_pending(true);

        let fut = self.client.send_message(ChatRequest {
            message: text,
            session_id: session_id.clone(),
        });
        async move { CycleOutcome::from_send_outcome(fut.await) }
    }

    /// Records the follow-up message of a cycle and ends it.
    pub fn finish(transcript: &mut Transcript, outcome: CycleOutcome) {
        if let Err(err) = transcript.append(outcome.into_message()) {
            error!("failed to record the follow-up message: {err}");
        }
        transcript.set_pending(false);
    }
}

#[cfg(test)]
mod tests {
    use little_chat_test_backend::{PresetReply, TestBackend};

    use super::*;

    fn dispatcher(replies: impl IntoIterator<Item = PresetReply>) -> MessageDispatcher {
        let backend = TestBackend::default();
        for reply in replies {
            backend.add_reply(reply);
        }
        MessageDispatcher::new(BackendClient::new(backend))
    }

    #[tokio::test]
    async fn test_cycle() {
        let dispatcher = dispatcher([PresetReply::Response("4".to_owned())]);
        let mut transcript = Transcript::default();

        let cycle =
            dispatcher.begin(&mut transcript, "2+2?".to_owned(), &"user_1".into());
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.last().unwrap().role(), Role::User);
        assert_eq!(transcript.last().unwrap().content(), "2+2?");
        assert!(transcript.is_pending());

        let outcome = cycle.await;
        assert_eq!(outcome, CycleOutcome::Replied("4".to_owned()));

        MessageDispatcher::finish(&mut transcript, outcome);
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.last().unwrap().role(), Role::Assistant);
        assert_eq!(transcript.last().unwrap().content(), "4");
        assert!(!transcript.is_pending());
    }

    #[tokio::test]
    async fn test_failures_are_distinguished() {
        let dispatcher = dispatcher([
            PresetReply::Rejected(Some("overloaded".to_owned())),
            PresetReply::Rejected(Some(String::new())),
            PresetReply::Unreachable,
            PresetReply::Response(String::new()),
        ]);
        let mut outcomes = vec![];
        for _ in 0..4 {
            let mut transcript = Transcript::default();
            let cycle = dispatcher.begin(
                &mut transcript,
                "hello".to_owned(),
                &"user_1".into(),
            );
            outcomes.push(cycle.await);
        }

        assert_eq!(
            outcomes,
            [
                CycleOutcome::Rejected(Some("overloaded".to_owned())),
                CycleOutcome::Rejected(None),
                CycleOutcome::Unreachable,
                CycleOutcome::Rejected(None),
            ]
        );
    }

    #[test]
    fn test_into_message() {
        let message = CycleOutcome::Rejected(Some("overloaded".to_owned()))
            .into_message();
        assert_eq!(message.role(), Role::Error);
        assert_eq!(message.content(), "overloaded");

        let message = CycleOutcome::Rejected(None).into_message();
        assert_eq!(message.role(), Role::Error);
        assert_eq!(message.content(), FALLBACK_ERROR_TEXT);

        let message = CycleOutcome::Unreachable.into_message();
        assert_eq!(message.role(), Role::Error);
        assert_eq!(message.content(), CONNECTION_ERROR_TEXT);
    }
}
