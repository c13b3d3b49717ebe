//! A scripted fake backend for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::future::pending;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use little_chat_backend::{
    Backend, BackendError, ChatRequest, ErrorKind, SendOutcome, SessionId,
};
use tokio::sync::watch;
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl BackendError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    replies: VecDeque<PresetReply>,
    resets: VecDeque<PresetReset>,
    sent_requests: Vec<ChatRequest>,
    deleted_sessions: Vec<SessionId>,
}

/// Opens the gate installed by [`TestBackend::hold_replies`].
#[derive(Debug)]
pub struct ReplyGate(watch::Sender<bool>);

impl ReplyGate {
    /// Lets every held and future reply through.
    #[inline]
    pub fn open(&self) {
        self.0.send_replace(true);
    }
}

/// A scripted fake backend for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how
/// the backend should answer each request. Replies and resets are
/// consumed in order. If the script runs out, the request fails with a
/// transport error.
///
/// Clones share the same script and records, so a test can keep one
/// clone to inspect the requests made through another.
///
/// # Note
///
/// This type is not optimized for production use. You should only use
/// it for testing.
#[derive(Clone, Default)]
pub struct TestBackend {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
    gate: Option<watch::Receiver<bool>>,
}

impl TestBackend {
    /// Creates a backend from a preset script.
    pub fn with_script(preset: PresetScript) -> Self {
        let backend = Self::default();
        {
            let mut script = backend.lock_script();
            script.replies.extend(preset.replies);
            script.resets.extend(preset.resets);
        }
        backend
    }

    #[inline]
    pub fn add_reply(&self, reply: PresetReply) {
        self.lock_script().replies.push_back(reply);
    }

    #[inline]
    pub fn add_reset(&self, reset: PresetReset) {
        self.lock_script().resets.push_back(reset);
    }

    /// Makes every reply and reset take the given time. Defaults to 1ms.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Holds every reply until the returned gate is opened.
    ///
    /// Dropping the gate without opening it releases the replies too.
    pub fn hold_replies(&mut self) -> ReplyGate {
        let (tx, rx) = watch::channel(false);
        self.gate = Some(rx);
        ReplyGate(tx)
    }

    /// Returns the send-message requests received so far.
    #[inline]
    pub fn sent_requests(&self) -> Vec<ChatRequest> {
        self.lock_script().sent_requests.clone()
    }

    /// Returns the sessions whose deletion has been requested so far.
    #[inline]
    pub fn deleted_sessions(&self) -> Vec<SessionId> {
        self.lock_script().deleted_sessions.clone()
    }

    fn lock_script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Backend for TestBackend {
    type Error = crate::Error;

    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = SendOutcome<Self::Error>> + Send + 'static {
        let reply = {
            let mut script = self.lock_script();
            script.sent_requests.push(req.clone());
            script.replies.pop_front()
        };
        let delay = self.delay.unwrap_or(Duration::from_millis(1));
        let gate = self.gate.clone();

        async move {
            if let Some(mut gate) = gate {
                let _ = gate.wait_for(|open| *open).await;
            }
            sleep(delay).await;

            match reply {
                Some(PresetReply::Response(text)) => SendOutcome::Success(text),
                Some(PresetReply::Rejected(text)) => {
                    SendOutcome::ApplicationFailure(text)
                }
                Some(PresetReply::Unreachable) => {
                    SendOutcome::TransportFailure(Error {
                        message: "backend is unreachable",
                        kind: ErrorKind::Unreachable,
                    })
                }
                Some(PresetReply::Malformed) => {
                    SendOutcome::TransportFailure(Error {
                        message: "backend answered with a garbled body",
                        kind: ErrorKind::MalformedResponse,
                    })
                }
                Some(PresetReply::Hang) => pending().await,
                None => SendOutcome::TransportFailure(Error {
                    message: "not enough replies",
                    kind: ErrorKind::Other,
                }),
            }
        }
    }

    fn delete_conversation(
        &self,
        session_id: &SessionId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static {
        let reset = {
            let mut script = self.lock_script();
            script.deleted_sessions.push(session_id.clone());
            script.resets.pop_front()
        };
        let delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;
            match reset {
                Some(PresetReset::Succeed) => Ok(()),
                Some(PresetReset::Fail) => Err(Error {
                    message: "conversation could not be deleted",
                    kind: ErrorKind::UnexpectedStatus,
                }),
                None => Err(Error {
                    message: "not enough resets",
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::timeout;

    use super::*;

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.to_owned(),
            session_id: "user_1".into(),
        }
    }

    #[tokio::test]
    async fn test_send_message() {
        let backend = TestBackend::default();
        backend.add_reply(PresetReply::Response("4".to_owned()));
        backend.add_reply(PresetReply::Rejected(Some("overloaded".to_owned())));
        backend.add_reply(PresetReply::Unreachable);

        let outcome = backend.send_message(&request("2+2?")).await;
        assert!(matches!(outcome, SendOutcome::Success(text) if text == "4"));

        let outcome = backend.send_message(&request("hello")).await;
        assert!(matches!(
            outcome,
            SendOutcome::ApplicationFailure(Some(text)) if text == "overloaded"
        ));

        let outcome = backend.send_message(&request("hello")).await;
        assert!(matches!(
            outcome,
            SendOutcome::TransportFailure(err) if err.kind() == ErrorKind::Unreachable
        ));

        // The script is exhausted now.
        let outcome = backend.send_message(&request("hello")).await;
        assert!(matches!(
            outcome,
            SendOutcome::TransportFailure(err)
                if err.kind() == ErrorKind::Other
                    && err.to_string() == "not enough replies"
        ));

        let sent: Vec<_> = backend
            .sent_requests()
            .into_iter()
            .map(|req| req.message)
            .collect();
        assert_eq!(sent, ["2+2?", "hello", "hello", "hello"]);
    }

    #[tokio::test]
    async fn test_hold_replies() {
        let mut backend = TestBackend::default();
        backend.add_reply(PresetReply::Response("late".to_owned()));
        let gate = backend.hold_replies();

        let mut fut = Box::pin(backend.send_message(&request("hi")));
        assert!(timeout(Duration::from_millis(20), &mut fut).await.is_err());

        gate.open();
        let outcome = timeout(Duration::from_millis(500), fut).await.unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay() {
        let mut backend = TestBackend::default();
        backend.add_reply(PresetReply::Response("slow".to_owned()));
        backend.add_reset(PresetReset::Succeed);
        backend.set_delay(Duration::from_secs(30));

        let mut fut = Box::pin(backend.send_message(&request("hi")));
        assert!(timeout(Duration::from_secs(10), &mut fut).await.is_err());
        let outcome = timeout(Duration::from_secs(30), fut).await.unwrap();
        assert!(matches!(outcome, SendOutcome::Success(text) if text == "slow"));

        let mut fut =
            Box::pin(backend.delete_conversation(&SessionId::from("user_1")));
        assert!(timeout(Duration::from_secs(10), &mut fut).await.is_err());
        assert!(timeout(Duration::from_secs(30), fut).await.unwrap().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_hang() {
        let backend = TestBackend::default();
        backend.add_reply(PresetReply::Hang);
        let fut = backend.send_message(&request("hi"));
        assert!(timeout(Duration::from_secs(3600), fut).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_conversation() {
        let backend = TestBackend::with_script(PresetScript {
            replies: vec![],
            resets: vec![PresetReset::Succeed, PresetReset::Fail],
        });
        let session_id = SessionId::from("user_1");

        assert!(backend.delete_conversation(&session_id).await.is_ok());
        let err = backend.delete_conversation(&session_id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
        assert_eq!(backend.deleted_sessions(), [session_id.clone(), session_id]);
    }
}
