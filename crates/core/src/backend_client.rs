use std::pin::Pin;
use std::sync::Arc;

use little_chat_backend::{
    Backend, BackendError, ChatRequest, SendOutcome, SessionId,
};
use tracing::Instrument;

pub(crate) type BoxedBackendError = Box<dyn BackendError>;

type BoxedFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A wrapper around a backend that provides a type-erased interface for
/// the other modules.
#[derive(Clone)]
pub(crate) struct BackendClient {
    backend: Arc<dyn BackendObject>,
}

impl BackendClient {
    #[inline]
    pub fn new<B: Backend + 'static>(backend: B) -> Self {
        // We have to erase the type `B`, since the controller doesn't have
        // a generic parameter and we don't want it either.
        Self {
            backend: Arc::new(AnyBackend(backend)),
        }
    }

    /// Sends a message and waits for the outcome.
    ///
    /// The returned future doesn't borrow `self`, so it can be moved
    /// into a spawned task.
    #[inline]
    pub fn send_message(
        &self,
        req: ChatRequest,
    ) -> impl Future<Output = SendOutcome<BoxedBackendError>> + Send + 'static
    {
        self.backend.send_message(req)
    }

    /// Deletes the conversation memory of a session.
    #[inline]
    pub fn delete_conversation(
        &self,
        session_id: SessionId,
    ) -> impl Future<Output = Result<(), BoxedBackendError>> + Send + 'static
    {
        self.backend.delete_conversation(session_id)
    }
}

trait BackendObject: Send + Sync + 'static {
    fn send_message(
        &self,
        req: ChatRequest,
    ) -> BoxedFuture<SendOutcome<BoxedBackendError>>;

    fn delete_conversation(
        &self,
        session_id: SessionId,
    ) -> BoxedFuture<Result<(), BoxedBackendError>>;
}

struct AnyBackend<B>(B);

impl<B: Backend + 'static> BackendObject for AnyBackend<B> {
    fn send_message(
        &self,
        req: ChatRequest,
    ) -> BoxedFuture<SendOutcome<BoxedBackendError>> {
        let fut = self.0.send_message(&req);
        Box::pin(
            async move {
                trace!("got a request: {req:?}");
                let outcome = fut.await;
                trace!("finished a request");
                outcome.map_err(|err| Box::new(err) as BoxedBackendError)
            }
            .instrument(trace_span!("send message")),
        )
    }

    fn delete_conversation(
        &self,
        session_id: SessionId,
    ) -> BoxedFuture<Result<(), BoxedBackendError>> {
        let fut = self.0.delete_conversation(&session_id);
        Box::pin(
            async move {
                trace!("deleting conversation of {session_id}");
                fut.await.map_err(|err| Box::new(err) as BoxedBackendError)
            }
            .instrument(trace_span!("delete conversation")),
        )
    }
}

#[cfg(test)]
mod tests {
    use little_chat_backend::ErrorKind;
    use little_chat_test_backend::{PresetReply, PresetReset, TestBackend};

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
        backend.add_reply(PresetReply::Response("Hi there".to_owned()));
        backend.add_reply(PresetReply::Malformed);
        let client = BackendClient::new(backend.clone());

        let outcome = client.send_message(request("Hi")).await;
        assert!(matches!(outcome, SendOutcome::Success(text) if text == "Hi there"));

        let outcome = client.send_message(request("Hi again")).await;
        assert!(matches!(
            outcome,
            SendOutcome::TransportFailure(err) if err.kind() == ErrorKind::MalformedResponse
        ));
        assert_eq!(backend.sent_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_conversation() {
        let backend = TestBackend::default();
        backend.add_reset(PresetReset::Fail);
        let client = BackendClient::new(backend);

        let err = client
            .delete_conversation("user_1".into())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedStatus);
    }
}
