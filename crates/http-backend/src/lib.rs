//! A backend that talks to the chat server over HTTP.
//!
//! Two endpoints are used, both relative to the configured base URL:
//!
//! - `POST /chat` with `{ "message": ..., "user_id": ... }`, answered
//!   with `{ "response": ... }` or `{ "error": ... }`.
//! - `DELETE /conversation/{user_id}`, where any 2xx status means the
//!   conversation memory is gone.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::sync::Arc;

use little_chat_backend::{
    Backend, BackendError, ChatRequest, ErrorKind, SendOutcome, SessionId,
};
use reqwest::{Client, header};

pub use config::{DEFAULT_BASE_URL, HttpBackendConfig, HttpBackendConfigBuilder};
use proto::{ChatRequestBody, Verdict};

/// Error type for [`HttpBackend`].
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl BackendError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// HTTP chat backend.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    config: Arc<HttpBackendConfig>,
}

impl HttpBackend {
    /// Creates a new `HttpBackend` with the given configuration.
    #[inline]
    pub fn new(config: HttpBackendConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }
}

impl Backend for HttpBackend {
    type Error = Error;

    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = SendOutcome<Self::Error>> + Send + 'static {
        let resp_fut = self
            .client
            .post(self.config.endpoint("/chat"))
            .header(header::ACCEPT, "application/json")
            .json(&ChatRequestBody::new(req))
            .send();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    return SendOutcome::TransportFailure(Error::new(
                        format!("{err}"),
                        ErrorKind::Unreachable,
                    ));
                }
            };

            let status = resp.status();
            let body = match resp.text().await {
                Ok(body) => body,
                Err(err) => {
                    return SendOutcome::TransportFailure(Error::new(
                        format!("{err}"),
                        ErrorKind::Unreachable,
                    ));
                }
            };
            trace!("got a response ({status}): {body}");

            match proto::interpret(status, &body) {
                Ok(Verdict::Response(text)) => SendOutcome::Success(text),
                Ok(Verdict::Rejected(text)) => {
                    debug!("the message was rejected ({status}): {text:?}");
                    SendOutcome::ApplicationFailure(text)
                }
                Err(err) => SendOutcome::TransportFailure(Error::new(
                    format!("unparsable response ({status}): {err}"),
                    ErrorKind::MalformedResponse,
                )),
            }
        }
    }

    fn delete_conversation(
        &self,
        session_id: &SessionId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static {
        let resp_fut = self
            .client
            .delete(self.config.endpoint(&format!("/conversation/{session_id}")))
            .send();

        async move {
            let resp = resp_fut.await.map_err(|err| {
                Error::new(format!("{err}"), ErrorKind::Unreachable)
            })?;
            let status = resp.status();
            if !status.is_success() {
                return Err(Error::new(
                    format!("unexpected status: {status}"),
                    ErrorKind::UnexpectedStatus,
                ));
            }
            Ok(())
        }
    }
}
