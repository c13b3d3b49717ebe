use little_chat_backend::ChatRequest;
use reqwest::StatusCode;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatRequestBody<'a> {
    message: &'a str,
    user_id: &'a str,
}

impl<'a> ChatRequestBody<'a> {
    #[inline]
    pub fn new(req: &'a ChatRequest) -> Self {
        Self {
            message: &req.message,
            user_id: req.session_id.as_str(),
        }
    }
}

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
struct ChatResponseBody {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// What a well-formed response body says about the message.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Response(String),
    Rejected(Option<String>),
}

/// Interprets a response body.
///
/// Only a successful status with a non-empty `response` counts as an
/// answer. Any other well-formed body, whatever the status, is a
/// rejection carrying the server's `error` text if it has one. A body
/// that doesn't parse, or isn't a JSON object, is an error for the caller
/// to handle.
pub fn interpret(
    status: StatusCode,
    body: &str,
) -> Result<Verdict, serde_json::Error> {
    // The derived deserializer accepts arrays too, so check the shape first.
    let value: Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Err(serde_json::Error::custom(
            "expected the response body to be an object",
        ));
    }
    let payload: ChatResponseBody = serde_json::from_value(value)?;
    let verdict = match payload {
        ChatResponseBody {
            response: Some(response),
            ..
        } if status.is_success() && !response.is_empty() => {
            Verdict::Response(response)
        }
        ChatResponseBody { error, .. } => {
            Verdict::Rejected(error.filter(|error| !error.is_empty()))
        }
    };
    Ok(verdict)
}
