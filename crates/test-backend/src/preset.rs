use serde::{Deserialize, Serialize};

/// How the backend answers one send-message request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PresetReply {
    /// Answers with the response text.
    Response(String),
    /// Refuses the message, with an optional error text.
    Rejected(Option<String>),
    /// Behaves as if the backend can't be reached.
    Unreachable,
    /// Behaves as if the backend answered with a garbled body.
    Malformed,
    /// Never answers.
    Hang,
}

/// How the backend answers one delete-conversation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetReset {
    /// The conversation memory is deleted.
    Succeed,
    /// The deletion fails.
    Fail,
}

/// A complete script for a [`crate::TestBackend`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetScript {
    /// Replies, consumed in order by send-message requests.
    #[serde(default)]
    pub replies: Vec<PresetReply>,
    /// Answers, consumed in order by delete-conversation requests.
    #[serde(default)]
    pub resets: Vec<PresetReset>,
}

impl PresetScript {
    /// Parses a script from its JSON representation.
    #[inline]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
