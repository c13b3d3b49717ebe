//! Core logic of the chat client: the transcript, send cycles, resets and
//! the controller that composes them.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod backend_client;
mod controller;
mod dispatcher;
mod error;
mod resetter;
pub mod transcript;

pub use controller::{ControllerBuilder, ConversationController, Submission};
pub use dispatcher::{CONNECTION_ERROR_TEXT, FALLBACK_ERROR_TEXT};
pub use error::Error;
pub use little_chat_backend::SessionId;
pub use transcript::{Message, Role, Transcript, TranscriptError};
