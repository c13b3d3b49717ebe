//! A terminal chat client built on top of `little-chat-core`.
//!
//! The crate includes a CLI tool for chatting in the terminal. The
//! configuration and rendering helpers it uses are exported too, so other
//! front-ends can share them.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod config;
pub mod input;
pub mod render;

pub use config::{BASE_URL_ENV, Config};

/// Re-exports of [`little_chat_core`] crate.
pub mod core {
    pub use little_chat_core::*;
}
