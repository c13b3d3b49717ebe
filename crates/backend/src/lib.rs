//! An abstraction layer for chat backends.
//!
//! This crate establishes the protocol the conversation controller uses
//! to talk to a remote inference backend and its conversation memory,
//! so that the controller doesn't need to know how the backend is
//! reached (HTTP, a scripted fake for tests, etc.).
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod backend;
mod error;
mod outcome;
mod request;
mod session;

pub use backend::*;
pub use error::*;
pub use outcome::*;
pub use request::*;
pub use session::*;
