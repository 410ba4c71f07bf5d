#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Typed Rust client for the virtual try-on gateway
//!
//! Composes try-on requests, submits them to a remote gateway over HTTP or to
//! an in-process gateway, and tracks caller-side state in a
//! [`GenerationSession`].

mod client;
pub mod error;
pub mod session;

pub use client::{DEFAULT_PATH, TryOnClient};
pub use error::{Result, TryOnClientError};
pub use session::{GenerationSession, Phase};
