//! webchat - a client for a conversational web chat backend
//!
//! Sends prompts over the backend's HTTP API, keeps multi-turn threads
//! linked, and turns its event-stream answers and error payloads into a
//! stable result or a typed error.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod sse;
pub mod thread;
pub mod traits;

pub use auth::AccountKey;
pub use client::{ChatClient, Exchange, ExchangeRequest, StreamHandle};
pub use config::ClientConfig;
pub use error::{ChatError, ChatResult};
pub use models::ExchangeResult;
