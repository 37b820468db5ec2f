//! Error handling for the client.
//!
//! - [`ChatError`]: the single error type every operation returns
//! - [`ErrorCategory`]: coarse grouping used for retry and re-auth decisions
//! - [`classify`]: mapping of backend `detail` payloads to error kinds
//!
//! # Example
//!
//! ```ignore
//! use webchat::error::{ChatError, ChatResult};
//!
//! match client.ask(ExchangeRequest::new("Hello")).await {
//!     Ok(result) => println!("{}", result.answer),
//!     Err(err) if err.requires_reauth() => eprintln!("token rejected: {err}"),
//!     Err(err) if err.is_retryable() => eprintln!("try again later: {err}"),
//!     Err(err) => eprintln!("[{}] {err}", err.error_code()),
//! }
//! ```
//!
//! | Category | Kinds | Retryable |
//! |----------|-------|-----------|
//! | Auth | InvalidCredential, CredentialExpired | No |
//! | User | NoAccountAvailable, InvalidArgument, ConversationNotFound | No |
//! | Network | Transport (connection, timeout, body) | Yes |
//! | Server | RateLimited, BackendTransient, BackendInternal, Transport 5xx | Yes |
//! | Client | MalformedResponse, Transport 4xx | No |

mod category;
mod chat_error;
pub mod classify;

pub use category::ErrorCategory;
pub use chat_error::ChatError;
pub use classify::{classify_body, classify_detail, classify_error_body, error_for_status};

/// Result alias used throughout the crate.
pub type ChatResult<T> = Result<T, ChatError>;
