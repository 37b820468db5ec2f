//! Credentials for the chat backend.
//!
//! - Account registry keyed by name or numbered slot
//! - Token validation producing the `Authorization` header

pub mod accounts;
pub mod token;

pub use accounts::{AccountKey, AccountStore, Credential};
pub use token::{validate, validate_at, AuthHeader};
