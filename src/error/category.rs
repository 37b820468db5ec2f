//! Error category classification.
//!
//! A coarse grouping of [`ChatError`](super::ChatError) kinds so callers,
//! which own any retry policy, can decide what to do without matching on
//! every variant.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Transport failures (connection, timeout, broken body).
    /// Generally transient.
    Network,

    /// Credential problems: malformed, expired or rejected tokens.
    /// Needs a new token.
    Auth,

    /// Backend-reported failures (rate limits, 5xx, transient errors).
    /// Generally retryable after a delay.
    Server,

    /// The backend answered with something this client cannot interpret.
    Client,

    /// The caller asked for something invalid (bad arguments, no account,
    /// unknown conversation).
    User,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
        }
    }

    /// Returns a user-friendly description of the category.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network connectivity issue",
            ErrorCategory::Auth => "Credential problem",
            ErrorCategory::Server => "Backend-side issue",
            ErrorCategory::Client => "Unexpected response",
            ErrorCategory::User => "Invalid request",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_categories() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
        assert!(!ErrorCategory::User.is_retryable());
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(ErrorCategory::Auth.to_string(), "auth");
        assert_eq!(format!("{}", ErrorCategory::Server), "server");
    }
}
