//! The error type returned by every client operation.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Closed set of failures a client operation can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChatError {
    /// The token is not a three-segment token with a JSON claims segment,
    /// or the backend rejected it.
    #[error("invalid credential: {reason}")]
    InvalidCredential { reason: String },

    /// The token's `exp` claim lies in the past.
    #[error("credential expired at {expired_at}")]
    CredentialExpired { expired_at: i64 },

    /// No registered account could be used for the call.
    #[error("no account available: {reason}")]
    NoAccountAvailable { reason: String },

    /// The caller passed an inconsistent combination of arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request could not be sent or its body could not be read.
    #[error("transport failure: {0}")]
    Transport(#[from] HttpError),

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("conversation not found")]
    ConversationNotFound,

    #[error("something went wrong, please try reloading the conversation")]
    BackendTransient,

    #[error("backend internal server error")]
    BackendInternal,

    /// A body that had to be JSON was not, or lacked a required field.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ChatError {
    /// Shorthand for an [`ChatError::InvalidCredential`].
    pub fn invalid_credential(reason: impl Into<String>) -> Self {
        ChatError::InvalidCredential {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`ChatError::NoAccountAvailable`].
    pub fn no_account(reason: impl Into<String>) -> Self {
        ChatError::NoAccountAvailable {
            reason: reason.into(),
        }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::InvalidCredential { .. } | ChatError::CredentialExpired { .. } => {
                ErrorCategory::Auth
            }
            ChatError::NoAccountAvailable { .. }
            | ChatError::InvalidArgument(_)
            | ChatError::ConversationNotFound => ErrorCategory::User,
            ChatError::Transport(HttpError::ServerError { status, .. }) if *status < 500 => {
                ErrorCategory::Client
            }
            ChatError::Transport(HttpError::ServerError { .. }) => ErrorCategory::Server,
            ChatError::Transport(_) => ErrorCategory::Network,
            ChatError::RateLimited | ChatError::BackendTransient | ChatError::BackendInternal => {
                ErrorCategory::Server
            }
            ChatError::MalformedResponse(_) => ErrorCategory::Client,
        }
    }

    /// Whether repeating the same call later may succeed.
    ///
    /// Only a hint: nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChatError::Transport(HttpError::InvalidUrl(_)) => false,
            ChatError::Transport(HttpError::ServerError { status, .. }) => {
                *status >= 500 || *status == 429 || *status == 408
            }
            other => other.category().is_retryable(),
        }
    }

    /// Whether the caller needs a fresh token before trying again.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            ChatError::InvalidCredential { .. }
                | ChatError::CredentialExpired { .. }
                | ChatError::Transport(HttpError::ServerError { status: 401, .. })
        )
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::InvalidCredential { .. } => "E_AUTH_INVALID",
            ChatError::CredentialExpired { .. } => "E_AUTH_EXPIRED",
            ChatError::NoAccountAvailable { .. } => "E_NO_ACCOUNT",
            ChatError::InvalidArgument(_) => "E_ARG",
            ChatError::Transport(_) => "E_TRANSPORT",
            ChatError::RateLimited => "E_RATE",
            ChatError::ConversationNotFound => "E_CONV_NOT_FOUND",
            ChatError::BackendTransient => "E_BACKEND_TRANSIENT",
            ChatError::BackendInternal => "E_BACKEND_INTERNAL",
            ChatError::MalformedResponse(_) => "E_MALFORMED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(
            ChatError::invalid_credential("bad").category(),
            ErrorCategory::Auth
        );
        assert_eq!(
            ChatError::CredentialExpired { expired_at: 1 }.category(),
            ErrorCategory::Auth
        );
        assert_eq!(ChatError::no_account("empty").category(), ErrorCategory::User);
        assert_eq!(ChatError::RateLimited.category(), ErrorCategory::Server);
        assert_eq!(
            ChatError::Transport(HttpError::Timeout("360s".into())).category(),
            ErrorCategory::Network
        );
        assert_eq!(
            ChatError::Transport(HttpError::ServerError {
                status: 404,
                message: String::new()
            })
            .category(),
            ErrorCategory::Client
        );
        assert_eq!(
            ChatError::MalformedResponse("x".into()).category(),
            ErrorCategory::Client
        );
    }

    #[test]
    fn test_retry_hints() {
        assert!(ChatError::RateLimited.is_retryable());
        assert!(ChatError::BackendInternal.is_retryable());
        assert!(ChatError::Transport(HttpError::Io("reset".into())).is_retryable());
        assert!(ChatError::Transport(HttpError::ServerError {
            status: 429,
            message: String::new()
        })
        .is_retryable());
        assert!(!ChatError::Transport(HttpError::InvalidUrl("x".into())).is_retryable());
        assert!(!ChatError::InvalidArgument("x".into()).is_retryable());
        assert!(!ChatError::ConversationNotFound.is_retryable());
    }

    #[test]
    fn test_requires_reauth() {
        assert!(ChatError::invalid_credential("invalid_token").requires_reauth());
        assert!(ChatError::CredentialExpired { expired_at: 0 }.requires_reauth());
        assert!(ChatError::Transport(HttpError::ServerError {
            status: 401,
            message: String::new()
        })
        .requires_reauth());
        assert!(!ChatError::RateLimited.requires_reauth());
    }

    #[test]
    fn test_from_http_error() {
        let err: ChatError = HttpError::ConnectionFailed("refused".into()).into();
        assert!(matches!(err, ChatError::Transport(_)));
        assert_eq!(err.error_code(), "E_TRANSPORT");
        assert!(err.to_string().contains("refused"));
    }
}
