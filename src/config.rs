//! Client configuration.

use std::time::Duration;

use tracing::warn;

/// Default backend root.
pub const DEFAULT_BASE_URL: &str = "https://apps.openai.com/";
/// Default end-to-end request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(360);
pub const DEFAULT_PAID_MODEL: &str = "text-davinci-002-render-paid";
pub const DEFAULT_FREE_MODEL: &str = "text-davinci-002-render-sha";
pub const DEFAULT_TITLE_MODEL: &str = "text-davinci-002-render";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Settings for a [`ChatClient`](crate::client::ChatClient).
///
/// Use the builder pattern to customize.
///
/// # Example
///
/// ```ignore
/// use webchat::config::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_base_url("http://localhost:8080/")
///     .with_timeout(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend root; endpoint paths are appended to it.
    pub base_url: String,
    pub timeout: Duration,
    /// Model requested for paid-tier accounts.
    pub paid_model: String,
    /// Model requested for free-tier accounts.
    pub free_model: String,
    /// Model requested when generating titles.
    pub title_model: String,
    pub accept_language: String,
    /// Sent as `Referer` on exchanges when set.
    pub referer: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            paid_model: DEFAULT_PAID_MODEL.to_string(),
            free_model: DEFAULT_FREE_MODEL.to_string(),
            title_model: DEFAULT_TITLE_MODEL.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            referer: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_paid_model(mut self, model: impl Into<String>) -> Self {
        self.paid_model = model.into();
        self
    }

    pub fn with_free_model(mut self, model: impl Into<String>) -> Self {
        self.free_model = model.into();
        self
    }

    pub fn with_title_model(mut self, model: impl Into<String>) -> Self {
        self.title_model = model.into();
        self
    }

    pub fn with_accept_language(mut self, value: impl Into<String>) -> Self {
        self.accept_language = value.into();
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Model for an account of the given tier.
    pub fn model_for(&self, paid: bool) -> &str {
        if paid {
            &self.paid_model
        } else {
            &self.free_model
        }
    }

    /// Absolute URL of `path` under the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Defaults overridden by `WEBCHAT_BASE_URL`, `WEBCHAT_TIMEOUT_SECS`
    /// and `WEBCHAT_REFERER`.
    ///
    /// An unparseable timeout is logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("WEBCHAT_BASE_URL") {
            if !url.trim().is_empty() {
                config = config.with_base_url(url.trim());
            }
        }

        if let Ok(raw) = std::env::var("WEBCHAT_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config = config.with_timeout(Duration::from_secs(secs)),
                _ => warn!(value = %raw, "Ignoring invalid WEBCHAT_TIMEOUT_SECS"),
            }
        }

        if let Ok(referer) = std::env::var("WEBCHAT_REFERER") {
            if !referer.trim().is_empty() {
                config = config.with_referer(referer.trim());
            }
        }

        config
    }
}
