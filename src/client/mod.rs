//! Client for the chat backend.
//!
//! [`ChatClient`] owns the account registry and the transport. Every call
//! authorizes with one registered account, validating its token first, so
//! an unusable account fails before anything is sent.
//!
//! # Module structure
//! - `exchange` - Sending a prompt and assembling the answer
//! - `stream` - Live handle over a streamed answer
//! - `conversations` - Listing, reading, titling and hiding conversations

mod conversations;
mod exchange;
mod stream;

pub use exchange::{Exchange, ExchangeRequest};
pub use stream::{FrameStream, StreamHandle};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::adapters::{RandomPicker, ReqwestHttpClient};
use crate::auth::{token, AccountKey, AccountStore, AuthHeader};
use crate::config::ClientConfig;
use crate::error::{error_for_status, ChatError, ChatResult};
use crate::traits::{AccountPicker, Headers, HttpClient, Response};

pub(crate) const CONVERSATION_PATH: &str = "api/conversation";
pub(crate) const CONVERSATIONS_PATH: &str = "api/conversations";

/// An account that passed token validation for one call.
#[derive(Debug, Clone)]
pub(crate) struct Authorized {
    pub key: AccountKey,
    pub header: AuthHeader,
    pub paid: bool,
}

/// Client for the conversation API.
///
/// Generic over the transport so tests can substitute
/// [`MockHttpClient`](crate::adapters::MockHttpClient).
///
/// # Example
///
/// ```ignore
/// use webchat::client::{ChatClient, ExchangeRequest};
/// use webchat::config::ClientConfig;
///
/// let mut client = ChatClient::new(ClientConfig::from_env())?;
/// client.add_account(token, None, false);
///
/// let first = client.ask(ExchangeRequest::new("Hello")).await?;
/// let second = client
///     .ask(
///         ExchangeRequest::new("And then?")
///             .with_conversation(first.conversation_id)
///             .with_parent(first.parent_id),
///     )
///     .await?;
/// ```
pub struct ChatClient<C: HttpClient = ReqwestHttpClient> {
    http: C,
    config: ClientConfig,
    accounts: AccountStore,
    picker: Box<dyn AccountPicker>,
}

impl ChatClient<ReqwestHttpClient> {
    /// A client over reqwest with `config.timeout` as the request deadline.
    pub fn new(config: ClientConfig) -> ChatResult<Self> {
        let http = ReqwestHttpClient::with_timeout(config.timeout)?;
        Ok(Self::with_http(config, http))
    }
}

impl<C: HttpClient> ChatClient<C> {
    /// A client over a caller-supplied transport.
    pub fn with_http(config: ClientConfig, http: C) -> Self {
        Self {
            http,
            config,
            accounts: AccountStore::new(),
            picker: Box::new(RandomPicker),
        }
    }

    /// Replace the picker used when a call names no account.
    pub fn with_picker(mut self, picker: impl AccountPicker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Register an access token. See [`AccountStore::add_account`].
    pub fn add_account(
        &mut self,
        token: impl Into<String>,
        name: Option<String>,
        paid: bool,
    ) -> AccountKey {
        self.accounts.add_account(token, name, paid)
    }

    /// Authorize with `key`, or with a picked account when `None`.
    pub(crate) fn select_account(&self, key: Option<&AccountKey>) -> ChatResult<Authorized> {
        if let Some(key) = key {
            return self.authorize(key);
        }

        if self.accounts.is_empty() {
            return Err(ChatError::no_account("no accounts registered"));
        }

        let index = self.picker.pick(self.accounts.len());
        let key = self.accounts.key_at(index).cloned().ok_or_else(|| {
            ChatError::no_account(format!(
                "picked index {} of {} accounts",
                index,
                self.accounts.len()
            ))
        })?;
        self.authorize(&key)
    }

    /// Look up `key` and validate its token.
    pub(crate) fn authorize(&self, key: &AccountKey) -> ChatResult<Authorized> {
        let credential = self
            .accounts
            .account(key)
            .ok_or_else(|| ChatError::no_account(format!("unknown account {}", key)))?;

        let header = token::validate(&credential.token)
            .map_err(|e| ChatError::no_account(format!("account {}: {}", key, e)))?;

        Ok(Authorized {
            key: key.clone(),
            header,
            paid: credential.paid,
        })
    }

    fn auth_headers(&self, auth: &AuthHeader) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), auth.as_str().to_string());
        headers
    }

    fn json_headers(&self, auth: &AuthHeader) -> Headers {
        let mut headers = self.auth_headers(auth);
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }

    /// URL of a single conversation.
    fn conversation_url(&self, conversation_id: &str) -> String {
        self.config.endpoint(&format!(
            "{}/{}",
            CONVERSATION_PATH,
            urlencoding::encode(conversation_id)
        ))
    }

    /// `GET` a JSON document.
    async fn get_json(&self, url: &str, auth: &AuthHeader) -> ChatResult<Value> {
        debug!(url = %url, "GET");
        let response = self.http.get(url, &self.auth_headers(auth)).await?;
        parse_json(ensure_success(response)?)
    }

    /// `POST` a JSON body, read a JSON document.
    async fn post_json<B: Serialize>(&self, url: &str, body: &B, auth: &AuthHeader) -> ChatResult<Value> {
        debug!(url = %url, "POST");
        let body = to_body(body)?;
        let response = self.http.post(url, &body, &self.json_headers(auth)).await?;
        parse_json(ensure_success(response)?)
    }

    /// `PATCH` a JSON body, read a JSON document.
    async fn patch_json<B: Serialize>(&self, url: &str, body: &B, auth: &AuthHeader) -> ChatResult<Value> {
        debug!(url = %url, "PATCH");
        let body = to_body(body)?;
        let response = self.http.patch(url, &body, &self.json_headers(auth)).await?;
        parse_json(ensure_success(response)?)
    }
}

/// Turn a non-2xx response into an error: a recognized backend error
/// when the body carries one, otherwise the raw status.
pub(crate) fn ensure_success(response: Response) -> ChatResult<Response> {
    if response.is_success() {
        return Ok(response);
    }
    let body = String::from_utf8_lossy(&response.body);
    Err(error_for_status(response.status, &body))
}

pub(crate) fn to_body<B: Serialize>(body: &B) -> ChatResult<String> {
    serde_json::to_string(body)
        .map_err(|e| ChatError::InvalidArgument(format!("unserializable request: {e}")))
}

fn parse_json(response: Response) -> ChatResult<Value> {
    response
        .json()
        .map_err(|_| ChatError::MalformedResponse("response is not json".to_string()))
}
