//! Conversation management calls.
//!
//! Each call authorizes with the given account, sends one request and
//! interprets the JSON reply.

use serde_json::Value;
use tracing::debug;

use super::{ChatClient, CONVERSATIONS_PATH, CONVERSATION_PATH};
use crate::auth::AccountKey;
use crate::error::{ChatError, ChatResult};
use crate::models::{ConversationSummary, RenameRequest, TitleRequest, VisibilityRequest};
use crate::traits::HttpClient;

impl<C: HttpClient> ChatClient<C> {
    /// One page of the account's conversations, newest first.
    pub async fn list_conversations(
        &self,
        offset: u32,
        limit: u32,
        account: &AccountKey,
    ) -> ChatResult<Vec<ConversationSummary>> {
        let auth = self.authorize(account)?;
        let url = format!(
            "{}?offset={}&limit={}",
            self.config.endpoint(CONVERSATIONS_PATH),
            offset,
            limit
        );

        let mut document = self.get_json(&url, &auth.header).await?;
        let items = document
            .get_mut("items")
            .map(Value::take)
            .ok_or_else(|| ChatError::MalformedResponse("field missing: items".to_string()))?;

        let conversations: Vec<ConversationSummary> = serde_json::from_value(items)
            .map_err(|e| ChatError::MalformedResponse(format!("invalid items: {e}")))?;
        debug!(count = conversations.len(), "Listed conversations");
        Ok(conversations)
    }

    /// The full document of one conversation, messages included.
    pub async fn conversation(&self, conversation_id: &str, account: &AccountKey) -> ChatResult<Value> {
        let auth = self.authorize(account)?;
        self.get_json(&self.conversation_url(conversation_id), &auth.header)
            .await
    }

    /// Ask the backend to title a conversation from one of its messages.
    ///
    /// Returns whether a title was produced.
    pub async fn generate_title(
        &self,
        conversation_id: &str,
        message_id: &str,
        account: &AccountKey,
    ) -> ChatResult<bool> {
        let auth = self.authorize(account)?;
        let url = self.config.endpoint(&format!(
            "{}/gen_title/{}",
            CONVERSATION_PATH,
            urlencoding::encode(conversation_id)
        ));
        let body = TitleRequest {
            message_id: message_id.to_string(),
            model: self.config.title_model.clone(),
        };

        let reply = self.post_json(&url, &body, &auth.header).await?;
        Ok(reply.get("title").is_some_and(|title| !title.is_null()))
    }

    /// Change a conversation's title.
    pub async fn rename_conversation(
        &self,
        conversation_id: &str,
        title: &str,
        account: &AccountKey,
    ) -> ChatResult<bool> {
        let auth = self.authorize(account)?;
        let body = RenameRequest {
            title: title.to_string(),
        };
        let reply = self
            .patch_json(&self.conversation_url(conversation_id), &body, &auth.header)
            .await?;
        Ok(is_success(&reply))
    }

    /// Hide one conversation.
    pub async fn delete_conversation(
        &self,
        conversation_id: &str,
        account: &AccountKey,
    ) -> ChatResult<bool> {
        let auth = self.authorize(account)?;
        let body = VisibilityRequest::hidden();
        let reply = self
            .patch_json(&self.conversation_url(conversation_id), &body, &auth.header)
            .await?;
        Ok(is_success(&reply))
    }

    /// Hide every conversation of the account.
    pub async fn clear_conversations(&self, account: &AccountKey) -> ChatResult<bool> {
        let auth = self.authorize(account)?;
        let body = VisibilityRequest::hidden();
        let reply = self
            .patch_json(&self.config.endpoint(CONVERSATIONS_PATH), &body, &auth.header)
            .await?;
        Ok(is_success(&reply))
    }
}

fn is_success(reply: &Value) -> bool {
    reply.get("success").and_then(Value::as_bool) == Some(true)
}
