mod conversation;
mod message;
mod request;
mod result;

pub use conversation::ConversationSummary;
pub use message::{Message, MessageContent, Role};
pub use request::{ConversationRequest, RenameRequest, TitleRequest, VisibilityRequest};
pub use result::ExchangeResult;
