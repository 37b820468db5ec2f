use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of `GET /api/conversations`.
///
/// Fields other than the ones named here are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
