use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageBody {
    Text { content: String },
    /// References a locally minted playable handle; bytes live in the
    /// session's audio store and are served by the audio route.
    Audio { handle: String, duration_secs: u32 },
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub avatar_id: i64,
    pub sent_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: MessageBody,
}
