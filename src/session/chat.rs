use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{ChatMessage, MessageBody};

pub const WELCOME_TEXT: &str = "Välkommen till gruppen!";

/// Per-conversation append-only message logs, plus the byte store backing
/// audio message handles. Ordering is per-channel call order only.
#[derive(Debug, Default)]
pub struct ChatChannelStore {
    channels: HashMap<String, Vec<ChatMessage>>,
    audio: HashMap<String, Vec<u8>>,
}

impl ChatChannelStore {
    /// Seeds a single system welcome message on first call for an id;
    /// a no-op thereafter. Returns true when the channel was created.
    pub fn ensure_channel(&mut self, conversation_id: &str, now: DateTime<Utc>) -> bool {
        if self.channels.contains_key(conversation_id) {
            return false;
        }
        let welcome = ChatMessage {
            id: "welcome".to_string(),
            sender_id: "system".to_string(),
            sender_name: "System".to_string(),
            avatar_id: 0,
            sent_at: now,
            body: MessageBody::Text {
                content: WELCOME_TEXT.to_string(),
            },
        };
        self.channels
            .insert(conversation_id.to_string(), vec![welcome]);
        true
    }

    /// Appends in call order. Creates an empty channel lazily when the id has
    /// never been provisioned (direct conversations start without a welcome).
    pub fn append(&mut self, conversation_id: &str, message: ChatMessage) {
        self.channels
            .entry(conversation_id.to_string())
            .or_default()
            .push(message);
    }

    pub fn messages(&self, conversation_id: &str) -> &[ChatMessage] {
        self.channels
            .get(conversation_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mints a playable handle for uploaded audio bytes.
    pub fn store_audio(&mut self, bytes: Vec<u8>) -> String {
        let handle = Uuid::new_v4().to_string();
        self.audio.insert(handle.clone(), bytes);
        handle
    }

    pub fn audio(&self, handle: &str) -> Option<&[u8]> {
        self.audio.get(handle).map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        self.channels.clear();
        self.audio.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn text(id: &str, content: &str, secs: i64) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            sender_id: "me".to_string(),
            sender_name: "Test".to_string(),
            avatar_id: 1,
            sent_at: at(secs),
            body: MessageBody::Text {
                content: content.to_string(),
            },
        }
    }

    #[test]
    fn ensure_channel_seeds_one_welcome_and_is_idempotent() {
        let mut store = ChatChannelStore::default();
        assert!(store.ensure_channel("1", at(0)));
        assert!(!store.ensure_channel("1", at(1)));
        let messages = store.messages("1");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender_id, "system");
        assert_eq!(
            messages[0].body,
            MessageBody::Text {
                content: WELCOME_TEXT.to_string()
            }
        );
    }

    #[test]
    fn append_preserves_call_order() {
        let mut store = ChatChannelStore::default();
        store.ensure_channel("1", at(0));
        store.append("1", text("a", "först", 1));
        store.append("1", text("b", "sedan", 2));
        let ids: Vec<&str> = store.messages("1").iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["welcome", "a", "b"]);
    }

    #[test]
    fn append_to_an_unprovisioned_channel_creates_it_without_welcome() {
        let mut store = ChatChannelStore::default();
        store.append("dm_me_u2", text("a", "hej", 0));
        assert_eq!(store.messages("dm_me_u2").len(), 1);
    }

    #[test]
    fn audio_bytes_are_retrievable_by_handle() {
        let mut store = ChatChannelStore::default();
        let handle = store.store_audio(vec![1, 2, 3]);
        assert_eq!(store.audio(&handle), Some(&[1u8, 2, 3][..]));
        assert!(store.audio("missing").is_none());
    }
}
