use chrono::Utc;
use serde::Serialize;

use crate::error::AppError;
use crate::models::ChatMessage;
use crate::session::{Action, Notice};
use crate::web::AppState;

#[derive(Debug, Serialize)]
pub struct ConversationView {
    pub conversation_id: String,
    pub title: String,
    pub kind: &'static str,
    pub messages: Vec<ChatMessage>,
}

pub async fn conversation(state: &AppState, conversation_id: &str) -> Option<ConversationView> {
    let session = state.session.lock().await;
    let entry = session.entry(conversation_id)?;
    Some(ConversationView {
        conversation_id: conversation_id.to_string(),
        title: entry.conversation_title(),
        kind: match entry.as_group() {
            Some(_) => "group",
            None => "direct",
        },
        messages: session.chats().messages(conversation_id).to_vec(),
    })
}

pub async fn send_text(
    state: &AppState,
    conversation_id: &str,
    sender_id: &str,
    content: String,
) -> Result<Vec<Notice>, AppError> {
    let mut session = state.session.lock().await;
    session.apply(
        Action::SendText {
            conversation_id: conversation_id.to_string(),
            sender_id: sender_id.to_string(),
            content,
        },
        Utc::now(),
    )
}

pub async fn send_audio(
    state: &AppState,
    conversation_id: &str,
    sender_id: &str,
    bytes: Vec<u8>,
    duration_secs: u32,
) -> Result<Vec<Notice>, AppError> {
    let mut session = state.session.lock().await;
    session.apply(
        Action::SendAudio {
            conversation_id: conversation_id.to_string(),
            sender_id: sender_id.to_string(),
            bytes,
            duration_secs,
        },
        Utc::now(),
    )
}

pub async fn audio_bytes(state: &AppState, handle: &str) -> Option<Vec<u8>> {
    let session = state.session.lock().await;
    session.chats().audio(handle).map(<[u8]>::to_vec)
}

pub async fn open_direct_chat(
    state: &AppState,
    target_user_id: &str,
) -> Result<Vec<Notice>, AppError> {
    let mut session = state.session.lock().await;
    session.apply(
        Action::OpenDirectChat {
            target_user_id: target_user_id.to_string(),
        },
        Utc::now(),
    )
}
