use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::services::chat_service;
use crate::session::Notice;
use crate::web::middleware::auth::AuthenticatedUser;
use crate::web::AppState;

pub async fn conversation_handler(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let view = chat_service::conversation(&state, &conversation_id)
        .await
        .ok_or(AppError::NotFound(conversation_id))?;
    Ok(Json(json!({ "conversation": view })))
}

#[derive(Debug, Deserialize)]
pub struct SendMessageBody {
    pub content: String,
}

pub async fn send_message_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(conversation_id): Path<String>,
    Json(body): Json<SendMessageBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notices = chat_service::send_text(&state, &conversation_id, &user.id, body.content).await?;
    Ok(Json(json!({ "notices": notices })))
}

#[derive(Debug, Deserialize)]
pub struct SendAudioQuery {
    pub duration_secs: u32,
}

pub async fn send_audio_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(conversation_id): Path<String>,
    Query(query): Query<SendAudioQuery>,
    bytes: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let notices = chat_service::send_audio(
        &state,
        &conversation_id,
        &user.id,
        bytes.to_vec(),
        query.duration_secs,
    )
    .await?;
    Ok(Json(json!({ "notices": notices })))
}

/// Serves stored audio bytes by their minted handle.
pub async fn audio_handler(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Response, StatusCode> {
    let bytes = chat_service::audio_bytes(&state, &handle)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "audio/webm")
        .header("Cache-Control", "no-store")
        .body(axum::body::Body::from(bytes))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

#[derive(Debug, Deserialize)]
pub struct DirectChatBody {
    pub user_id: String,
}

pub async fn open_direct_chat_handler(
    State(state): State<AppState>,
    Json(body): Json<DirectChatBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notices = chat_service::open_direct_chat(&state, &body.user_id).await?;
    let conversation_id = notices.iter().find_map(|n| match n {
        Notice::DirectChatReady { conversation_id } => Some(conversation_id.clone()),
        _ => None,
    });
    Ok(Json(json!({ "conversation_id": conversation_id, "notices": notices })))
}
