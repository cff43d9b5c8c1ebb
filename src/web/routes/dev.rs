use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::json;

use crate::error::AppError;
use crate::services::activity_service;
use crate::session::Action;
use crate::web::AppState;

/// Dev panel: clears directory, membership, chats and social annotations.
/// The profile and an active cooldown survive a reset.
pub async fn reset_handler(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let mut session = state.session.lock().await;
    let notices = session.apply(Action::Reset, Utc::now())?;
    Ok(Json(json!({ "notices": notices })))
}

/// Dev panel: reloads the fixture catalog into the directory.
pub async fn seed_handler(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let groups = activity_service::load_directory(&state.pool).await?;
    let count = groups.len();

    let mut session = state.session.lock().await;
    session.apply(Action::Reset, Utc::now())?;
    session.load_groups(groups);
    Ok(Json(json!({ "loaded": count })))
}
