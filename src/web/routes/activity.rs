use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::services::membership_service;
use crate::web::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct JoinRequestBody {
    pub access_code: Option<String>,
}

pub async fn join_handler(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
    body: Option<Json<JoinRequestBody>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let access_code = body.and_then(|Json(b)| b.access_code);
    let notices = membership_service::request_join(&state, &activity_id, access_code).await?;
    Ok(Json(json!({ "notices": notices })))
}

pub async fn cancel_application_handler(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notices = membership_service::cancel_application(&state, &activity_id).await?;
    Ok(Json(json!({ "notices": notices })))
}

pub async fn leave_handler(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notices = membership_service::leave_activity(&state, &activity_id).await?;
    Ok(Json(json!({ "notices": notices })))
}
