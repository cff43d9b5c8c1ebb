use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::models::UserProfile;
use crate::services::user_service;
use crate::web::AppState;

pub async fn user_detail_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<serde_json::Value> {
    let view = user_service::user_detail(&state, &user_id).await;
    Json(json!({ "user": view }))
}

pub async fn friendship_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notices = user_service::toggle_friend(&state, &user_id).await?;
    Ok(Json(json!({ "notices": notices })))
}

#[derive(Debug, Deserialize)]
pub struct RatingBody {
    pub stars: u8,
}

pub async fn rating_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(body): Json<RatingBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notices = user_service::rate_user(&state, &user_id, body.stars).await?;
    Ok(Json(json!({ "notices": notices })))
}

pub async fn profile_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    let profile = user_service::load_profile(&state).await;
    Json(json!({ "profile": profile }))
}

pub async fn update_profile_handler(
    State(state): State<AppState>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notices = user_service::update_profile(&state, profile).await?;
    Ok(Json(json!({ "notices": notices })))
}
