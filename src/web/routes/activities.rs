use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;
use crate::models::GroupActivity;
use crate::services::activity_service;
use crate::session::Notice;
use crate::web::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct ActivitiesQuery {
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
struct GroupMembershipView {
    conversation_id: String,
    title: String,
    kind: &'static str,
}

pub async fn activities_handler(
    State(state): State<AppState>,
    Query(query): Query<ActivitiesQuery>,
) -> impl IntoResponse {
    let session = state.session.lock().await;
    let cards = activity_service::build_cards(&session, query.category.as_deref());
    Json(json!({ "activities": cards }))
}

pub async fn create_activity_handler(
    State(state): State<AppState>,
    Json(activity): Json<GroupActivity>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notices = activity_service::create_activity(&state, activity).await?;
    let activity_id = notices.iter().find_map(|n| match n {
        Notice::ActivityCreated { activity_id } => Some(activity_id.clone()),
        _ => None,
    });
    Ok(Json(json!({ "activity_id": activity_id, "notices": notices })))
}

pub async fn disband_activity_handler(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notices = activity_service::disband_activity(&state, &activity_id).await?;
    Ok(Json(json!({ "notices": notices })))
}

/// "Mina grupper": everything the local user is joined to, group or direct.
pub async fn groups_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session.lock().await;
    let groups: Vec<GroupMembershipView> = session
        .joined_entries()
        .into_iter()
        .map(|entry| GroupMembershipView {
            conversation_id: entry.id().to_string(),
            title: entry.conversation_title(),
            kind: match entry.as_group() {
                Some(_) => "group",
                None => "direct",
            },
        })
        .collect();
    Json(json!({ "groups": groups }))
}
