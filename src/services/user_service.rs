use chrono::Utc;
use serde::Serialize;

use crate::error::AppError;
use crate::models::{Participant, UserProfile};
use crate::session::{Action, Notice};
use crate::web::AppState;

#[derive(Debug, Serialize)]
pub struct UserDetailView {
    #[serde(flatten)]
    pub participant: Participant,
    pub is_friend: bool,
    pub rating: u8,
}

pub async fn user_detail(state: &AppState, user_id: &str) -> UserDetailView {
    let session = state.session.lock().await;
    UserDetailView {
        participant: session.resolve_participant(user_id),
        is_friend: session.is_friend(user_id),
        rating: session.rating(user_id).unwrap_or(0),
    }
}

pub async fn toggle_friend(state: &AppState, user_id: &str) -> Result<Vec<Notice>, AppError> {
    let mut session = state.session.lock().await;
    session.apply(
        Action::ToggleFriend {
            user_id: user_id.to_string(),
        },
        Utc::now(),
    )
}

pub async fn rate_user(state: &AppState, user_id: &str, stars: u8) -> Result<Vec<Notice>, AppError> {
    let mut session = state.session.lock().await;
    session.apply(
        Action::RateUser {
            user_id: user_id.to_string(),
            stars,
        },
        Utc::now(),
    )
}

pub async fn load_profile(state: &AppState) -> UserProfile {
    let session = state.session.lock().await;
    session.profile().clone()
}

pub async fn update_profile(state: &AppState, profile: UserProfile) -> Result<Vec<Notice>, AppError> {
    let mut session = state.session.lock().await;
    session.apply(Action::UpdateProfile { profile }, Utc::now())
}
