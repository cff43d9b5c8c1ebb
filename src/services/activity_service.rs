use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::database::activities_repo;
use crate::error::AppError;
use crate::fixtures;
use crate::models::{Coordinates, GroupActivity, Participant};
use crate::session::{Action, Notice, Session};
use crate::web::AppState;

/// One tile in the activity catalog, with the local membership flags the
/// card buttons switch on.
#[derive(Debug, Serialize)]
pub struct ActivityCardView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub time: String,
    pub duration_min: i64,
    pub location_name: String,
    pub location_city: String,
    pub coordinates: Coordinates,
    pub host: Participant,
    pub current_participants: i64,
    pub max_participants: i64,
    pub skill_level: String,
    pub join_policy: String,
    pub is_joined: bool,
    pub is_applied: bool,
}

pub fn build_cards(session: &Session, category: Option<&str>) -> Vec<ActivityCardView> {
    session
        .groups(category)
        .into_iter()
        .map(|g| ActivityCardView {
            id: g.id.clone(),
            title: g.title.clone(),
            description: g.description.clone(),
            category: g.category.clone(),
            date: g.date.clone(),
            time: g.time.clone(),
            duration_min: g.duration_min,
            location_name: g.location_name.clone(),
            location_city: g.location_city.clone(),
            coordinates: g.coordinates,
            host: g.host.clone(),
            current_participants: g.current_participants,
            max_participants: g.max_participants,
            skill_level: g.skill_level.clone(),
            join_policy: g.join_policy.as_str().to_string(),
            is_joined: session.membership().is_joined(&g.id),
            is_applied: session.membership().is_applied(&g.id),
        })
        .collect()
}

/// Loads the persisted catalog; seeds the fixture set first when the table
/// is empty.
pub async fn load_directory(pool: &SqlitePool) -> sqlx::Result<Vec<GroupActivity>> {
    let rows = activities_repo::list_activities(pool).await?;
    if !rows.is_empty() {
        return Ok(rows.into_iter().map(|r| r.into_group()).collect());
    }

    let seeded = seed_fixtures(pool).await?;
    info!("seeded {} fixture activities", seeded);
    let rows = activities_repo::list_activities(pool).await?;
    Ok(rows.into_iter().map(|r| r.into_group()).collect())
}

pub async fn seed_fixtures(pool: &SqlitePool) -> sqlx::Result<usize> {
    let catalog = fixtures::catalog();
    let mut inserted = 0;
    for activity in &catalog {
        inserted += activities_repo::insert_activity(pool, activity).await? as usize;
    }
    Ok(inserted)
}

/// Persists first, then mutates local state; a persistence failure leaves
/// the session untouched for a manual retry.
pub async fn create_activity(
    state: &AppState,
    mut activity: GroupActivity,
) -> Result<Vec<Notice>, AppError> {
    if activity.id.trim().is_empty() {
        activity.id = Uuid::new_v4().to_string();
    }
    activities_repo::insert_activity(&state.pool, &activity).await?;

    let mut session = state.session.lock().await;
    session.apply(
        Action::AddActivity {
            activity,
            auto_join: true,
        },
        Utc::now(),
    )
}

pub async fn disband_activity(state: &AppState, activity_id: &str) -> Result<Vec<Notice>, AppError> {
    activities_repo::delete_activity(&state.pool, activity_id).await?;

    let mut session = state.session.lock().await;
    session.apply(
        Action::RemoveActivity {
            activity_id: activity_id.to_string(),
        },
        Utc::now(),
    )
}
