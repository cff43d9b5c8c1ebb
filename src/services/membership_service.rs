use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::AppError;
use crate::session::{Action, Notice};
use crate::web::AppState;

/// Routes a join request by the activity's policy and, for applications,
/// schedules the delayed auto-approval.
pub async fn request_join(
    state: &AppState,
    activity_id: &str,
    access_code: Option<String>,
) -> Result<Vec<Notice>, AppError> {
    let notices = {
        let mut session = state.session.lock().await;
        session.apply(
            Action::RequestJoin {
                activity_id: activity_id.to_string(),
                access_code,
            },
            Utc::now(),
        )?
    };

    for notice in &notices {
        if let Notice::ApplicationSent {
            activity_id,
            resolve_at,
        } = notice
        {
            schedule_resolution(state.clone(), activity_id.clone(), *resolve_at);
        }
    }

    Ok(notices)
}

/// The scheduled-event half of the application flow. The action applied at
/// fire time checks the applied set itself, so a cancellation that lands
/// first always wins.
fn schedule_resolution(state: AppState, activity_id: String, resolve_at: DateTime<Utc>) {
    tokio::spawn(async move {
        let wait = (resolve_at - Utc::now()).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        let mut session = state.session.lock().await;
        match session.apply(
            Action::ResolveApplication {
                activity_id: activity_id.clone(),
            },
            Utc::now(),
        ) {
            Ok(notices) if notices.is_empty() => {
                info!(activity_id = %activity_id, "application was cancelled before approval");
            }
            Ok(_) => {}
            Err(e) => warn!(activity_id = %activity_id, "application resolution failed: {}", e),
        }
    });
}

pub async fn cancel_application(state: &AppState, activity_id: &str) -> Result<Vec<Notice>, AppError> {
    let mut session = state.session.lock().await;
    session.apply(
        Action::CancelApplication {
            activity_id: activity_id.to_string(),
        },
        Utc::now(),
    )
}

pub async fn leave_activity(state: &AppState, activity_id: &str) -> Result<Vec<Notice>, AppError> {
    let mut session = state.session.lock().await;
    session.apply(
        Action::Leave {
            activity_id: activity_id.to_string(),
        },
        Utc::now(),
    )
}
