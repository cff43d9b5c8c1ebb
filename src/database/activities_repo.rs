use sqlx::SqlitePool;

use crate::models::{ActivityRow, GroupActivity};

const SQL_CREATE_ACTIVITIES: &str = r#"
CREATE TABLE IF NOT EXISTS activities (
  activity_id TEXT PRIMARY KEY,
  host_user_id TEXT NOT NULL,
  host_name TEXT NOT NULL,
  host_avatar_id INTEGER NOT NULL DEFAULT 1,
  title TEXT NOT NULL,
  description TEXT NOT NULL DEFAULT '',
  category TEXT NOT NULL,
  date TEXT NOT NULL,
  time TEXT NOT NULL,
  duration_min INTEGER NOT NULL DEFAULT 60,
  location_name TEXT NOT NULL DEFAULT '',
  location_city TEXT NOT NULL DEFAULT '',
  latitude REAL NOT NULL,
  longitude REAL NOT NULL,
  current_participants INTEGER NOT NULL DEFAULT 0,
  max_participants INTEGER NOT NULL DEFAULT 0,
  skill_level TEXT NOT NULL DEFAULT '',
  join_policy TEXT NOT NULL DEFAULT 'open',
  access_code TEXT
)
"#;

pub const SQL_LIST_ACTIVITIES: &str = r#"
SELECT
  activity_id,
  host_user_id,
  host_name,
  host_avatar_id,
  title,
  description,
  category,
  date,
  time,
  duration_min,
  location_name,
  location_city,
  latitude,
  longitude,
  current_participants,
  max_participants,
  skill_level,
  join_policy,
  access_code
FROM activities
ORDER BY rowid
"#;

const SQL_INSERT_ACTIVITY: &str = r#"
INSERT INTO activities (
  activity_id,
  host_user_id,
  host_name,
  host_avatar_id,
  title,
  description,
  category,
  date,
  time,
  duration_min,
  location_name,
  location_city,
  latitude,
  longitude,
  current_participants,
  max_participants,
  skill_level,
  join_policy,
  access_code
) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

const SQL_DELETE_ACTIVITY: &str = r#"
DELETE FROM activities WHERE activity_id = ?
"#;

pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(SQL_CREATE_ACTIVITIES).execute(pool).await?;
    Ok(())
}

pub async fn list_activities(pool: &SqlitePool) -> sqlx::Result<Vec<ActivityRow>> {
    sqlx::query_as::<_, ActivityRow>(SQL_LIST_ACTIVITIES)
        .fetch_all(pool)
        .await
}

pub async fn insert_activity(pool: &SqlitePool, activity: &GroupActivity) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_ACTIVITY)
        .bind(&activity.id)
        .bind(&activity.host.id)
        .bind(&activity.host.name)
        .bind(activity.host.avatar_id)
        .bind(&activity.title)
        .bind(&activity.description)
        .bind(&activity.category)
        .bind(&activity.date)
        .bind(&activity.time)
        .bind(activity.duration_min)
        .bind(&activity.location_name)
        .bind(&activity.location_city)
        .bind(activity.coordinates.lat)
        .bind(activity.coordinates.lng)
        .bind(activity.current_participants)
        .bind(activity.max_participants)
        .bind(&activity.skill_level)
        .bind(activity.join_policy.as_str())
        .bind(activity.access_code.as_deref())
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

pub async fn delete_activity(pool: &SqlitePool, activity_id: &str) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_ACTIVITY)
        .bind(activity_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
