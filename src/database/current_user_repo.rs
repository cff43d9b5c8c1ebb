use sqlx::SqlitePool;

const SQL_CREATE_CURRENT_USER: &str = r#"
CREATE TABLE IF NOT EXISTS current_user (
  user_id TEXT PRIMARY KEY
)
"#;

const SQL_LOAD_CURRENT_USER: &str = r#"
SELECT user_id FROM current_user LIMIT 1
"#;

pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(SQL_CREATE_CURRENT_USER).execute(pool).await?;
    Ok(())
}

/// Offline/local fallback identity when no token is presented.
pub async fn load_current_user_id(pool: &SqlitePool) -> sqlx::Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as(SQL_LOAD_CURRENT_USER)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|(user_id,)| user_id))
}
