pub mod middleware;
pub mod routes;

use std::sync::Arc;

use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::session::Session;

/// Shared application state. The session mutex serializes every state
/// transition, which is what gives the single-threaded event-loop semantics
/// of the core its atomicity.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(pool: SqlitePool, session: Session) -> Self {
        Self {
            pool,
            session: Arc::new(Mutex::new(session)),
        }
    }
}
