use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use geosporty::database::{activities_repo, current_user_repo};
use geosporty::models::LOCAL_USER_ID;
use geosporty::services::activity_service;
use geosporty::session::Session;
use geosporty::web::middleware::auth as auth_middleware;
use geosporty::web::routes::{activities, activity, chats, dev, user};
use geosporty::web::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    // 2. Connect to the database
    let db_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://geosporty.db?mode=rwc".to_string());
    println!("Connecting to database: {}", db_url);

    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("cannot connect to database");

    activities_repo::ensure_schema(&pool)
        .await
        .expect("activities schema");
    current_user_repo::ensure_schema(&pool)
        .await
        .expect("current_user schema");

    // 3. Load the directory into the local session (seeds fixtures if empty)
    let groups = activity_service::load_directory(&pool)
        .await
        .expect("cannot load activity directory");
    let mut session = Session::new(LOCAL_USER_ID);
    session.load_groups(groups);

    let state = AppState::new(pool, session);

    // 4. Protected routes under one middleware layer
    let protected_routes = Router::new()
        .route(
            "/activities",
            get(activities::activities_handler).post(activities::create_activity_handler),
        )
        .route(
            "/activities/:activity_id",
            delete(activities::disband_activity_handler),
        )
        .route("/activities/:activity_id/join", post(activity::join_handler))
        .route(
            "/activities/:activity_id/cancel-application",
            post(activity::cancel_application_handler),
        )
        .route("/activities/:activity_id/leave", post(activity::leave_handler))
        .route("/groups", get(activities::groups_handler))
        .route("/chats/direct", post(chats::open_direct_chat_handler))
        .route("/chats/:conversation_id", get(chats::conversation_handler))
        .route(
            "/chats/:conversation_id/messages",
            post(chats::send_message_handler),
        )
        .route(
            "/chats/:conversation_id/audio",
            post(chats::send_audio_handler),
        )
        .route("/audio/:handle", get(chats::audio_handler))
        .route("/users/:user_id", get(user::user_detail_handler))
        .route("/users/:user_id/friendship", post(user::friendship_handler))
        .route("/users/:user_id/rating", post(user::rating_handler))
        .route(
            "/profile",
            get(user::profile_handler).put(user::update_profile_handler),
        )
        .route("/dev/reset", post(dev::reset_handler))
        .route("/dev/seed", post(dev::seed_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ));

    // 5. Build the whole application
    let app = Router::new()
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state);

    // 6. Start the server (with fallback port)
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("cannot parse host/port");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "could not bind {}: {}. trying fallback {}:{}",
                addr,
                e,
                host,
                port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("cannot parse fallback");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("cannot bind fallback port")
        }
    };

    let bound_addr = listener.local_addr().expect("local addr");
    println!("Server running on http://{}", bound_addr);

    axum::serve(listener, app).await.expect("server error");
}
