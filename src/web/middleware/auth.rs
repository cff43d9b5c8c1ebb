use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

use crate::database::current_user_repo;
use crate::models::LOCAL_USER_ID;
use crate::web::AppState;

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: String,
}

#[derive(Deserialize)]
struct JwtPayload {
    sub: String,
}

/// Identity collaborator: a cookie-borne JWT when present, the current_user
/// table for offline setups, and finally the local session id. Verification
/// of the token is the auth provider's job, not ours.
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split("; ")
                .find(|c| c.starts_with("access_token="))
                .and_then(|c| c.strip_prefix("access_token="))
        });

    if let Some(token) = token {
        // Parse JWT payload (middle part)
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() == 3 {
            if let Ok(payload_bytes) = general_purpose::URL_SAFE_NO_PAD.decode(parts[1]) {
                if let Ok(payload) = serde_json::from_slice::<JwtPayload>(&payload_bytes) {
                    request
                        .extensions_mut()
                        .insert(AuthenticatedUser { id: payload.sub });
                    return next.run(request).await;
                }
            }
        }
    }

    // Offline/local fallback: the current_user table, then the fixed local id.
    let user_id = current_user_repo::load_current_user_id(&state.pool)
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| LOCAL_USER_ID.to_string());

    request.extensions_mut().insert(AuthenticatedUser { id: user_id });
    next.run(request).await
}
