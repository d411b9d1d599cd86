use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use lambda_http::tracing::{debug, error};

use crate::{
    error::ApiError,
    middleware::{
        auth::{cleared_session_cookie, resolve_identity, session_cookie},
        route::public_route,
    },
    state::AppState,
};
use shared::datastore::Connection;
use shared::models::auth::requests::LoginRequest;
use shared::models::auth::responses::{LoginResponse, MessageResponse, SessionResponse};
use shared::services::auth_service::AuthService;

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", public_route(post(login), state))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
}

async fn login(
    State(state): State<AppState>,
    Extension(connection): Extension<Connection>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let Json(login_data) = payload?;

    let session = AuthService::new(connection.admins, state.tokens.clone())
        .login(&login_data)
        .await
        .map_err(|e| {
            error!("Failed to authenticate admin: {}", e);
            ApiError::from(e)
        })?;

    let jar = jar.add(session_cookie(session.token, state.secure_cookies));
    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            user: session.identity,
        }),
    ))
}

async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    debug!("Clearing session cookie");
    (
        jar.add(cleared_session_cookie(state.secure_cookies)),
        Json(MessageResponse::new("Logged out successfully")),
    )
}

async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionResponse>, ApiError> {
    resolve_identity(&headers, &state.tokens)
        .map(|user| Json(SessionResponse { user }))
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}
