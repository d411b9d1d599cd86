use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use lambda_http::tracing::debug;
use time::{Duration, OffsetDateTime};

use crate::{error::ApiError, state::AppState};
use shared::models::auth::claims::{IdentityClaims, TOKEN_TTL_SECONDS};
use shared::services::token_service::TokenService;

pub const SESSION_COOKIE: &str = "token";

/// Identity carried by the request's session cookie, if any.
///
/// Missing cookie, bad token and unconfigured secret all yield `None`.
pub fn resolve_identity(headers: &HeaderMap, tokens: &TokenService) -> Option<IdentityClaims> {
    let jar = CookieJar::from_headers(headers);
    let token = jar
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default();
    tokens.verify(&token)
}

pub fn is_admin(headers: &HeaderMap, tokens: &TokenService) -> bool {
    resolve_identity(headers, tokens).is_some_and(|identity| identity.role.is_admin_equivalent())
}

/// Admin gate for [`admin_route`](super::route::admin_route). Runs before any datastore work.
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !is_admin(request.headers(), &state.tokens) {
        debug!(path = %request.uri().path(), "Admin access denied");
        return ApiError::AdminAccessRequired.into_response();
    }
    next.run(request).await
}

/// The admin behind the current request. Only meaningful on admin routes.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub identity: IdentityClaims,
}

impl FromRequestParts<AppState> for AuthenticatedAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve_identity(&parts.headers, &state.tokens) {
            Some(identity) if identity.role.is_admin_equivalent() => {
                Ok(AuthenticatedAdmin { identity })
            }
            _ => Err(ApiError::AdminAccessRequired),
        }
    }
}

pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::seconds(TOKEN_TTL_SECONDS))
        .build()
}

pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}
