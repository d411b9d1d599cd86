use axum::{
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use error::ApiError;
use state::AppState;

/// Build the full application router.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::auth::routes(&state))
        .merge(routes::articles::routes(&state))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the club website. Credentials are allowed so the session cookie travels.
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(origin)?)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Render a handler panic as the generic 500 body.
pub fn handle_panic(_payload: Box<dyn Any + Send + 'static>) -> Response {
    lambda_http::tracing::error!("Handler panicked");
    ApiError::Unknown { message: None }.into_response()
}
