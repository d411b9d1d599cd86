use axum::http::StatusCode;

/// Liveness probe. Never touches the datastore.
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "Healthy!")
}
