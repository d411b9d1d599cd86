//! Route wrappers shared by every resource handler.
//!
//! `public_route` guarantees the handler runs with a connected datastore,
//! available as `Extension<Connection>`. `admin_route` adds the admin gate in
//! front, so unauthorized callers never trigger a connection. Handlers return
//! `Result<_, ApiError>`; the error side is rendered by `ApiError`'s
//! `IntoResponse` impl.

use axum::{
    extract::{Request, State},
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};

use crate::{error::ApiError, middleware::auth::require_admin, state::AppState};

/// Connect (or reuse the cached connection), then hand it to the handler.
pub async fn ensure_datastore(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.datastore.ensure_connected().await {
        Ok(connection) => {
            request.extensions_mut().insert(connection);
            next.run(request).await
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

pub fn public_route(route: MethodRouter<AppState>, state: &AppState) -> MethodRouter<AppState> {
    route.route_layer(from_fn_with_state(state.clone(), ensure_datastore))
}

pub fn admin_route(route: MethodRouter<AppState>, state: &AppState) -> MethodRouter<AppState> {
    // Layers added last run first: the gate precedes the datastore step.
    public_route(route, state).route_layer(from_fn_with_state(state.clone(), require_admin))
}
