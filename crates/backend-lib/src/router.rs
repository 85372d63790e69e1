// ============================
// crates/backend-lib/src/router.rs
// ============================
//! HTTP router.
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, health};
use crate::middleware::require_auth;
use crate::AppState;

/// Create the router with the built-in endpoints only
pub fn create_router(state: AppState) -> Router {
    create_router_with(state, Router::new())
}

/// Create the router, mounting `protected` behind the authorization gate.
///
/// Handlers in `protected` can take `Extension<Authorized>` to see who
/// made the request.
pub fn create_router_with(state: AppState, protected: Router<AppState>) -> Router {
    let protected = protected
        .route("/auth/whoami", get(auth::whoami))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
