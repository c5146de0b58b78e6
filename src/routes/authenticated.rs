use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Routes that require a resolved `Session`. The router layer above this module
/// rejects unauthenticated requests with 401 before any handler runs.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /me
        // The caller's identity, role, platform and fallback route.
        .route("/me", get(handlers::get_me))
}
