use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints any client may call. The policy endpoints resolve the caller's
/// session opportunistically and fall back to the unauthenticated policy.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for the load balancer.
        .route("/health", get(|| async { "ok" }))
        // GET /policy/evaluate?route=...
        // Guard decision for the route the client is about to mount.
        .route("/policy/evaluate", get(handlers::evaluate_route))
        // GET /navigation
        // Ordered, filtered navigation items for the caller's chrome.
        .route("/navigation", get(handlers::get_navigation))
        // GET /policy/roles/{role}
        // One row of the policy table.
        .route("/policy/roles/{role}", get(handlers::get_role_policy))
        // POST /resources/classify
        // Display type inference for library resources.
        .route("/resources/classify", post(handlers::classify_resource))
}
