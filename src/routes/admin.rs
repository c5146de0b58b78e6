use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, put},
};

/// Admin Router Module
///
/// Administrative endpoints. Each handler runs its client route through the
/// route guard, so only roles the policy table allows on `/admin` get past 403.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/users?role=...
        .route("/users", get(handlers::list_users))
        // PUT /admin/users/{id}/role
        // The only way a role changes.
        .route("/users/{id}/role", put(handlers::update_user_role))
        // GET /admin/policy/audit
        // Routes each role leaves to default-deny.
        .route("/policy/audit", get(handlers::get_policy_audit))
}
