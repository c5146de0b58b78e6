use crate::{
    AppState,
    auth::{Session, Viewer},
    models::{
        ClassifyResourceRequest, ClassifyResourceResponse, DecisionResponse, NavItemResponse,
        NavigationResponse, PolicyAuditEntry, RolePolicyResponse, UpdateRoleRequest, User,
        UserProfile,
    },
    policy::{NavigationComposer, PolicyTable, Role, RouteGuard},
    resources::infer_resource_type,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

// --- Query Structs ---

/// EvaluateQuery
///
/// Query parameters for GET /policy/evaluate.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct EvaluateQuery {
    /// The client route about to be mounted, e.g. `/(tabs)/forum`.
    pub route: String,
}

/// UserFilter
///
/// Query parameters for GET /admin/users.
#[derive(Deserialize, utoipa::IntoParams, Default)]
pub struct UserFilter {
    /// Optional role identifier to narrow the listing.
    pub role: Option<String>,
}

/// authorize
///
/// Gates an admin endpoint by running its client route through the route guard.
/// Role checks live only in the policy table; handlers never compare roles.
fn authorize(session: &Session, route: &str) -> Result<(), StatusCode> {
    let decision = RouteGuard::default().evaluate(session.role, route, session.platform);
    if decision.is_allowed() {
        Ok(())
    } else {
        tracing::warn!(
            user_id = %session.user_id,
            route,
            ?decision,
            "admin endpoint denied by route policy"
        );
        Err(StatusCode::FORBIDDEN)
    }
}

// --- Handlers ---

/// evaluate_route
///
/// [Public Route] Runs the route guard for the caller's session. Anonymous callers
/// are evaluated against the unauthenticated policy.
#[utoipa::path(
    get,
    path = "/policy/evaluate",
    params(EvaluateQuery),
    responses((status = 200, description = "Guard decision", body = DecisionResponse))
)]
pub async fn evaluate_route(viewer: Viewer, Query(query): Query<EvaluateQuery>) -> Json<DecisionResponse> {
    let role = viewer.role();
    let evaluation = RouteGuard::default().explain(role, &query.route, viewer.platform);
    Json(DecisionResponse::new(&query.route, role, viewer.platform, &evaluation))
}

/// get_navigation
///
/// [Public Route] Returns the ordered navigation items visible to the caller.
#[utoipa::path(
    get,
    path = "/navigation",
    responses((status = 200, description = "Visible navigation items", body = NavigationResponse))
)]
pub async fn get_navigation(viewer: Viewer) -> Json<NavigationResponse> {
    let role = viewer.role();
    let items = NavigationComposer::default()
        .compose(role, viewer.platform)
        .into_iter()
        .map(NavItemResponse::from)
        .collect();

    Json(NavigationResponse {
        role,
        platform: viewer.platform,
        items,
    })
}

/// get_role_policy
///
/// [Public Route] Exposes one row of the policy table so clients can pre-filter
/// links without a round trip per route.
#[utoipa::path(
    get,
    path = "/policy/roles/{role}",
    params(("role" = String, Path, description = "Role identifier, e.g. peer-educator")),
    responses(
        (status = 200, description = "Role policy", body = RolePolicyResponse),
        (status = 404, description = "Unknown role")
    )
)]
pub async fn get_role_policy(Path(role): Path<String>) -> Result<Json<RolePolicyResponse>, StatusCode> {
    let role: Role = role.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    let table = PolicyTable::standard();
    Ok(Json(RolePolicyResponse::new(
        role,
        table.public,
        table.policy(Some(role)),
    )))
}

/// classify_resource
///
/// [Public Route] Infers the display type of a resource from its tags and metadata.
#[utoipa::path(
    post,
    path = "/resources/classify",
    request_body = ClassifyResourceRequest,
    responses((status = 200, description = "Inferred type", body = ClassifyResourceResponse))
)]
pub async fn classify_resource(
    Json(payload): Json<ClassifyResourceRequest>,
) -> Json<ClassifyResourceResponse> {
    let resource_type = infer_resource_type(&payload.tags, &payload.metadata());
    Json(ClassifyResourceResponse { resource_type })
}

/// get_me
///
/// [Authenticated Route] The caller's identity as the policy layer sees it.
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 401, description = "No valid session")
    )
)]
pub async fn get_me(session: Session) -> Json<UserProfile> {
    let fallback_route = PolicyTable::standard().fallback_route(session.role);
    Json(UserProfile {
        id: session.user_id,
        email: session.email,
        role: session.role,
        platform: session.platform,
        fallback_route: fallback_route.to_string(),
    })
}

/// list_users
///
/// [Admin Route] Lists accounts, optionally narrowed to one role.
#[utoipa::path(
    get,
    path = "/admin/users",
    params(UserFilter),
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 400, description = "Unknown role filter"),
        (status = 403, description = "Not permitted")
    )
)]
pub async fn list_users(
    session: Session,
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> Result<Json<Vec<User>>, StatusCode> {
    authorize(&session, "/admin/users")?;

    let role = filter
        .role
        .as_deref()
        .map(str::parse::<Role>)
        .transpose()
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    Ok(Json(state.repo.list_users(role).await))
}

/// update_user_role
///
/// [Admin Route] The administrative action that changes a user's role. The new
/// role applies from the user's next request, since sessions re-read it.
#[utoipa::path(
    put,
    path = "/admin/users/{id}/role",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Updated", body = User),
        (status = 400, description = "Unknown role"),
        (status = 403, description = "Not permitted"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user_role(
    session: Session,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<User>, StatusCode> {
    authorize(&session, "/admin/users")?;

    let role: Role = payload.role.parse().map_err(|e| {
        tracing::debug!(error = %e, "rejected role update");
        StatusCode::BAD_REQUEST
    })?;

    match state.repo.set_user_role(id, role).await {
        Some(user) => {
            tracing::info!(admin = %session.user_id, user = %id, %role, "user role changed");
            Ok(Json(user))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// get_policy_audit
///
/// [Admin Route] Reports, per role, the known routes that the table leaves to
/// default-deny.
#[utoipa::path(
    get,
    path = "/admin/policy/audit",
    responses(
        (status = 200, description = "Audit", body = [PolicyAuditEntry]),
        (status = 403, description = "Not permitted")
    )
)]
pub async fn get_policy_audit(session: Session) -> Result<Json<Vec<PolicyAuditEntry>>, StatusCode> {
    authorize(&session, "/admin/policy")?;

    let table = PolicyTable::standard();
    let entries = Role::ALL
        .into_iter()
        .map(|role| PolicyAuditEntry {
            role,
            unresolved_routes: table
                .unresolved_routes(Some(role))
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
        .collect();

    Ok(Json(entries))
}
