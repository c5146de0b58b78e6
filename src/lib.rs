use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

pub mod auth;
pub mod config;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod repository;
pub mod resources;

pub mod routes;
use auth::Session;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use policy::{Decision, NavigationComposer, Platform, PolicyTable, Role, RouteGuard};
pub use repository::{PostgresRepository, RepositoryState};

/// ApiDoc
///
/// OpenAPI document for the access service, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::evaluate_route, handlers::get_navigation, handlers::get_role_policy,
        handlers::classify_resource, handlers::get_me, handlers::list_users,
        handlers::update_user_role, handlers::get_policy_audit
    ),
    components(
        schemas(
            models::User, models::UpdateRoleRequest, models::ClassifyResourceRequest,
            models::ClassifyResourceResponse, models::DecisionResponse, models::DecisionOutcome,
            models::NavItemResponse, models::NavigationResponse, models::RolePolicyResponse,
            models::PolicyAuditEntry, models::UserProfile,
            policy::Role, policy::Platform, policy::PlatformConstraint, policy::NavKind,
            resources::ResourceType,
        )
    ),
    tags(
        (name = "peace-access", description = "PEACE role policy and navigation API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single shared state handed to every handler and extractor. The policy
/// table itself is static and needs no slot here.
#[derive(Clone)]
pub struct AppState {
    /// Identity lookups and role administration.
    pub repo: RepositoryState,
    /// The loaded, immutable configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Rejects requests without a valid session before they reach a handler. The
/// `Session` extractor does the work; a failure short-circuits with 401.
async fn auth_middleware(_session: Session, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the routing tree, the scoped auth layer, and the global
/// observability and CORS layers.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(
            authenticated::authenticated_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        // Admin routes need a session too; which roles pass is the policy's call.
        .nest(
            "/admin",
            admin::admin_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the per-request span, tagging it with the `x-request-id` header and
/// the client platform so every log line of a request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let header = |name: &str| {
        request
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("unknown")
            .to_string()
    };

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %header("x-request-id"),
        platform = %header(auth::PLATFORM_HEADER),
    )
}
