use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    policy::{Decision, Evaluation, NavItem, NavKind, Platform, PlatformConstraint, Role, RoutePolicy},
    resources::ResourceType,
};

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// A row of the `public.users` table maintained by the backend-as-a-service.
/// `role` is kept as the raw column value; it is only trusted after parsing
/// through `policy::resolve_role`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub role: String,
    #[ts(type = "string")]
    pub created_at: DateTime<Utc>,
}

// --- Request Payloads (Input Schemas) ---

/// UpdateRoleRequest
///
/// Input payload for the administrative role change (PUT /admin/users/{id}/role).
/// The role is taken as a string so an unknown value maps to 400 rather than
/// a generic body rejection.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateRoleRequest {
    #[schema(example = "peer-educator")]
    pub role: String,
}

/// ClassifyResourceRequest
///
/// Metadata for a library resource whose display type should be inferred.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ClassifyResourceRequest {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "application/pdf")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ClassifyResourceRequest {
    /// The non-tag strings considered during inference.
    pub fn metadata(&self) -> Vec<&str> {
        [&self.url, &self.mime_type, &self.title]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .collect()
    }
}

// --- Policy Schemas (Output) ---

/// DecisionOutcome
///
/// Wire form of `policy::Decision` without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum DecisionOutcome {
    Allow,
    DenyRedirect,
    DenyPlatform,
}

/// DecisionResponse
///
/// Output schema for GET /policy/evaluate. The router collaborator navigates to
/// `target` whenever the outcome is a denial.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct DecisionResponse {
    pub route: String,
    pub role: Option<Role>,
    pub platform: Platform,
    pub outcome: DecisionOutcome,
    pub target: Option<String>,
    pub matched_pattern: Option<String>,
}

impl DecisionResponse {
    pub fn new(route: &str, role: Option<Role>, platform: Platform, evaluation: &Evaluation) -> Self {
        let outcome = match evaluation.decision {
            Decision::Allow => DecisionOutcome::Allow,
            Decision::DenyRedirect(_) => DecisionOutcome::DenyRedirect,
            Decision::DenyPlatform(_) => DecisionOutcome::DenyPlatform,
        };
        Self {
            route: route.to_string(),
            role,
            platform,
            outcome,
            target: evaluation.decision.redirect_target().map(str::to_string),
            matched_pattern: evaluation.matched_pattern.map(str::to_string),
        }
    }
}

/// NavItemResponse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavItemResponse {
    pub id: String,
    pub label: String,
    pub route: Option<String>,
    pub kind: NavKind,
}

impl From<NavItem> for NavItemResponse {
    fn from(item: NavItem) -> Self {
        Self {
            id: item.id.to_string(),
            label: item.label.to_string(),
            route: item.route.map(str::to_string),
            kind: item.kind,
        }
    }
}

/// NavigationResponse
///
/// Output schema for GET /navigation: the ordered items the chrome renderer
/// should show for the caller.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationResponse {
    pub role: Option<Role>,
    pub platform: Platform,
    pub items: Vec<NavItemResponse>,
}

/// RolePolicyResponse
///
/// Output schema for GET /policy/roles/{role}. `allowed` includes the public
/// prefixes every audience can reach.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct RolePolicyResponse {
    pub role: Role,
    pub allowed: Vec<String>,
    pub denied: Vec<String>,
    pub platform: PlatformConstraint,
    pub fallback: String,
    pub hidden_nav_items: Vec<String>,
}

impl RolePolicyResponse {
    pub fn new(role: Role, public: &[&str], policy: &RoutePolicy) -> Self {
        let owned = |patterns: &[&str]| patterns.iter().map(|p| p.to_string()).collect::<Vec<_>>();
        let mut allowed = owned(public);
        allowed.extend(owned(policy.allowed));

        Self {
            role,
            allowed,
            denied: owned(policy.denied),
            platform: policy.platform,
            fallback: policy.fallback.to_string(),
            hidden_nav_items: owned(policy.hidden_nav),
        }
    }
}

/// PolicyAuditEntry
///
/// One row of GET /admin/policy/audit. A healthy table reports no unresolved
/// routes for any role.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct PolicyAuditEntry {
    pub role: Role,
    pub unresolved_routes: Vec<String>,
}

/// ClassifyResourceResponse
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ClassifyResourceResponse {
    pub resource_type: ResourceType,
}

// --- Profile Schemas (Output) ---

/// UserProfile
///
/// Output schema for the authenticated user's profile (GET /me), including
/// the platform the session was resolved on.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub role: Option<Role>,
    pub platform: Platform,
    pub fallback_route: String,
}
