//! Role-based access and navigation visibility.
//!
//! `table` holds the declarative rules, `guard` gates individual routes and
//! `navigation` filters the client chrome with the same rules. Everything in
//! here is synchronous and free of I/O.

use thiserror::Error;

pub mod guard;
pub mod navigation;
pub mod pattern;
pub mod platform;
pub mod role;
pub mod table;

pub use guard::{Decision, Evaluation, RouteGuard};
pub use navigation::{NavItem, NavKind, NavigationComposer};
pub use platform::{Platform, PlatformConstraint};
pub use role::{Role, resolve_role};
pub use table::{PolicyTable, RoutePolicy, STANDARD_TABLE};

/// PolicyError
///
/// Conditions the policy recognises but never raises: both are absorbed into a
/// default-deny decision and surface only in logs and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("unknown role: {0:?}")]
    UnknownRole(String),

    #[error("route {0} matches no allowed or denied pattern")]
    UnresolvedRoute(String),
}

/// Convenience wrapper over the standard table.
pub fn evaluate(role: Option<Role>, route: &str, platform: Platform) -> Decision {
    RouteGuard::default().evaluate(role, route, platform)
}

/// Convenience wrapper over the standard table.
pub fn compose_navigation(role: Option<Role>, platform: Platform) -> Vec<NavItem> {
    NavigationComposer::default().compose(role, platform)
}
