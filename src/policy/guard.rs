use super::{PolicyError, pattern, platform::Platform, role::Role, table::PolicyTable};

/// Decision
///
/// The outcome of gating a single navigation. Deny variants carry the route
/// the router should transition to instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    Allow,
    DenyRedirect(&'static str),
    DenyPlatform(&'static str),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Decision::Allow => None,
            Decision::DenyRedirect(target) | Decision::DenyPlatform(target) => Some(*target),
        }
    }
}

/// Evaluation
///
/// A decision together with the pattern that produced it. `issue` is set when
/// the decision came from the default-deny branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub decision: Decision,
    pub matched_pattern: Option<&'static str>,
    pub issue: Option<PolicyError>,
}

/// RouteGuard
///
/// Gates screen mounts against a `PolicyTable`. Evaluation is pure: no
/// decision is cached, so callers re-run it on every navigation and whenever
/// the session changes.
#[derive(Debug, Clone, Copy)]
pub struct RouteGuard<'t> {
    table: &'t PolicyTable,
}

impl Default for RouteGuard<'static> {
    fn default() -> Self {
        RouteGuard::new(PolicyTable::standard())
    }
}

impl<'t> RouteGuard<'t> {
    pub fn new(table: &'t PolicyTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t PolicyTable {
        self.table
    }

    pub fn evaluate(&self, role: Option<Role>, route: &str, platform: Platform) -> Decision {
        self.explain(role, route, platform).decision
    }

    /// explain
    ///
    /// Runs the guard in order: platform constraint, denied prefixes, allowed
    /// prefixes, then default-deny to the role's fallback route.
    pub fn explain(&self, role: Option<Role>, route: &str, platform: Platform) -> Evaluation {
        let route = pattern::normalize(route);
        let policy = self.table.policy(role);

        let evaluation = if let Some(target) = self.table.platform_redirect(role, platform) {
            Evaluation {
                decision: Decision::DenyPlatform(target),
                matched_pattern: None,
                issue: None,
            }
        } else if let Some(hit) = pattern::longest_match(policy.denied.iter().copied(), &route) {
            Evaluation {
                decision: Decision::DenyRedirect(policy.fallback),
                matched_pattern: Some(hit),
                issue: None,
            }
        } else if let Some(hit) = pattern::longest_match(
            self.table.public.iter().chain(policy.allowed).copied(),
            &route,
        ) {
            Evaluation {
                decision: Decision::Allow,
                matched_pattern: Some(hit),
                issue: None,
            }
        } else {
            Evaluation {
                decision: Decision::DenyRedirect(policy.fallback),
                matched_pattern: None,
                issue: Some(PolicyError::UnresolvedRoute(route.to_string())),
            }
        };

        tracing::debug!(
            role = role.map(|r| r.as_str()).unwrap_or("anonymous"),
            route = %route,
            ?platform,
            decision = ?evaluation.decision,
            pattern = evaluation.matched_pattern,
            "route evaluated"
        );

        evaluation
    }
}
