use std::collections::BTreeSet;

use super::{
    pattern,
    platform::{Platform, PlatformConstraint},
    role::Role,
};

pub const LOGIN_ROUTE: &str = "/(auth)/login";
pub const HOME_ROUTE: &str = "/(tabs)";
pub const WEB_REQUIRED_ROUTE: &str = "/web-required";
pub const MOBILE_REQUIRED_ROUTE: &str = "/mobile-required";

/// Reachable by every audience, including unauthenticated sessions.
pub const PUBLIC_PREFIXES: &[&str] = &[
    "/(auth)",
    "/onboarding",
    WEB_REQUIRED_ROUTE,
    MOBILE_REQUIRED_ROUTE,
];

/// Every screen root the clients can navigate to. Each role's allowed and
/// denied lists together must cover all of these.
pub const ROUTE_NAMESPACE: &[&str] = &[
    "/(auth)",
    "/onboarding",
    WEB_REQUIRED_ROUTE,
    MOBILE_REQUIRED_ROUTE,
    HOME_ROUTE,
    "/(tabs)/forum",
    "/(tabs)/chat",
    "/(tabs)/resources",
    "/(tabs)/profile",
    "/post",
    "/create-post",
    "/topic",
    "/chat",
    "/notifications",
    "/settings",
    "/meetings",
    "/check-in",
    "/feedback",
    "/peer-educator",
    "/peer-educator/executive",
    "/counselor",
    "/student-affairs",
    "/admin",
];

/// RoutePolicy
///
/// One row of the policy table. Public prefixes are implied and not repeated
/// in `allowed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutePolicy {
    pub allowed: &'static [&'static str],
    pub denied: &'static [&'static str],
    pub platform: PlatformConstraint,
    pub fallback: &'static str,
    /// Navigation item ids hidden for the role regardless of route outcome.
    pub hidden_nav: &'static [&'static str],
}

const STUDENT: RoutePolicy = RoutePolicy {
    allowed: &[
        HOME_ROUTE,
        "/post",
        "/create-post",
        "/topic",
        "/chat",
        "/notifications",
        "/settings",
        "/meetings",
        "/check-in",
        "/feedback",
    ],
    denied: &["/peer-educator", "/counselor", "/student-affairs", "/admin"],
    platform: PlatformConstraint::Unrestricted,
    fallback: HOME_ROUTE,
    hidden_nav: &[],
};

const PEER_EDUCATOR: RoutePolicy = RoutePolicy {
    allowed: &[
        HOME_ROUTE,
        "/post",
        "/create-post",
        "/topic",
        "/chat",
        "/notifications",
        "/settings",
        "/meetings",
        "/check-in",
        "/feedback",
        "/peer-educator",
    ],
    denied: &[
        "/peer-educator/executive",
        "/counselor",
        "/student-affairs",
        "/admin",
    ],
    platform: PlatformConstraint::Unrestricted,
    fallback: HOME_ROUTE,
    hidden_nav: &[],
};

const PEER_EDUCATOR_EXECUTIVE: RoutePolicy = RoutePolicy {
    denied: &["/counselor", "/student-affairs", "/admin"],
    ..PEER_EDUCATOR
};

const COUNSELOR: RoutePolicy = RoutePolicy {
    allowed: &[
        HOME_ROUTE,
        "/post",
        "/chat",
        "/notifications",
        "/settings",
        "/meetings",
        "/feedback",
        "/counselor",
    ],
    denied: &[
        "/(tabs)/forum",
        "/create-post",
        "/topic",
        "/check-in",
        "/peer-educator",
        "/student-affairs",
        "/admin",
    ],
    platform: PlatformConstraint::Unrestricted,
    fallback: "/counselor/dashboard",
    hidden_nav: &["forum", "compose"],
};

// Life coaches work the counselor escalation queue.
const LIFE_COACH: RoutePolicy = COUNSELOR;

const STUDENT_AFFAIRS: RoutePolicy = RoutePolicy {
    allowed: &[
        HOME_ROUTE,
        "/notifications",
        "/settings",
        "/feedback",
        "/student-affairs",
    ],
    denied: &[
        "/(tabs)/forum",
        "/(tabs)/chat",
        "/post",
        "/create-post",
        "/topic",
        "/chat",
        "/meetings",
        "/check-in",
        "/peer-educator",
        "/counselor",
        "/admin",
    ],
    platform: PlatformConstraint::WebOnly,
    fallback: "/student-affairs/dashboard",
    hidden_nav: &["forum", "chat", "compose"],
};

const ADMIN: RoutePolicy = RoutePolicy {
    allowed: &["/"],
    denied: &[],
    platform: PlatformConstraint::Unrestricted,
    fallback: "/admin/dashboard",
    hidden_nav: &[],
};

const ANONYMOUS: RoutePolicy = RoutePolicy {
    allowed: &[],
    denied: &[],
    platform: PlatformConstraint::Unrestricted,
    fallback: LOGIN_ROUTE,
    hidden_nav: &[],
};

/// PolicyTable
///
/// The single declarative source of role access rules. The route guard and
/// the navigation composer both read from it; nothing else compares roles.
///
/// `None` as a role is the unauthenticated default: public routes only,
/// fallback to the login screen.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    pub student: RoutePolicy,
    pub peer_educator: RoutePolicy,
    pub peer_educator_executive: RoutePolicy,
    pub counselor: RoutePolicy,
    pub life_coach: RoutePolicy,
    pub student_affairs: RoutePolicy,
    pub admin: RoutePolicy,
    pub anonymous: RoutePolicy,
    pub public: &'static [&'static str],
    pub namespace: &'static [&'static str],
}

/// The table shipped with the PEACE clients.
pub static STANDARD_TABLE: PolicyTable = PolicyTable {
    student: STUDENT,
    peer_educator: PEER_EDUCATOR,
    peer_educator_executive: PEER_EDUCATOR_EXECUTIVE,
    counselor: COUNSELOR,
    life_coach: LIFE_COACH,
    student_affairs: STUDENT_AFFAIRS,
    admin: ADMIN,
    anonymous: ANONYMOUS,
    public: PUBLIC_PREFIXES,
    namespace: ROUTE_NAMESPACE,
};

impl Default for PolicyTable {
    fn default() -> Self {
        STANDARD_TABLE.clone()
    }
}

impl PolicyTable {
    pub fn standard() -> &'static PolicyTable {
        &STANDARD_TABLE
    }

    pub fn policy(&self, role: Option<Role>) -> &RoutePolicy {
        match role {
            Some(Role::Student) => &self.student,
            Some(Role::PeerEducator) => &self.peer_educator,
            Some(Role::PeerEducatorExecutive) => &self.peer_educator_executive,
            Some(Role::Counselor) => &self.counselor,
            Some(Role::LifeCoach) => &self.life_coach,
            Some(Role::StudentAffairs) => &self.student_affairs,
            Some(Role::Admin) => &self.admin,
            None => &self.anonymous,
        }
    }

    /// Role-specific allowed prefixes plus the public prefixes.
    pub fn allowed_prefixes(&self, role: Option<Role>) -> BTreeSet<&'static str> {
        self.public
            .iter()
            .chain(self.policy(role).allowed)
            .copied()
            .collect()
    }

    pub fn denied_prefixes(&self, role: Option<Role>) -> BTreeSet<&'static str> {
        self.policy(role).denied.iter().copied().collect()
    }

    pub fn platform_constraint(&self, role: Option<Role>) -> PlatformConstraint {
        self.policy(role).platform
    }

    pub fn fallback_route(&self, role: Option<Role>) -> &'static str {
        self.policy(role).fallback
    }

    pub fn hidden_nav_items(&self, role: Option<Role>) -> BTreeSet<&'static str> {
        self.policy(role).hidden_nav.iter().copied().collect()
    }

    /// Where a platform conflict sends the client, or `None` when the role may
    /// use `platform`.
    pub fn platform_redirect(&self, role: Option<Role>, platform: Platform) -> Option<&'static str> {
        let constraint = self.platform_constraint(role);
        if constraint.permits(platform) {
            return None;
        }
        match constraint {
            PlatformConstraint::WebOnly => Some(WEB_REQUIRED_ROUTE),
            PlatformConstraint::MobileOnly => Some(MOBILE_REQUIRED_ROUTE),
            PlatformConstraint::Unrestricted => None,
        }
    }

    /// unresolved_routes
    ///
    /// Namespace routes that match neither an allowed nor a denied pattern for
    /// `role`. Those routes still default-deny, but a non-empty result means the
    /// table has drifted from the screens the clients ship.
    pub fn unresolved_routes(&self, role: Option<Role>) -> Vec<&'static str> {
        let allowed = self.allowed_prefixes(role);
        let denied = self.denied_prefixes(role);

        self.namespace
            .iter()
            .copied()
            .filter(|route| {
                pattern::longest_match(denied.iter().copied(), route).is_none()
                    && pattern::longest_match(allowed.iter().copied(), route).is_none()
            })
            .collect()
    }
}
