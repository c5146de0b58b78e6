use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use utoipa::ToSchema;

use super::PolicyError;

/// Role
///
/// The closed set of access levels a PEACE account can hold. The wire format
/// (JSON, the `users.role` column, JWT-adjacent profile data) is the kebab-case
/// identifier, e.g. `peer-educator-executive`.
///
/// A role is fixed for the lifetime of a session. It only changes through the
/// administrative role update endpoint, and the new value takes effect on the
/// next session resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Role {
    Student,
    PeerEducator,
    PeerEducatorExecutive,
    Counselor,
    LifeCoach,
    StudentAffairs,
    Admin,
}

impl Role {
    /// Every role, in ascending order of privilege.
    pub const ALL: [Role; 7] = [
        Role::Student,
        Role::PeerEducator,
        Role::PeerEducatorExecutive,
        Role::Counselor,
        Role::LifeCoach,
        Role::StudentAffairs,
        Role::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::PeerEducator => "peer-educator",
            Role::PeerEducatorExecutive => "peer-educator-executive",
            Role::Counselor => "counselor",
            Role::LifeCoach => "life-coach",
            Role::StudentAffairs => "student-affairs",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s.trim())
            .ok_or_else(|| PolicyError::UnknownRole(s.to_string()))
    }
}

/// resolve_role
///
/// Converts a stored role string into the audience used by the policy layer.
/// Values outside the closed set are logged and collapse to `None`, which the
/// table treats as the unauthenticated default.
pub fn resolve_role(raw: &str) -> Option<Role> {
    match raw.parse::<Role>() {
        Ok(role) => Some(role),
        Err(e) => {
            tracing::warn!(error = %e, "falling back to the unauthenticated policy");
            None
        }
    }
}
