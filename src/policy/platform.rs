use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// Platform
///
/// The client surface a request originates from. Native builds report
/// `ios`/`android`, which are folded into `Mobile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Platform {
    #[default]
    Mobile,
    Web,
}

impl Platform {
    /// Parses the `x-client-platform` header value. Missing or unrecognised
    /// values resolve to `Mobile`.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("web") => Platform::Web,
            Some("mobile" | "ios" | "android") => Platform::Mobile,
            Some(other) => {
                tracing::debug!(platform = other, "unrecognised client platform, assuming mobile");
                Platform::Mobile
            }
            None => Platform::Mobile,
        }
    }
}

/// PlatformConstraint
///
/// Restricts a role to a single client surface. A conflict is evaluated before
/// any route matching and always produces a platform denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum PlatformConstraint {
    MobileOnly,
    WebOnly,
    #[serde(rename = "none")]
    Unrestricted,
}

impl PlatformConstraint {
    pub fn permits(&self, platform: Platform) -> bool {
        match self {
            PlatformConstraint::MobileOnly => platform == Platform::Mobile,
            PlatformConstraint::WebOnly => platform == Platform::Web,
            PlatformConstraint::Unrestricted => true,
        }
    }
}
