use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    policy::{Platform, Role, resolve_role},
    repository::RepositoryState,
};

/// Header carrying the client surface (`web`, `mobile`, `ios`, `android`).
pub const PLATFORM_HEADER: &str = "x-client-platform";
/// Local-only header naming an existing user id, bypassing JWT validation.
pub const DEV_USER_HEADER: &str = "x-user-id";

/// Claims
///
/// The subset of a Supabase access token this service reads. The role claim
/// Supabase issues (`authenticated`) is not the application role, which is
/// looked up in the users table instead.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the `auth.users` id, also the `public.users` primary key.
    pub sub: Uuid,
    pub exp: usize,
    pub iat: usize,
}

/// Session
///
/// The resolved identity of an authenticated request. Created per request from
/// the token (or the local bypass), read-only everywhere after that.
///
/// `role` is `None` when the stored role is outside the known set; the policy
/// then treats the caller exactly like an unauthenticated one.
///
/// Rejection: `StatusCode::UNAUTHORIZED` on any authentication failure.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub role: Option<Role>,
    pub platform: Platform,
    pub resolved_at: DateTime<Utc>,
}

/// Viewer
///
/// Optional-session extractor for endpoints that also serve anonymous
/// clients. Never rejects: a missing or invalid session yields `session: None`,
/// while the platform header is still honoured.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub session: Option<Session>,
    pub platform: Platform,
}

impl Viewer {
    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().and_then(|session| session.role)
    }
}

fn platform_of(parts: &Parts) -> Platform {
    Platform::from_header(
        parts
            .headers
            .get(PLATFORM_HEADER)
            .and_then(|value| value.to_str().ok()),
    )
}

/// resolve_session
///
/// 1. Local bypass: with `Env::Local`, an `x-user-id` header naming an existing
///    user authenticates directly.
/// 2. Bearer token extraction and JWT validation (signature and expiry).
/// 3. User lookup, so a deleted user or a changed role takes effect at once.
async fn resolve_session(
    parts: &Parts,
    repo: &RepositoryState,
    config: &AppConfig,
) -> Result<Session, StatusCode> {
    let platform = platform_of(parts);

    if config.env == Env::Local {
        let bypass_id = parts
            .headers
            .get(DEV_USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|id| Uuid::parse_str(id).ok());

        if let Some(user_id) = bypass_id {
            if let Some(user) = repo.get_user(user_id).await {
                tracing::debug!(user_id = %user.id, "session resolved via local bypass");
                return Ok(Session {
                    user_id: user.id,
                    email: user.email,
                    role: resolve_role(&user.role),
                    platform,
                    resolved_at: Utc::now(),
                });
            }
        }
        // Bad header or unknown user: fall through to the token flow.
    }

    let token = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let mut validation = Validation::default();
    validation.validate_exp = true;
    // Supabase sets aud=authenticated for every signed-in user; it carries no role.
    validation.validate_aud = false;

    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => tracing::debug!("rejected expired session token"),
            other => tracing::debug!(error = ?other, "rejected session token"),
        }
        StatusCode::UNAUTHORIZED
    })?;

    let user = repo
        .get_user(token_data.claims.sub)
        .await
        .ok_or(StatusCode::UNAUTHORIZED)?;

    Ok(Session {
        user_id: user.id,
        email: user.email,
        role: resolve_role(&user.role),
        platform,
        resolved_at: Utc::now(),
    })
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);
        resolve_session(parts, &repo, &config).await
    }
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);
        let platform = platform_of(parts);

        // Anonymous requests carry no credentials at all; skip the lookup.
        let has_credentials = parts.headers.contains_key(header::AUTHORIZATION)
            || parts.headers.contains_key(DEV_USER_HEADER);
        let session = if has_credentials {
            resolve_session(parts, &repo, &config).await.ok()
        } else {
            None
        };

        Ok(Viewer { session, platform })
    }
}
