use crate::{models::User, policy::Role};
use async_trait::async_trait;
use sqlx::{PgPool, query_builder::QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// The persistence contract the session layer depends on. The backend-as-a-service
/// owns the `users` table; this service only reads identities and, for the
/// administrative role change, writes the `role` column.
///
/// **Send + Sync + async_trait** are required so `Arc<dyn Repository>` can live in
/// the shared application state.
#[async_trait]
pub trait Repository: Send + Sync {
    // Session resolution: the stored role is re-read on every request.
    async fn get_user(&self, id: Uuid) -> Option<User>;
    // Admin listing, optionally narrowed to a single role.
    async fn list_users(&self, role: Option<Role>) -> Vec<User>;
    // Returns None when no user has this id.
    async fn set_user_role(&self, id: Uuid, role: Role) -> Option<User>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The `Repository` implementation backed by the Supabase Postgres instance.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PostgresRepository {
    async fn get_user(&self, id: Uuid) -> Option<User> {
        let result = sqlx::query_as::<_, User>(
            "SELECT id, email, username, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("get_user error: {:?}", e);
                None
            }
        }
    }

    /// list_users
    ///
    /// Builds the filter with QueryBuilder so the role is always bound, never
    /// interpolated.
    async fn list_users(&self, role: Option<Role>) -> Vec<User> {
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT id, email, username, role, created_at FROM users");

        if let Some(role) = role {
            builder.push(" WHERE role = ");
            builder.push_bind(role.as_str());
        }

        builder.push(" ORDER BY created_at DESC");

        match builder.build_query_as::<User>().fetch_all(&self.pool).await {
            Ok(users) => users,
            Err(e) => {
                tracing::error!("list_users error: {:?}", e);
                vec![]
            }
        }
    }

    async fn set_user_role(&self, id: Uuid, role: Role) -> Option<User> {
        let result = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET role = $2
            WHERE id = $1
            RETURNING id, email, username, role, created_at
            "#,
        )
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await;

        match result {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("set_user_role error: {:?}", e);
                None
            }
        }
    }
}
