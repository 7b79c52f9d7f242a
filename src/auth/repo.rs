use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

use crate::auth::dto::Viewer;
use crate::auth::repo_types::{Profile, Role, User};
use crate::db::PgStore;

#[async_trait]
pub trait Accounts: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_user(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn find_profile(&self, id: Uuid) -> anyhow::Result<Option<Profile>>;

    async fn profile_role(&self, id: Uuid) -> anyhow::Result<Option<Role>> {
        Ok(self.find_profile(id).await?.map(|p| p.role))
    }

    /// A failed role lookup leaves the caller without a role.
    async fn viewer(&self, id: Uuid) -> Viewer {
        let role = match self.profile_role(id).await {
            Ok(role) => role,
            Err(e) => {
                warn!(error = %e, user_id = %id, "profile role lookup failed");
                None
            }
        };
        Viewer { id, role }
    }
}

#[async_trait]
impl Accounts for PgStore {
    /// Find a user by email.
    async fn find_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, email, password_hash, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_profile(&self, id: Uuid) -> anyhow::Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"SELECT id, role, full_name FROM profiles WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }
}
