//! Admin user queries for `PostgreSQL`.

use chrono::{DateTime, Utc};

use vitrine_core::{AdminUserId, Email, Permissions};

use super::{AdminUserStore, PgStore, RepositoryError};
use crate::models::{AdminUser, NewAdminUser};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` admin user queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminUserRow {
    id: AdminUserId,
    username: String,
    email: String,
    permissions: Option<Vec<String>>,
    password_hash: String,
    created_at: DateTime<Utc>,
    last_login: Option<DateTime<Utc>>,
}

impl TryFrom<AdminUserRow> for AdminUser {
    type Error = RepositoryError;

    fn try_from(row: AdminUserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            username: row.username,
            email,
            permissions: row.permissions.map(Permissions::from_iter),
            password_hash: row.password_hash,
            created_at: row.created_at,
            last_login: row.last_login,
        })
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, username, email, permissions, password_hash, created_at, last_login FROM admin_users";

// =============================================================================
// Store
// =============================================================================

impl AdminUserStore for PgStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(&format!("{SELECT_COLUMNS} WHERE username = $1"))
            .bind(username)
            .fetch_optional(self.pool())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_id(&self, id: AdminUserId) -> Result<Option<AdminUser>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn touch_last_login(
        &self,
        id: AdminUserId,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE admin_users SET last_login = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn update_password_hash(
        &self,
        id: AdminUserId,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE admin_users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn create(&self, user: &NewAdminUser) -> Result<AdminUser, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(
            r"
            INSERT INTO admin_users (id, username, email, permissions, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, permissions, password_hash, created_at, last_login
            ",
        )
        .bind(AdminUserId::new())
        .bind(&user.username)
        .bind(user.email.as_str())
        .bind(user.permissions.as_ref().map(Permissions::to_vec))
        .bind(&user.password_hash)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }
}
