use async_trait::async_trait;
use auth::Role;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::ports::IdentityRepository;

const SELECT_COLUMNS: &str =
    "id, email, password_hash, name, role::text AS role, created_at, updated_at";

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct IdentityRow {
    id: Uuid,
    email: String,
    password_hash: String,
    name: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = AuthError;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        // Never fall back to a default role for an unknown stored value.
        let role = row.role.parse::<Role>().map_err(|e| {
            tracing::error!(identity_id = %row.id, "Stored identity has an unknown role");
            AuthError::DataIntegrity(e.to_string())
        })?;
        let email = EmailAddress::new(row.email)
            .map_err(|e| AuthError::DataIntegrity(e.to_string()))?;

        Ok(Identity {
            id: IdentityId(row.id),
            email,
            password_hash: row.password_hash,
            name: row.name,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn create(&self, identity: Identity) -> Result<Identity, AuthError> {
        let query = format!(
            r#"
            INSERT INTO users (id, email, password_hash, name, role)
            VALUES ($1, $2, $3, $4, $5::user_role)
            RETURNING {SELECT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, IdentityRow>(&query)
            .bind(identity.id.0)
            .bind(identity.email.as_str())
            .bind(&identity.password_hash)
            .bind(identity.name.as_deref())
            .bind(identity.role.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation()
                        && db_err.constraint() == Some("users_email_key")
                    {
                        return AuthError::DuplicateIdentity(identity.email.to_string());
                    }
                }
                AuthError::DatabaseError(e.to_string())
            })?;

        row.try_into()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, AuthError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM users WHERE email = $1");

        sqlx::query_as::<_, IdentityRow>(&query)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .map(Identity::try_from)
            .transpose()
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, AuthError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, IdentityRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .map(Identity::try_from)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(role: &str) -> IdentityRow {
        IdentityRow {
            id: Uuid::new_v4(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            name: None,
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_with_known_role() {
        let identity = Identity::try_from(row("superadmin")).unwrap();
        assert_eq!(identity.role, Role::SuperAdmin);
    }

    #[test]
    fn test_row_with_unknown_role_is_integrity_error() {
        let result = Identity::try_from(row("owner"));
        assert!(matches!(result, Err(AuthError::DataIntegrity(_))));
    }
}
