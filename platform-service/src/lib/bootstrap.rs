//! Startup provisioning of the default superadmin account.

use auth::Authenticator;
use auth::Role;
use chrono::Utc;

use crate::config::BootstrapConfig;
use crate::domain::identity::errors::AuthError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewPassword;
use crate::domain::identity::ports::IdentityRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created(IdentityId),
    AlreadyPresent,
}

/// Make sure an identity with the configured email exists with role
/// `superadmin`.
///
/// Idempotent. An identity that already holds the email is left untouched,
/// whatever its role.
pub async fn ensure_superadmin(
    repository: &dyn IdentityRepository,
    authenticator: &Authenticator,
    config: &BootstrapConfig,
) -> Result<BootstrapOutcome, AuthError> {
    let email = EmailAddress::new(config.superadmin_email.clone())?;

    if repository.find_by_email(&email).await?.is_some() {
        tracing::debug!(email = %email, "Superadmin already provisioned");
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    let password = NewPassword::new(config.superadmin_password.clone())?;
    let password_hash = authenticator
        .hash_password(password.as_str())
        .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

    let now = Utc::now();
    let identity = Identity {
        id: IdentityId::new(),
        email,
        password_hash,
        name: config
            .superadmin_name
            .clone()
            .filter(|n| !n.trim().is_empty()),
        role: Role::SuperAdmin,
        created_at: now,
        updated_at: now,
    };

    match repository.create(identity).await {
        Ok(created) => {
            tracing::info!(identity_id = %created.id, email = %created.email, "Superadmin provisioned");
            Ok(BootstrapOutcome::Created(created.id))
        }
        // Another instance won the race.
        Err(AuthError::DuplicateIdentity(_)) => Ok(BootstrapOutcome::AlreadyPresent),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::TokenSettings;
    use mockall::mock;

    use super::*;

    mock! {
        pub TestIdentityRepository {}

        #[async_trait]
        impl IdentityRepository for TestIdentityRepository {
            async fn create(&self, identity: Identity) -> Result<Identity, AuthError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, AuthError>;
            async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, AuthError>;
        }
    }

    fn authenticator() -> Authenticator {
        Authenticator::new(&TokenSettings {
            access_secret: b"bootstrap_access_secret_0123456789abcdef".to_vec(),
            refresh_secret: b"bootstrap_refresh_secret_0123456789abcdef".to_vec(),
            access_ttl: chrono::Duration::minutes(15),
            refresh_ttl: chrono::Duration::hours(168),
        })
        .unwrap()
    }

    fn config() -> BootstrapConfig {
        BootstrapConfig {
            superadmin_email: "root@example.com".to_string(),
            superadmin_password: "change-me-now".to_string(),
            superadmin_name: Some("Super Admin".to_string()),
        }
    }

    #[tokio::test]
    async fn test_creates_superadmin_when_missing() {
        let mut repository = MockTestIdentityRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|identity| {
                identity.role == Role::SuperAdmin
                    && identity.email.as_str() == "root@example.com"
                    && identity.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|identity| Ok(identity));

        let outcome = ensure_superadmin(&repository, &authenticator(), &config())
            .await
            .unwrap();
        assert!(matches!(outcome, BootstrapOutcome::Created(_)));
    }

    #[tokio::test]
    async fn test_existing_identity_is_left_untouched() {
        let mut repository = MockTestIdentityRepository::new();
        let authenticator = authenticator();
        let now = Utc::now();
        let existing = Identity {
            id: IdentityId::new(),
            email: EmailAddress::new("root@example.com".to_string()).unwrap(),
            password_hash: authenticator.hash_password("whatever").unwrap(),
            name: None,
            role: Role::User,
            created_at: now,
            updated_at: now,
        };

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().times(0);

        let outcome = ensure_superadmin(&repository, &authenticator, &config())
            .await
            .unwrap();
        assert_eq!(outcome, BootstrapOutcome::AlreadyPresent);
    }

    #[tokio::test]
    async fn test_concurrent_insert_counts_as_present() {
        let mut repository = MockTestIdentityRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|identity| Err(AuthError::DuplicateIdentity(identity.email.to_string())));

        let outcome = ensure_superadmin(&repository, &authenticator(), &config())
            .await
            .unwrap();
        assert_eq!(outcome, BootstrapOutcome::AlreadyPresent);
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let mut repository = MockTestIdentityRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_create().times(0);

        let mut config = config();
        config.superadmin_password = "abc".to_string();

        let result = ensure_superadmin(&repository, &authenticator(), &config).await;
        assert!(matches!(result, Err(AuthError::InvalidPassword(_))));
    }
}
