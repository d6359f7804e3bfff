use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Role;
use chrono::Utc;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::models::AuthSession;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::ports::AuthServicePort;
use crate::domain::identity::ports::IdentityRepository;

/// Domain service implementation for authentication flows.
///
/// Stateless apart from its injected dependencies; every call is one
/// transition of register → login → refresh. Password hashing runs on the
/// blocking pool.
pub struct AuthService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    authenticator: Arc<Authenticator>,
}

impl<IR> AuthService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<IR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    fn issue_session(&self, identity: Identity) -> Result<AuthSession, AuthError> {
        let tokens = self
            .authenticator
            .issue_tokens(
                &identity.id.to_string(),
                identity.email.as_str(),
                identity.role,
            )
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthSession { identity, tokens })
    }
}

#[async_trait]
impl<IR> AuthServicePort for AuthService<IR>
where
    IR: IdentityRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError> {
        // Fast path only; the store's unique constraint is authoritative.
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateIdentity(command.email.to_string()));
        }

        let password_hash = self.hash_password(command.password.as_str()).await?;

        let now = Utc::now();
        let identity = Identity {
            id: IdentityId::new(),
            email: command.email,
            password_hash,
            name: command.name,
            role: Role::User,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(identity).await?;
        tracing::info!(identity_id = %created.id, "Identity registered");

        self.issue_session(created).map_err(|e| {
            tracing::error!(
                error = %e,
                "Identity was stored but tokens could not be issued; caller must log in"
            );
            e
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError> {
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;

        let Some(identity) = self.repository.find_by_email(&command.email).await? else {
            // Same Argon2 work as a wrong password, so timing does not reveal the email
            let rejection =
                tokio::task::spawn_blocking(move || authenticator.reject_unknown(&password))
                    .await
                    .map_err(|e| {
                        AuthError::Internal(format!("Password verification task failed: {}", e))
                    })?;
            tracing::debug!(error = %rejection, "Login for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let stored_hash = identity.password_hash.clone();
        let subject_id = identity.id.to_string();
        let email = identity.email.to_string();
        let role = identity.role;

        let tokens = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &stored_hash, &subject_id, &email, role)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password verification task failed: {}", e)))?
        .map_err(|e| match e {
            AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            AuthenticationError::PasswordError(err) => {
                AuthError::Internal(format!("Password verification failed: {}", err))
            }
            AuthenticationError::TokenError(err) => {
                AuthError::Internal(format!("Token generation failed: {}", err))
            }
        })?;

        tracing::debug!(identity_id = %identity.id, role = %identity.role, "Identity logged in");

        Ok(AuthSession { identity, tokens })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let credential = self
            .authenticator
            .verify_refresh_token(refresh_token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                AuthError::InvalidRefreshToken
            })?;

        let id = IdentityId::from_string(&credential.subject_id)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        let identity = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or(AuthError::IdentityNotFound(id.to_string()))?;

        self.issue_session(identity)
    }

    async fn current_identity(&self, id: &IdentityId) -> Result<Identity, AuthError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AuthError::IdentityNotFound(id.to_string()))
    }
}
