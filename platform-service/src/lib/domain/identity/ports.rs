use async_trait::async_trait;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::models::AuthSession;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::LoginCommand;
use crate::domain::identity::models::RegisterCommand;

/// Port for authentication flows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new identity with role `user` and issue its first tokens.
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Email is already registered
    /// * `Internal` - Hashing or token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError>;

    /// Verify email and password and issue tokens with the current role.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Internal` - Hashing or token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// The identity is re-loaded; the role in the new access token is the
    /// stored one.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token is forged, expired or malformed
    /// * `IdentityNotFound` - Subject no longer exists
    /// * `Internal` - Token signing failed
    /// * `DatabaseError` - Database operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError>;

    /// Retrieve the identity behind an authenticated request.
    ///
    /// # Errors
    /// * `IdentityNotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn current_identity(&self, id: &IdentityId) -> Result<Identity, AuthError>;
}

/// Persistence operations for the identity aggregate.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist a new identity. The store sets the timestamps.
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, AuthError>;

    /// Retrieve identity by email address.
    ///
    /// # Errors
    /// * `DataIntegrity` - Stored row holds an unknown role
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Identity>, AuthError>;

    /// Retrieve identity by identifier.
    ///
    /// # Errors
    /// * `DataIntegrity` - Stored row holds an unknown role
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, AuthError>;
}
