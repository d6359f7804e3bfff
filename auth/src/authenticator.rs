use chrono::Duration;

use crate::codec::AccessCredential;
use crate::codec::CredentialCodec;
use crate::jwt::KeyError;
use crate::jwt::TokenError;
use crate::jwt::TokenKind;
use crate::password::HashCost;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::policy::AccessPolicy;
use crate::role::Role;

/// Signing material and lifetimes for both token families.
#[derive(Clone)]
pub struct TokenSettings {
    pub access_secret: Vec<u8>,
    pub refresh_secret: Vec<u8>,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

/// Authentication coordinator combining password verification and token issuance.
///
/// Owns one codec per token family. The access codec is also handed out as
/// an [`AccessPolicy`] for request-time enforcement.
#[derive(Debug, Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    access: CredentialCodec,
    refresh: CredentialCodec,
    policy: AccessPolicy,
}

/// Access and refresh tokens minted together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Errors
    /// * `SecretTooShort` - Either secret is shorter than 32 bytes
    /// * `SharedSecret` - Access and refresh secrets are identical
    /// * `InvalidTtl` - Either lifetime is not positive or exceeds the maximum
    pub fn new(settings: &TokenSettings) -> Result<Self, KeyError> {
        if settings.access_secret == settings.refresh_secret {
            return Err(KeyError::SharedSecret);
        }

        let access = CredentialCodec::new(
            TokenKind::Access,
            &settings.access_secret,
            settings.access_ttl,
        )?;
        let refresh = CredentialCodec::new(
            TokenKind::Refresh,
            &settings.refresh_secret,
            settings.refresh_ttl,
        )?;
        let policy = AccessPolicy::new(access.clone())?;

        Ok(Self {
            password_hasher: PasswordHasher::new(),
            access,
            refresh,
            policy,
        })
    }

    /// Use `cost` for newly created password hashes.
    ///
    /// Existing hashes keep verifying under the parameters they were made with.
    ///
    /// # Errors
    /// * `InvalidCost` - Argon2 rejects the parameter combination
    pub fn with_hash_cost(mut self, cost: HashCost) -> Result<Self, PasswordError> {
        self.password_hasher = PasswordHasher::with_cost(cost)?;
        Ok(self)
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue a token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Password verification failed
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject_id: &str,
        email: &str,
        role: Role,
    ) -> Result<TokenPair, AuthenticationError> {
        if !self.verify_password(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_tokens(subject_id, email, role)?)
    }

    /// Fail a login for an email that matches no identity.
    ///
    /// Spends one Argon2 hash on `password` first, so the response takes about
    /// as long as a wrong password for a known email.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        if let Err(e) = self.password_hasher.hash(password) {
            tracing::debug!(error = %e, "Equalizing hash failed");
        }

        AuthenticationError::InvalidCredentials
    }

    /// Issue a token pair without password verification.
    ///
    /// Used after registration and on refresh, where the caller has already
    /// established the identity by other means.
    pub fn issue_tokens(
        &self,
        subject_id: &str,
        email: &str,
        role: Role,
    ) -> Result<TokenPair, TokenError> {
        let access = self.access.issue(subject_id, email, role)?;
        let refresh = self.refresh.issue(subject_id, email, role)?;

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
        })
    }

    /// Validate a refresh token.
    pub fn verify_refresh_token(&self, token: &str) -> Result<AccessCredential, TokenError> {
        self.refresh.verify(token)
    }

    /// Request-time policy sharing this authenticator's access codec.
    pub fn access_policy(&self) -> AccessPolicy {
        self.policy.clone()
    }
}
