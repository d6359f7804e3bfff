use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

use crate::codec::AccessCredential;
use crate::codec::CredentialCodec;
use crate::jwt::KeyError;
use crate::jwt::TokenKind;
use crate::role::RoleSet;

/// Outcome of a rejected request at the enforcement boundary.
///
/// `Unauthorized` does not reveal whether the token was forged, expired or
/// malformed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,
}

/// Per-request authentication and role-based authorization.
///
/// Stateless: holds only the access-token codec and can be cloned freely
/// across request handlers.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    codec: CredentialCodec,
}

impl AccessPolicy {
    /// Create a policy over an access-token codec.
    ///
    /// # Errors
    /// * `WrongKind` - The codec issues refresh tokens, not access tokens
    pub fn new(codec: CredentialCodec) -> Result<Self, KeyError> {
        if codec.kind() != TokenKind::Access {
            return Err(KeyError::WrongKind {
                expected: TokenKind::Access.to_string(),
                actual: codec.kind().to_string(),
            });
        }
        Ok(Self { codec })
    }

    /// Verify a raw bearer token with the access secret.
    pub fn authenticate(&self, token: &str) -> Result<AccessCredential, PolicyError> {
        self.authenticate_at(token, Utc::now())
    }

    /// Verify a raw bearer token at `now`.
    ///
    /// Every verification failure maps to `Unauthorized`; an access token
    /// without a role claim is rejected the same way.
    pub fn authenticate_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessCredential, PolicyError> {
        let credential = self.codec.verify_at(token, now).map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            PolicyError::Unauthorized
        })?;

        if credential.role.is_none() {
            tracing::debug!(subject = %credential.subject_id, "Access token without role claim");
            return Err(PolicyError::Unauthorized);
        }

        Ok(credential)
    }

    /// Grant access iff the credential's role is a member of `required`.
    ///
    /// No hierarchy is applied.
    pub fn authorize(&self, credential: &AccessCredential, required: &RoleSet) -> bool {
        credential
            .role
            .is_some_and(|role| required.contains(role))
    }

    /// Authenticate and authorize in one step.
    pub fn enforce(&self, token: &str, required: &RoleSet) -> Result<AccessCredential, PolicyError> {
        let credential = self.authenticate(token)?;
        if self.authorize(&credential, required) {
            Ok(credential)
        } else {
            Err(PolicyError::Forbidden)
        }
    }
}
