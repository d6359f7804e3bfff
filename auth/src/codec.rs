use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtHandler;
use crate::jwt::KeyError;
use crate::jwt::TokenError;
use crate::jwt::TokenKind;
use crate::role::Role;

/// Minimum accepted secret length for HS256 signing.
pub const MIN_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime.
pub const MAX_TTL_DAYS: i64 = 3650;

/// Credential reconstructed from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCredential {
    pub subject_id: String,
    pub email: String,
    /// Present on access tokens only.
    pub role: Option<Role>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub kind: TokenKind,
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies one family of tokens.
///
/// Each codec owns exactly one secret and one lifetime. Access and refresh
/// codecs are built from different secrets, so a token of one family never
/// verifies under the other.
#[derive(Debug, Clone)]
pub struct CredentialCodec {
    kind: TokenKind,
    ttl: Duration,
    handler: JwtHandler,
}

impl CredentialCodec {
    /// Create a codec for `kind` tokens.
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret shorter than 32 bytes
    /// * `InvalidTtl` - Lifetime is not positive or exceeds [`MAX_TTL_DAYS`]
    pub fn new(kind: TokenKind, secret: &[u8], ttl: Duration) -> Result<Self, KeyError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(KeyError::SecretTooShort {
                kind: kind.to_string(),
                min: MIN_SECRET_BYTES,
                actual: secret.len(),
            });
        }
        if ttl <= Duration::zero() || ttl > Duration::days(MAX_TTL_DAYS) {
            return Err(KeyError::InvalidTtl {
                kind: kind.to_string(),
                max_days: MAX_TTL_DAYS,
            });
        }

        Ok(Self {
            kind,
            ttl,
            handler: JwtHandler::new(secret),
        })
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token valid from now.
    pub fn issue(
        &self,
        subject_id: impl ToString,
        email: impl ToString,
        role: Role,
    ) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject_id, email, role, Utc::now())
    }

    /// Issue a token valid from `now` until `now + ttl`.
    ///
    /// The role is only embedded for access tokens.
    pub fn issue_at(
        &self,
        subject_id: impl ToString,
        email: impl ToString,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let claims = Claims::for_identity(self.kind, subject_id, email, role, now, self.ttl)?;
        let token = self.handler.encode(&claims)?;

        Ok(IssuedToken {
            token,
            expires_at: timestamp_to_datetime(claims.exp)?,
        })
    }

    /// Verify a token against the current time.
    pub fn verify(&self, token: &str) -> Result<AccessCredential, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token's signature, family and expiry at `now`.
    ///
    /// # Errors
    /// * `InvalidSignature` - Token was not signed with this codec's secret
    /// * `Expired` - `now` is at or past the token's expiry
    /// * `Malformed` - Token cannot be decoded, or belongs to the other family
    pub fn verify_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessCredential, TokenError> {
        let claims: Claims = self.handler.decode(token)?;

        if claims.typ != self.kind {
            return Err(TokenError::Malformed(format!(
                "expected {} token, got {}",
                self.kind, claims.typ
            )));
        }

        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(AccessCredential {
            subject_id: claims.sub,
            email: claims.email,
            role: claims.role,
            issued_at: timestamp_to_datetime(claims.iat)?,
            expires_at: timestamp_to_datetime(claims.exp)?,
            kind: claims.typ,
        })
    }
}

fn timestamp_to_datetime(timestamp: i64) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(timestamp, 0)
        .ok_or_else(|| TokenError::Malformed(format!("timestamp out of range: {}", timestamp)))
}
