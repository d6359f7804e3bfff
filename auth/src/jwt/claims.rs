use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::errors::TokenError;
use crate::role::Role;

/// Token family. Each family is signed with its own secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims carried by every credential this crate issues.
///
/// Standard RFC 7519 fields plus `email`, `role` and the token family `typ`.
/// `role` is only present on access tokens; refresh tokens are re-checked
/// against the identity store when they are used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (identity identifier)
    pub sub: String,

    /// Denormalized email, informational only
    pub email: String,

    /// Role at issuance time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Token family
    pub typ: TokenKind,

    /// JWT ID (unique token identifier)
    pub jti: String,
}

impl Claims {
    /// Create claims for an identity, valid from `now` for `ttl`.
    ///
    /// # Arguments
    /// * `kind` - Token family; the role is dropped for refresh tokens
    /// * `subject` - Identity identifier
    /// * `email` - Identity email
    /// * `role` - Current role of the identity
    /// * `now` - Issuance instant
    /// * `ttl` - Lifetime of the token
    ///
    /// # Errors
    /// * `EncodingFailed` - `now + ttl` falls outside the representable range
    pub fn for_identity(
        kind: TokenKind,
        subject: impl ToString,
        email: impl ToString,
        role: Role,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let role = match kind {
            TokenKind::Access => Some(role),
            TokenKind::Refresh => None,
        };

        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            TokenError::EncodingFailed(format!("expiry out of range: {} + {}", now, ttl))
        })?;

        Ok(Self {
            sub: subject.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            typ: kind,
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Check if the token is expired at `current_timestamp`.
    ///
    /// A token stops being valid at the instant `exp` itself.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_access_claims_carry_role() {
        let claims = Claims::for_identity(
            TokenKind::Access,
            "id-1",
            "alice@example.com",
            Role::Admin,
            instant(),
            Duration::minutes(15),
        )
        .unwrap();

        assert_eq!(claims.sub, "id-1");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, Some(Role::Admin));
        assert_eq!(claims.typ, TokenKind::Access);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn test_refresh_claims_omit_role() {
        let claims = Claims::for_identity(
            TokenKind::Refresh,
            "id-1",
            "alice@example.com",
            Role::Admin,
            instant(),
            Duration::hours(168),
        )
        .unwrap();

        assert_eq!(claims.role, None);
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("role").is_none());
        assert_eq!(json["typ"], "refresh");
    }

    #[test]
    fn test_each_claims_get_unique_jti() {
        let a = Claims::for_identity(
            TokenKind::Access,
            "id",
            "a@example.com",
            Role::User,
            instant(),
            Duration::minutes(1),
        )
        .unwrap();
        let b = Claims::for_identity(
            TokenKind::Access,
            "id",
            "a@example.com",
            Role::User,
            instant(),
            Duration::minutes(1),
        )
        .unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_expiry_past_calendar_range_is_an_error() {
        let result = Claims::for_identity(
            TokenKind::Refresh,
            "id",
            "a@example.com",
            Role::User,
            instant(),
            Duration::hours(2_500_000_000),
        );
        assert!(matches!(result, Err(TokenError::EncodingFailed(_))));
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::for_identity(
            TokenKind::Access,
            "id",
            "a@example.com",
            Role::User,
            instant(),
            Duration::seconds(10),
        )
        .unwrap();
        let exp = claims.exp;

        assert!(!claims.is_expired(exp - 1)); // Not expired
        assert!(claims.is_expired(exp)); // Exactly at expiration
        assert!(claims.is_expired(exp + 1)); // Expired
    }
}
