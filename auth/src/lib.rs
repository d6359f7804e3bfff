//! Credential and access-control library
//!
//! Provides the stateless authentication core used by the platform service:
//! - Password hashing (Argon2id)
//! - Signed, time-bounded access and refresh tokens (HS256 JWT), each family
//!   under its own secret
//! - Role-based access policy with exact role-set membership
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Tokens and access policy
//! ```
//! use auth::{Authenticator, PolicyError, Role, RoleSet, TokenSettings};
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(&TokenSettings {
//!     access_secret: b"access_secret_key_at_least_32_bytes!".to_vec(),
//!     refresh_secret: b"refresh_secret_key_at_least_32_bytes".to_vec(),
//!     access_ttl: Duration::minutes(15),
//!     refresh_ttl: Duration::hours(168),
//! })
//! .unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate tokens
//! let tokens = auth
//!     .authenticate("password123", &hash, "user123", "alice@example.com", Role::User)
//!     .unwrap();
//!
//! // Per request: authenticate and authorize
//! let policy = auth.access_policy();
//! let credential = policy.enforce(&tokens.access_token, &RoleSet::any()).unwrap();
//! assert_eq!(credential.role, Some(Role::User));
//!
//! let admin_only = RoleSet::of([Role::Admin]);
//! assert_eq!(
//!     policy.enforce(&tokens.access_token, &admin_only).unwrap_err(),
//!     PolicyError::Forbidden
//! );
//! ```

pub mod authenticator;
pub mod codec;
pub mod jwt;
pub mod password;
pub mod policy;
pub mod role;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use authenticator::TokenSettings;
pub use codec::AccessCredential;
pub use codec::CredentialCodec;
pub use codec::IssuedToken;
pub use jwt::Claims;
pub use jwt::JwtHandler;
pub use jwt::KeyError;
pub use jwt::TokenError;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::HashCost;
pub use password::PasswordHasher;
pub use policy::AccessPolicy;
pub use policy::PolicyError;
pub use role::Role;
pub use role::RoleSet;
pub use role::UnknownRole;
