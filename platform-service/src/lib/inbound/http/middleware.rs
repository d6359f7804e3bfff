use auth::AccessCredential;
use auth::AccessPolicy;
use auth::Role;
use auth::RoleSet;
use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::identity::models::IdentityId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    pub identity_id: IdentityId,
    pub email: String,
    pub role: Role,
}

impl TryFrom<AccessCredential> for AuthenticatedIdentity {
    type Error = ApiError;

    fn try_from(credential: AccessCredential) -> Result<Self, Self::Error> {
        let identity_id = IdentityId::from_string(&credential.subject_id).map_err(|e| {
            tracing::warn!("Failed to parse identity ID from token: {}", e);
            ApiError::Unauthorized("Invalid token format".to_string())
        })?;
        let role = credential
            .role
            .ok_or_else(|| ApiError::Unauthorized("Invalid token format".to_string()))?;

        Ok(Self {
            identity_id,
            email: credential.email,
            role,
        })
    }
}

/// Role gate state: the policy to verify with and the roles a route accepts.
#[derive(Debug, Clone)]
pub struct RoleGate {
    pub policy: AccessPolicy,
    pub required: RoleSet,
}

impl RoleGate {
    pub fn new(policy: AccessPolicy, required: RoleSet) -> Self {
        Self { policy, required }
    }
}

/// Middleware that validates the bearer token and adds the caller to request
/// extensions. Any role is accepted.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let credential = state.access_policy.authenticate(token)?;
    let caller = AuthenticatedIdentity::try_from(credential)?;

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

/// Middleware that admits only callers whose role is in the gate's set.
pub async fn require_roles(
    State(gate): State<RoleGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let credential = gate.policy.enforce(token, &gate.required).map_err(|e| {
        tracing::warn!(required = %gate.required, "Access denied: {}", e);
        ApiError::from(e)
    })?;
    let caller = AuthenticatedIdentity::try_from(credential)?;

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}
