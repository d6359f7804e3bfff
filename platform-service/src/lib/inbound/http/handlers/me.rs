use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::IdentityData;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn me(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    state
        .auth_service
        .current_identity(&caller.identity_id)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}
