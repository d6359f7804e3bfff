use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::errors::PasswordPolicyError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::LoginCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::AuthResponseData;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    state
        .auth_service
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, AuthError> {
        let email = EmailAddress::new(self.email)?;
        if self.password.is_empty() {
            return Err(PasswordPolicyError::Missing.into());
        }
        Ok(LoginCommand {
            email,
            password: self.password,
        })
    }
}
