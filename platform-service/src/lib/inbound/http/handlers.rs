use auth::PolicyError;
use auth::Role;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::identity::errors::AuthError;
use crate::domain::identity::models::AuthSession;
use crate::domain::identity::models::Identity;
use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::models::Restaurant;

pub mod health;
pub mod me;
pub mod restaurants;
pub mod sessions;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

/// Server-side failures are logged in full and reported generically.
fn internal_error(err: impl std::fmt::Display) -> ApiError {
    tracing::error!(error = %err, "Request failed");
    ApiError::InternalServerError("Internal server error".to_string())
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidIdentityId(_)
            | AuthError::InvalidEmail(_)
            | AuthError::InvalidPassword(_) => ApiError::UnprocessableEntity(err.to_string()),
            AuthError::DuplicateIdentity(_) => ApiError::Conflict(err.to_string()),
            AuthError::InvalidCredentials
            | AuthError::InvalidRefreshToken
            | AuthError::IdentityNotFound(_) => ApiError::Unauthorized(err.to_string()),
            AuthError::DataIntegrity(_) | AuthError::DatabaseError(_) | AuthError::Internal(_) => {
                internal_error(err)
            }
        }
    }
}

impl From<RestaurantError> for ApiError {
    fn from(err: RestaurantError) -> Self {
        match err {
            RestaurantError::InvalidRestaurantId(_)
            | RestaurantError::InvalidName(_)
            | RestaurantError::InvalidEmail(_) => ApiError::UnprocessableEntity(err.to_string()),
            RestaurantError::NotFound(_) => ApiError::NotFound(err.to_string()),
            RestaurantError::DataIntegrity(_) | RestaurantError::DatabaseError(_) => {
                internal_error(err)
            }
        }
    }
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::Unauthorized => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            PolicyError::Forbidden => ApiError::Forbidden("Insufficient permissions".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of an identity. The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityData {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Identity> for IdentityData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            email: identity.email.as_str().to_string(),
            name: identity.name.clone(),
            role: identity.role,
            created_at: identity.created_at,
            updated_at: identity.updated_at,
        }
    }
}

/// Payload returned by register, login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub user: IdentityData,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<AuthSession> for AuthResponseData {
    fn from(session: AuthSession) -> Self {
        Self {
            user: (&session.identity).into(),
            access_token: session.tokens.access_token,
            refresh_token: session.tokens.refresh_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestaurantData {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Restaurant> for RestaurantData {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id.to_string(),
            name: restaurant.name.as_str().to_string(),
            description: restaurant.description.clone(),
            address: restaurant.address.clone(),
            phone: restaurant.phone.clone(),
            email: restaurant.email.as_ref().map(|e| e.as_str().to_string()),
            image_url: restaurant.image_url.clone(),
            is_active: restaurant.is_active,
            created_at: restaurant.created_at,
            updated_at: restaurant.updated_at,
        }
    }
}
