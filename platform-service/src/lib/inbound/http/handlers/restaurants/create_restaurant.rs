use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::identity::models::EmailAddress;
use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::models::CreateRestaurantCommand;
use crate::domain::restaurant::models::RestaurantName;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::RestaurantData;
use crate::inbound::http::router::AppState;

pub async fn create_restaurant(
    State(state): State<AppState>,
    Json(body): Json<CreateRestaurantRequest>,
) -> Result<ApiSuccess<RestaurantData>, ApiError> {
    state
        .restaurant_service
        .create_restaurant(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref restaurant| ApiSuccess::new(StatusCode::CREATED, restaurant.into()))
}

/// HTTP request body for creating a restaurant (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateRestaurantRequest {
    name: String,
    description: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    image_url: Option<String>,
    is_active: Option<bool>,
}

impl CreateRestaurantRequest {
    fn try_into_command(self) -> Result<CreateRestaurantCommand, RestaurantError> {
        let name = RestaurantName::new(&self.name)?;
        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(CreateRestaurantCommand {
            name,
            description: self.description,
            address: self.address,
            phone: self.phone,
            email,
            image_url: self.image_url,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}
