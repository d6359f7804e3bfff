use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::domain::identity::models::EmailAddress;
use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::models::RestaurantId;
use crate::domain::restaurant::models::RestaurantName;
use crate::domain::restaurant::models::UpdateRestaurantCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::RestaurantData;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a restaurant (raw JSON). Absent fields are
/// left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRestaurantRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateRestaurantRequest {
    fn try_into_command(self) -> Result<UpdateRestaurantCommand, RestaurantError> {
        // Validation happens here - errors are converted via #[from]
        let name = self
            .name
            .as_deref()
            .map(RestaurantName::new)
            .transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(UpdateRestaurantCommand {
            name,
            description: self.description,
            address: self.address,
            phone: self.phone,
            email,
            image_url: self.image_url,
            is_active: self.is_active,
        })
    }
}

pub async fn update_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateRestaurantRequest>,
) -> Result<ApiSuccess<RestaurantData>, ApiError> {
    let restaurant_id = RestaurantId::from_string(&id).map_err(RestaurantError::from)?;
    let command = req.try_into_command()?;

    state
        .restaurant_service
        .update_restaurant(&restaurant_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref restaurant| ApiSuccess::new(StatusCode::OK, restaurant.into()))
}
