use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::models::RestaurantId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::RestaurantData;
use crate::inbound::http::router::AppState;

pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<RestaurantData>, ApiError> {
    let restaurant_id = RestaurantId::from_string(&id).map_err(RestaurantError::from)?;

    state
        .restaurant_service
        .get_restaurant(&restaurant_id)
        .await
        .map_err(ApiError::from)
        .map(|ref restaurant| ApiSuccess::new(StatusCode::OK, restaurant.into()))
}
