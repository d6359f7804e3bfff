use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::models::RestaurantId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let restaurant_id = RestaurantId::from_string(&id).map_err(RestaurantError::from)?;

    state
        .restaurant_service
        .delete_restaurant(&restaurant_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
