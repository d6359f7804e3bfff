use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::restaurant::models::PageRequest;
use crate::domain::restaurant::models::RestaurantPage;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::RestaurantData;
use crate::inbound::http::router::AppState;

pub async fn list_restaurants(
    State(state): State<AppState>,
    Query(query): Query<ListRestaurantsQuery>,
) -> Result<ApiSuccess<RestaurantListData>, ApiError> {
    state
        .restaurant_service
        .list_restaurants(PageRequest::new(query.page, query.page_size))
        .await
        .map_err(ApiError::from)
        .map(|page| ApiSuccess::new(StatusCode::OK, page.into()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRestaurantsQuery {
    page: Option<i64>,
    page_size: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestaurantListData {
    pub items: Vec<RestaurantData>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl From<RestaurantPage> for RestaurantListData {
    fn from(page: RestaurantPage) -> Self {
        Self {
            items: page.items.iter().map(RestaurantData::from).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        }
    }
}
