use async_trait::async_trait;

use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::models::CreateRestaurantCommand;
use crate::domain::restaurant::models::PageRequest;
use crate::domain::restaurant::models::Restaurant;
use crate::domain::restaurant::models::RestaurantId;
use crate::domain::restaurant::models::RestaurantPage;
use crate::domain::restaurant::models::UpdateRestaurantCommand;

/// Port for restaurant management operations.
#[async_trait]
pub trait RestaurantServicePort: Send + Sync + 'static {
    /// Create a new restaurant.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_restaurant(
        &self,
        command: CreateRestaurantCommand,
    ) -> Result<Restaurant, RestaurantError>;

    /// Retrieve restaurant by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Restaurant does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_restaurant(&self, id: &RestaurantId) -> Result<Restaurant, RestaurantError>;

    /// List restaurants, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_restaurants(&self, page: PageRequest) -> Result<RestaurantPage, RestaurantError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - Restaurant does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_restaurant(
        &self,
        id: &RestaurantId,
        command: UpdateRestaurantCommand,
    ) -> Result<Restaurant, RestaurantError>;

    /// Delete a restaurant.
    ///
    /// # Errors
    /// * `NotFound` - Restaurant does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_restaurant(&self, id: &RestaurantId) -> Result<(), RestaurantError>;
}

/// Persistence operations for the restaurant aggregate.
#[async_trait]
pub trait RestaurantRepository: Send + Sync + 'static {
    async fn create(&self, restaurant: Restaurant) -> Result<Restaurant, RestaurantError>;

    async fn find_by_id(&self, id: &RestaurantId) -> Result<Option<Restaurant>, RestaurantError>;

    /// Returns one window of restaurants ordered by creation time descending,
    /// together with the total row count.
    async fn list(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Restaurant>, i64), RestaurantError>;

    /// Persist every mutable field of `restaurant`.
    ///
    /// # Errors
    /// * `NotFound` - Restaurant does not exist
    async fn update(&self, restaurant: Restaurant) -> Result<Restaurant, RestaurantError>;

    /// # Errors
    /// * `NotFound` - No row was deleted
    async fn delete(&self, id: &RestaurantId) -> Result<(), RestaurantError>;
}
