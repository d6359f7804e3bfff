use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::models::CreateRestaurantCommand;
use crate::domain::restaurant::models::PageRequest;
use crate::domain::restaurant::models::Restaurant;
use crate::domain::restaurant::models::RestaurantId;
use crate::domain::restaurant::models::RestaurantPage;
use crate::domain::restaurant::models::UpdateRestaurantCommand;
use crate::domain::restaurant::ports::RestaurantRepository;
use crate::domain::restaurant::ports::RestaurantServicePort;

/// Domain service implementation for restaurant operations.
pub struct RestaurantService<RR>
where
    RR: RestaurantRepository,
{
    repository: Arc<RR>,
}

impl<RR> RestaurantService<RR>
where
    RR: RestaurantRepository,
{
    pub fn new(repository: Arc<RR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<RR> RestaurantServicePort for RestaurantService<RR>
where
    RR: RestaurantRepository,
{
    async fn create_restaurant(
        &self,
        command: CreateRestaurantCommand,
    ) -> Result<Restaurant, RestaurantError> {
        let now = Utc::now();
        let restaurant = Restaurant {
            id: RestaurantId::new(),
            name: command.name,
            description: command.description,
            address: command.address,
            phone: command.phone,
            email: command.email,
            image_url: command.image_url,
            is_active: command.is_active,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(restaurant).await?;
        tracing::info!(restaurant_id = %created.id, "Restaurant created");

        Ok(created)
    }

    async fn get_restaurant(&self, id: &RestaurantId) -> Result<Restaurant, RestaurantError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(RestaurantError::NotFound(id.to_string()))
    }

    async fn list_restaurants(&self, page: PageRequest) -> Result<RestaurantPage, RestaurantError> {
        let (items, total) = self.repository.list(page.limit(), page.offset()).await?;

        Ok(RestaurantPage {
            items,
            total,
            page: page.page(),
            page_size: page.page_size(),
        })
    }

    async fn update_restaurant(
        &self,
        id: &RestaurantId,
        command: UpdateRestaurantCommand,
    ) -> Result<Restaurant, RestaurantError> {
        let mut restaurant = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(RestaurantError::NotFound(id.to_string()))?;

        command.apply_to(&mut restaurant);
        restaurant.updated_at = Utc::now();

        self.repository.update(restaurant).await
    }

    async fn delete_restaurant(&self, id: &RestaurantId) -> Result<(), RestaurantError> {
        self.repository.delete(id).await?;
        tracing::info!(restaurant_id = %id, "Restaurant deleted");

        Ok(())
    }
}
