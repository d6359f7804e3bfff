use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::identity::models::EmailAddress;
use crate::domain::restaurant::errors::RestaurantError;
use crate::domain::restaurant::models::Restaurant;
use crate::domain::restaurant::models::RestaurantId;
use crate::domain::restaurant::models::RestaurantName;
use crate::domain::restaurant::ports::RestaurantRepository;

const SELECT_COLUMNS: &str = "id, name, description, address, phone, email, image_url, \
                              is_active, created_at, updated_at";

pub struct PostgresRestaurantRepository {
    pool: PgPool,
}

impl PostgresRestaurantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RestaurantRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    image_url: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RestaurantRow> for Restaurant {
    type Error = RestaurantError;

    fn try_from(row: RestaurantRow) -> Result<Self, Self::Error> {
        let name = RestaurantName::new(&row.name)
            .map_err(|e| RestaurantError::DataIntegrity(e.to_string()))?;
        let email = row
            .email
            .map(EmailAddress::new)
            .transpose()
            .map_err(|e| RestaurantError::DataIntegrity(e.to_string()))?;

        Ok(Restaurant {
            id: RestaurantId(row.id),
            name,
            description: row.description,
            address: row.address,
            phone: row.phone,
            email,
            image_url: row.image_url,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> RestaurantError {
    RestaurantError::DatabaseError(e.to_string())
}

#[async_trait]
impl RestaurantRepository for PostgresRestaurantRepository {
    async fn create(&self, restaurant: Restaurant) -> Result<Restaurant, RestaurantError> {
        let query = format!(
            r#"
            INSERT INTO restaurants (id, name, description, address, phone, email, image_url, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {SELECT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, RestaurantRow>(&query)
            .bind(restaurant.id.0)
            .bind(restaurant.name.as_str())
            .bind(restaurant.description.as_deref())
            .bind(restaurant.address.as_deref())
            .bind(restaurant.phone.as_deref())
            .bind(restaurant.email.as_ref().map(EmailAddress::as_str))
            .bind(restaurant.image_url.as_deref())
            .bind(restaurant.is_active)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?
            .try_into()
    }

    async fn find_by_id(&self, id: &RestaurantId) -> Result<Option<Restaurant>, RestaurantError> {
        let query = format!("SELECT {SELECT_COLUMNS} FROM restaurants WHERE id = $1");

        sqlx::query_as::<_, RestaurantRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(Restaurant::try_from)
            .transpose()
    }

    async fn list(
        &self,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Restaurant>, i64), RestaurantError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM restaurants")
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        let query = format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM restaurants
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        );

        let items = sqlx::query_as::<_, RestaurantRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?
            .into_iter()
            .map(Restaurant::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((items, total))
    }

    async fn update(&self, restaurant: Restaurant) -> Result<Restaurant, RestaurantError> {
        let query = format!(
            r#"
            UPDATE restaurants
            SET name = $1,
                description = $2,
                address = $3,
                phone = $4,
                email = $5,
                image_url = $6,
                is_active = $7,
                updated_at = $8
            WHERE id = $9
            RETURNING {SELECT_COLUMNS}
            "#
        );

        sqlx::query_as::<_, RestaurantRow>(&query)
            .bind(restaurant.name.as_str())
            .bind(restaurant.description.as_deref())
            .bind(restaurant.address.as_deref())
            .bind(restaurant.phone.as_deref())
            .bind(restaurant.email.as_ref().map(EmailAddress::as_str))
            .bind(restaurant.image_url.as_deref())
            .bind(restaurant.is_active)
            .bind(restaurant.updated_at)
            .bind(restaurant.id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .ok_or(RestaurantError::NotFound(restaurant.id.to_string()))?
            .try_into()
    }

    async fn delete(&self, id: &RestaurantId) -> Result<(), RestaurantError> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(RestaurantError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
