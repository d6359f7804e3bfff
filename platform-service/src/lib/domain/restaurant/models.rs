use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::identity::models::EmailAddress;
use crate::domain::restaurant::errors::RestaurantIdError;
use crate::domain::restaurant::errors::RestaurantNameError;

/// Restaurant aggregate entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: RestaurantName,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<EmailAddress>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Restaurant unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RestaurantId(pub Uuid);

impl RestaurantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a restaurant ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, RestaurantIdError> {
        Uuid::parse_str(s)
            .map(RestaurantId)
            .map_err(|e| RestaurantIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for RestaurantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Restaurant display name.
///
/// Surrounding whitespace is trimmed; the result must be non-empty and at
/// most 255 characters (the column width).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantName(String);

impl RestaurantName {
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `Empty` - Name is blank
    /// * `TooLong` - Name exceeds 255 characters
    pub fn new(raw: &str) -> Result<Self, RestaurantNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RestaurantNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(RestaurantNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RestaurantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new restaurant
#[derive(Debug, Clone)]
pub struct CreateRestaurantCommand {
    pub name: RestaurantName,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<EmailAddress>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

/// Command to update an existing restaurant. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateRestaurantCommand {
    pub name: Option<RestaurantName>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<EmailAddress>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateRestaurantCommand {
    /// Overwrite the fields present in this command.
    pub fn apply_to(self, restaurant: &mut Restaurant) {
        if let Some(name) = self.name {
            restaurant.name = name;
        }
        if let Some(description) = self.description {
            restaurant.description = Some(description);
        }
        if let Some(address) = self.address {
            restaurant.address = Some(address);
        }
        if let Some(phone) = self.phone {
            restaurant.phone = Some(phone);
        }
        if let Some(email) = self.email {
            restaurant.email = Some(email);
        }
        if let Some(image_url) = self.image_url {
            restaurant.image_url = Some(image_url);
        }
        if let Some(is_active) = self.is_active {
            restaurant.is_active = is_active;
        }
    }
}

/// Normalized pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    pub const DEFAULT_PAGE_SIZE: i64 = 10;
    pub const MAX_PAGE_SIZE: i64 = 100;

    /// Missing or non-positive values fall back to page 1 and the default
    /// page size; oversized pages are capped.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let page_size = page_size
            .filter(|s| *s >= 1)
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .min(Self::MAX_PAGE_SIZE);

        Self { page, page_size }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of restaurants, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantPage {
    pub items: Vec<Restaurant>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant() -> Restaurant {
        let now = Utc::now();
        Restaurant {
            id: RestaurantId::new(),
            name: RestaurantName::new("Trattoria").unwrap(),
            description: Some("Pasta".to_string()),
            address: None,
            phone: None,
            email: None,
            image_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_name_is_trimmed_and_required() {
        assert_eq!(RestaurantName::new("  Bistro ").unwrap().as_str(), "Bistro");
        assert_eq!(RestaurantName::new("   "), Err(RestaurantNameError::Empty));
        assert_eq!(
            RestaurantName::new(&"a".repeat(256)),
            Err(RestaurantNameError::TooLong {
                max: 255,
                actual: 256
            })
        );
        assert!(RestaurantName::new(&"a".repeat(255)).is_ok());
    }

    #[test]
    fn test_page_request_normalization() {
        let page = PageRequest::new(Some(0), Some(0));
        assert_eq!((page.page(), page.page_size()), (1, 10));

        let page = PageRequest::new(Some(-3), None);
        assert_eq!((page.page(), page.page_size()), (1, 10));

        let page = PageRequest::new(Some(3), Some(1000));
        assert_eq!(page.page_size(), 100);
        assert_eq!(page.offset(), 200);

        let page = PageRequest::new(Some(2), Some(25));
        assert_eq!((page.limit(), page.offset()), (25, 25));
    }

    #[test]
    fn test_partial_update_leaves_absent_fields() {
        let mut target = restaurant();
        let original = target.clone();

        UpdateRestaurantCommand {
            phone: Some("+39 06 1234".to_string()),
            is_active: Some(false),
            ..Default::default()
        }
        .apply_to(&mut target);

        assert_eq!(target.name, original.name);
        assert_eq!(target.description, original.description);
        assert_eq!(target.phone.as_deref(), Some("+39 06 1234"));
        assert!(!target.is_active);
    }
}
