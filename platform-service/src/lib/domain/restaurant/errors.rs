use thiserror::Error;

use crate::domain::identity::errors::EmailError;

/// Error for RestaurantId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RestaurantIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for RestaurantName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RestaurantNameError {
    #[error("Name is required")]
    Empty,

    #[error("Name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all restaurant operations
#[derive(Debug, Clone, Error)]
pub enum RestaurantError {
    #[error("Invalid restaurant ID: {0}")]
    InvalidRestaurantId(#[from] RestaurantIdError),

    #[error("Invalid name: {0}")]
    InvalidName(#[from] RestaurantNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Restaurant not found: {0}")]
    NotFound(String),

    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
