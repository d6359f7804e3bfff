pub mod identity;
pub mod restaurant;

pub use identity::PostgresIdentityRepository;
pub use restaurant::PostgresRestaurantRepository;
