pub mod create_restaurant;
pub mod delete_restaurant;
pub mod get_restaurant;
pub mod list_restaurants;
pub mod update_restaurant;

pub use create_restaurant::create_restaurant;
pub use delete_restaurant::delete_restaurant;
pub use get_restaurant::get_restaurant;
pub use list_restaurants::list_restaurants;
pub use update_restaurant::update_restaurant;
