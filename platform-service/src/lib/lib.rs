pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::identity;
pub use domain::restaurant;
pub use outbound::repositories;
