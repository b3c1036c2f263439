pub mod cuisine_service;
pub mod restaurant_service;

pub use cuisine_service::CuisineService;
pub use restaurant_service::{ListQuery, RestaurantService};
