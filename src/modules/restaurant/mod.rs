pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{CuisineService, ListQuery, RestaurantService};
pub use domain::entities::{Cuisine, GeoPoint, Restaurant};
pub use infrastructure::{CuisineRepositoryImpl, RestaurantRepositoryImpl};
