pub mod persistence;

pub use persistence::{CuisineRepositoryImpl, RestaurantRepositoryImpl};
