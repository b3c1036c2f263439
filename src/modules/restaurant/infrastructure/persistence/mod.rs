pub mod cuisine_repository_impl;
pub mod restaurant_repository_impl;

pub use cuisine_repository_impl::CuisineRepositoryImpl;
pub use restaurant_repository_impl::RestaurantRepositoryImpl;
