pub mod cuisine_repository;
pub mod restaurant_repository;

pub use cuisine_repository::CuisineRepository;
pub use restaurant_repository::{
    RestaurantFilter, RestaurantRepository, RestaurantSort, SuggestionPredicate,
};

#[cfg(test)]
pub use cuisine_repository::MockCuisineRepository;
#[cfg(test)]
pub use restaurant_repository::MockRestaurantRepository;
