pub mod restaurant;

pub use restaurant::{Cuisine, GeoPoint, Restaurant};
