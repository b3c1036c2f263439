pub mod config;
pub mod errors;
pub mod pagination;
pub mod utils;

pub use config::Config;
pub use errors::{AppError, AppResult};
pub use pagination::{PaginatedResult, PaginationParams};
