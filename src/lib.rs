pub mod api;
pub mod infrastructure;
pub mod modules;
pub mod shared;

pub use shared::{AppError, AppResult};
