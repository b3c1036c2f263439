pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::InteractionService;
pub use domain::{Interaction, InteractionRepository, LikeStatus};
pub use infrastructure::InteractionRepositoryImpl;
