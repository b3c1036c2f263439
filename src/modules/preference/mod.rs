pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::PreferenceService;
pub use domain::{PreferenceRepository, PreferenceUpdate, UserPreference};
pub use infrastructure::PreferenceRepositoryImpl;
