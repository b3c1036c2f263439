pub mod preference_service;

pub use preference_service::PreferenceService;
