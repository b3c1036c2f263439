pub mod preference_repository;

pub use preference_repository::{PreferenceRepository, PreferenceUpdate};

#[cfg(test)]
pub use preference_repository::MockPreferenceRepository;
