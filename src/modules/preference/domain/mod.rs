pub mod entities;
pub mod repositories;

pub use entities::UserPreference;
pub use repositories::{PreferenceRepository, PreferenceUpdate};

#[cfg(test)]
pub use repositories::MockPreferenceRepository;
