use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::restaurant::domain::entities::Cuisine;

/// A user's saved dining preferences. Created lazily with every field
/// unset; an all-unset preference narrows nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreference {
    pub id: Uuid,
    pub user_id: Uuid,
    pub preferred_price_level: Option<i32>,
    pub preferred_rating: Option<f32>,
    pub favorite_cuisines: Vec<Cuisine>,
}

impl UserPreference {
    /// True when no field would contribute a suggestion branch.
    pub fn is_unset(&self) -> bool {
        self.preferred_price_level.is_none()
            && self.preferred_rating.is_none()
            && self.favorite_cuisines.is_empty()
    }
}
