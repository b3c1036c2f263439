use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::preference::domain::entities::UserPreference;
use crate::modules::restaurant::domain::value_objects::Persona;
use crate::shared::errors::AppResult;

/// Partial update; `Some(None)` clears a field, `None` leaves it alone.
#[derive(Debug, Clone, Default)]
pub struct PreferenceUpdate {
    pub preferred_price_level: Option<Option<i32>>,
    pub preferred_rating: Option<Option<f32>>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Fetches the user's preference row, inserting an empty one first
    /// if none exists. Concurrent callers converge on the same row.
    async fn get_or_create(&self, user_id: &Uuid) -> AppResult<UserPreference>;
    async fn update(&self, user_id: &Uuid, update: PreferenceUpdate)
        -> AppResult<UserPreference>;
    async fn add_favorite_cuisine(
        &self,
        user_id: &Uuid,
        cuisine_id: &Uuid,
    ) -> AppResult<UserPreference>;
    async fn remove_favorite_cuisine(
        &self,
        user_id: &Uuid,
        cuisine_id: &Uuid,
    ) -> AppResult<UserPreference>;
    /// Persona from the user's profile row, if any has been assigned.
    async fn persona_of(&self, user_id: &Uuid) -> AppResult<Option<Persona>>;
}
