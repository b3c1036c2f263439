use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::interaction::domain::entities::Interaction;
use crate::modules::interaction::domain::value_objects::LikeStatus;
use crate::shared::errors::AppResult;

/// Persistence for the single (user, restaurant) interaction row. Every
/// upsert is atomic: concurrent writers race on the unique pair and the
/// loser updates the winner's row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionRepository: Send + Sync {
    async fn find(&self, user_id: &Uuid, restaurant_id: &Uuid)
        -> AppResult<Option<Interaction>>;
    async fn upsert_like(
        &self,
        user_id: &Uuid,
        restaurant_id: &Uuid,
        status: LikeStatus,
    ) -> AppResult<Interaction>;
    async fn upsert_visited(
        &self,
        user_id: &Uuid,
        restaurant_id: &Uuid,
        visited: bool,
    ) -> AppResult<Interaction>;
    async fn upsert_rating(
        &self,
        user_id: &Uuid,
        restaurant_id: &Uuid,
        rating: i32,
    ) -> AppResult<Interaction>;
}
