use std::sync::Arc;

use uuid::Uuid;

use crate::modules::interaction::domain::entities::Interaction;
use crate::modules::interaction::domain::repositories::InteractionRepository;
use crate::modules::interaction::domain::value_objects::LikeStatus;
use crate::modules::restaurant::domain::entities::Restaurant;
use crate::modules::restaurant::domain::repositories::{
    RestaurantFilter, RestaurantRepository, RestaurantSort,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::pagination::{PaginatedResult, PaginationParams};
use crate::shared::utils::Validator;

/// Records likes, visits and ratings against restaurants. All writes
/// land in the single per-(user, restaurant) interaction row.
pub struct InteractionService {
    interactions: Arc<dyn InteractionRepository>,
    restaurants: Arc<dyn RestaurantRepository>,
}

impl InteractionService {
    pub fn new(
        interactions: Arc<dyn InteractionRepository>,
        restaurants: Arc<dyn RestaurantRepository>,
    ) -> Self {
        Self {
            interactions,
            restaurants,
        }
    }

    async fn require_restaurant(&self, restaurant_id: &Uuid) -> AppResult<()> {
        if !self.restaurants.exists(restaurant_id).await? {
            return Err(AppError::NotFound(format!(
                "Restaurant {} not found",
                restaurant_id
            )));
        }
        Ok(())
    }

    pub async fn like(&self, user_id: &Uuid, restaurant_id: &Uuid) -> AppResult<Interaction> {
        self.require_restaurant(restaurant_id).await?;
        tracing::info!(%user_id, %restaurant_id, "Recording like");
        self.interactions
            .upsert_like(user_id, restaurant_id, LikeStatus::Liked)
            .await
    }

    /// An unlike is an explicit dislike, not a reset to unknown; disliked
    /// restaurants drop out of suggestions.
    pub async fn unlike(&self, user_id: &Uuid, restaurant_id: &Uuid) -> AppResult<Interaction> {
        self.require_restaurant(restaurant_id).await?;
        tracing::info!(%user_id, %restaurant_id, "Recording dislike");
        self.interactions
            .upsert_like(user_id, restaurant_id, LikeStatus::Disliked)
            .await
    }

    pub async fn mark_visited(
        &self,
        user_id: &Uuid,
        restaurant_id: &Uuid,
    ) -> AppResult<Interaction> {
        self.require_restaurant(restaurant_id).await?;
        tracing::info!(%user_id, %restaurant_id, "Marking visited");
        self.interactions
            .upsert_visited(user_id, restaurant_id, true)
            .await
    }

    pub async fn rate(
        &self,
        user_id: &Uuid,
        restaurant_id: &Uuid,
        rating: i32,
    ) -> AppResult<Interaction> {
        Validator::validate_user_rating(rating)?;
        self.require_restaurant(restaurant_id).await?;
        tracing::info!(%user_id, %restaurant_id, rating, "Recording rating");
        self.interactions
            .upsert_rating(user_id, restaurant_id, rating)
            .await
    }

    pub async fn find(
        &self,
        user_id: &Uuid,
        restaurant_id: &Uuid,
    ) -> AppResult<Option<Interaction>> {
        self.interactions.find(user_id, restaurant_id).await
    }

    pub async fn liked_restaurants(
        &self,
        user_id: &Uuid,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Restaurant>> {
        Validator::validate_pagination(pagination.offset(), pagination.limit())?;
        let filter = RestaurantFilter {
            liked_by: Some(*user_id),
            ..Default::default()
        };
        let (items, total) = self
            .restaurants
            .list(
                filter,
                RestaurantSort::default(),
                None,
                pagination.offset(),
                pagination.limit(),
            )
            .await?;
        Ok(PaginatedResult::new(items, total as u64, &pagination))
    }

    pub async fn visited_restaurants(
        &self,
        user_id: &Uuid,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Restaurant>> {
        Validator::validate_pagination(pagination.offset(), pagination.limit())?;
        let filter = RestaurantFilter {
            visited_by: Some(*user_id),
            ..Default::default()
        };
        let (items, total) = self
            .restaurants
            .list(
                filter,
                RestaurantSort::default(),
                None,
                pagination.offset(),
                pagination.limit(),
            )
            .await?;
        Ok(PaginatedResult::new(items, total as u64, &pagination))
    }
}
