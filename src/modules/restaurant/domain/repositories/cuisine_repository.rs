use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::restaurant::domain::entities::Cuisine;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CuisineRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Cuisine>>;
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Cuisine>>;
}
