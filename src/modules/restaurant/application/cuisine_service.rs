use std::sync::Arc;

use uuid::Uuid;

use crate::modules::restaurant::domain::entities::Cuisine;
use crate::modules::restaurant::domain::repositories::CuisineRepository;
use crate::shared::errors::{AppError, AppResult};

pub struct CuisineService {
    cuisines: Arc<dyn CuisineRepository>,
}

impl CuisineService {
    pub fn new(cuisines: Arc<dyn CuisineRepository>) -> Self {
        Self { cuisines }
    }

    pub async fn list_cuisines(&self) -> AppResult<Vec<Cuisine>> {
        self.cuisines.list().await
    }

    pub async fn get_cuisine(&self, id: &Uuid) -> AppResult<Cuisine> {
        self.cuisines
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Cuisine {} not found", id)))
    }
}
