use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;
use uuid::Uuid;

use crate::infrastructure::database::models::CuisineModel;
use crate::infrastructure::database::schema::cuisines;
use crate::infrastructure::database::Database;
use crate::modules::restaurant::domain::entities::Cuisine;
use crate::modules::restaurant::domain::repositories::CuisineRepository;
use crate::shared::errors::AppResult;

pub struct CuisineRepositoryImpl {
    db: Arc<Database>,
}

impl CuisineRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn model_to_entity(model: CuisineModel) -> Cuisine {
        Cuisine {
            id: model.id,
            name: model.name,
        }
    }
}

#[async_trait]
impl CuisineRepository for CuisineRepositoryImpl {
    async fn list(&self) -> AppResult<Vec<Cuisine>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Vec<Cuisine>> {
            let mut conn = db.get_connection()?;
            let rows = cuisines::table
                .order(cuisines::name.asc())
                .load::<CuisineModel>(&mut conn)?;
            Ok(rows.into_iter().map(Self::model_to_entity).collect())
        })
        .await?
    }

    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Cuisine>> {
        let db = Arc::clone(&self.db);
        let id = *id;

        task::spawn_blocking(move || -> AppResult<Option<Cuisine>> {
            let mut conn = db.get_connection()?;
            let row = cuisines::table
                .filter(cuisines::id.eq(id))
                .first::<CuisineModel>(&mut conn)
                .optional()?;
            Ok(row.map(Self::model_to_entity))
        })
        .await?
    }
}
