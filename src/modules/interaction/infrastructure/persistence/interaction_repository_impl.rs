use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use tokio::task;
use uuid::Uuid;

use crate::infrastructure::database::models::{InteractionModel, NewInteraction};
use crate::infrastructure::database::schema::user_restaurant_interactions as interactions;
use crate::infrastructure::database::Database;
use crate::modules::interaction::domain::entities::Interaction;
use crate::modules::interaction::domain::repositories::InteractionRepository;
use crate::modules::interaction::domain::value_objects::LikeStatus;
use crate::shared::errors::AppResult;

pub struct InteractionRepositoryImpl {
    db: Arc<Database>,
}

impl InteractionRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn model_to_entity(model: InteractionModel) -> Interaction {
        Interaction {
            id: model.id,
            user_id: model.user_id,
            restaurant_id: model.restaurant_id,
            like_status: LikeStatus::from_db(model.liked),
            visited: model.visited,
            user_rating: model.user_rating,
            interaction_date: model.interaction_date,
        }
    }

    fn blank_row(user_id: Uuid, restaurant_id: Uuid) -> NewInteraction {
        NewInteraction {
            id: Uuid::new_v4(),
            user_id,
            restaurant_id,
            liked: None,
            visited: false,
            user_rating: None,
        }
    }
}

#[async_trait]
impl InteractionRepository for InteractionRepositoryImpl {
    async fn find(
        &self,
        user_id: &Uuid,
        restaurant_id: &Uuid,
    ) -> AppResult<Option<Interaction>> {
        let db = Arc::clone(&self.db);
        let user_id = *user_id;
        let restaurant_id = *restaurant_id;

        task::spawn_blocking(move || -> AppResult<Option<Interaction>> {
            let mut conn = db.get_connection()?;
            let row = interactions::table
                .filter(interactions::user_id.eq(user_id))
                .filter(interactions::restaurant_id.eq(restaurant_id))
                .first::<InteractionModel>(&mut conn)
                .optional()?;
            Ok(row.map(Self::model_to_entity))
        })
        .await?
    }

    async fn upsert_like(
        &self,
        user_id: &Uuid,
        restaurant_id: &Uuid,
        status: LikeStatus,
    ) -> AppResult<Interaction> {
        let db = Arc::clone(&self.db);
        let user_id = *user_id;
        let restaurant_id = *restaurant_id;

        task::spawn_blocking(move || -> AppResult<Interaction> {
            let mut conn = db.get_connection()?;
            let mut new_row = Self::blank_row(user_id, restaurant_id);
            new_row.liked = status.as_db();

            let row = diesel::insert_into(interactions::table)
                .values(&new_row)
                .on_conflict((interactions::user_id, interactions::restaurant_id))
                .do_update()
                .set((
                    interactions::liked.eq(status.as_db()),
                    interactions::interaction_date.eq(Utc::now()),
                ))
                .get_result::<InteractionModel>(&mut conn)?;

            Ok(Self::model_to_entity(row))
        })
        .await?
    }

    async fn upsert_visited(
        &self,
        user_id: &Uuid,
        restaurant_id: &Uuid,
        visited: bool,
    ) -> AppResult<Interaction> {
        let db = Arc::clone(&self.db);
        let user_id = *user_id;
        let restaurant_id = *restaurant_id;

        task::spawn_blocking(move || -> AppResult<Interaction> {
            let mut conn = db.get_connection()?;
            let mut new_row = Self::blank_row(user_id, restaurant_id);
            new_row.visited = visited;

            let row = diesel::insert_into(interactions::table)
                .values(&new_row)
                .on_conflict((interactions::user_id, interactions::restaurant_id))
                .do_update()
                .set((
                    interactions::visited.eq(visited),
                    interactions::interaction_date.eq(Utc::now()),
                ))
                .get_result::<InteractionModel>(&mut conn)?;

            Ok(Self::model_to_entity(row))
        })
        .await?
    }

    async fn upsert_rating(
        &self,
        user_id: &Uuid,
        restaurant_id: &Uuid,
        rating: i32,
    ) -> AppResult<Interaction> {
        let db = Arc::clone(&self.db);
        let user_id = *user_id;
        let restaurant_id = *restaurant_id;

        task::spawn_blocking(move || -> AppResult<Interaction> {
            let mut conn = db.get_connection()?;
            let mut new_row = Self::blank_row(user_id, restaurant_id);
            new_row.user_rating = Some(rating);

            let row = diesel::insert_into(interactions::table)
                .values(&new_row)
                .on_conflict((interactions::user_id, interactions::restaurant_id))
                .do_update()
                .set((
                    interactions::user_rating.eq(Some(rating)),
                    interactions::interaction_date.eq(Utc::now()),
                ))
                .get_result::<InteractionModel>(&mut conn)?;

            Ok(Self::model_to_entity(row))
        })
        .await?
    }
}
