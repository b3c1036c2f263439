use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;
use uuid::Uuid;

use crate::infrastructure::database::models::{
    NewUserPreference, NewUserPreferenceCuisine, UserPreferenceChangeset, UserPreferenceModel,
};
use crate::infrastructure::database::schema::{
    cuisines, user_preference_cuisines, user_preferences, user_profiles,
};
use crate::infrastructure::database::Database;
use crate::modules::preference::domain::entities::UserPreference;
use crate::modules::preference::domain::repositories::{PreferenceRepository, PreferenceUpdate};
use crate::modules::restaurant::domain::entities::Cuisine;
use crate::modules::restaurant::domain::value_objects::Persona;
use crate::shared::errors::AppResult;

pub struct PreferenceRepositoryImpl {
    db: Arc<Database>,
}

impl PreferenceRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert-if-missing then read back. ON CONFLICT DO NOTHING makes the
    /// race between concurrent first requests harmless.
    fn get_or_create_blocking(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> AppResult<UserPreference> {
        diesel::insert_into(user_preferences::table)
            .values(&NewUserPreference {
                id: Uuid::new_v4(),
                user_id,
                preferred_price_level: None,
                preferred_rating: None,
            })
            .on_conflict(user_preferences::user_id)
            .do_nothing()
            .execute(conn)?;

        let model = user_preferences::table
            .filter(user_preferences::user_id.eq(user_id))
            .first::<UserPreferenceModel>(conn)?;

        let favorite_cuisines = user_preference_cuisines::table
            .inner_join(cuisines::table)
            .filter(user_preference_cuisines::preference_id.eq(model.id))
            .select(cuisines::all_columns)
            .order(cuisines::name.asc())
            .load::<crate::infrastructure::database::models::CuisineModel>(conn)?
            .into_iter()
            .map(|c| Cuisine {
                id: c.id,
                name: c.name,
            })
            .collect();

        Ok(UserPreference {
            id: model.id,
            user_id: model.user_id,
            preferred_price_level: model.preferred_price_level,
            preferred_rating: model.preferred_rating,
            favorite_cuisines,
        })
    }
}

#[async_trait]
impl PreferenceRepository for PreferenceRepositoryImpl {
    async fn get_or_create(&self, user_id: &Uuid) -> AppResult<UserPreference> {
        let db = Arc::clone(&self.db);
        let user_id = *user_id;

        task::spawn_blocking(move || -> AppResult<UserPreference> {
            let mut conn = db.get_connection()?;
            Self::get_or_create_blocking(&mut conn, user_id)
        })
        .await?
    }

    async fn update(
        &self,
        user_id: &Uuid,
        update: PreferenceUpdate,
    ) -> AppResult<UserPreference> {
        let db = Arc::clone(&self.db);
        let user_id = *user_id;

        task::spawn_blocking(move || -> AppResult<UserPreference> {
            let mut conn = db.get_connection()?;

            let current = Self::get_or_create_blocking(&mut conn, user_id)?;

            // An empty changeset is a diesel error, not a no-op.
            if update.preferred_price_level.is_none() && update.preferred_rating.is_none() {
                return Ok(current);
            }

            diesel::update(user_preferences::table.filter(user_preferences::id.eq(current.id)))
                .set(&UserPreferenceChangeset {
                    preferred_price_level: update.preferred_price_level,
                    preferred_rating: update.preferred_rating,
                })
                .execute(&mut conn)?;

            Self::get_or_create_blocking(&mut conn, user_id)
        })
        .await?
    }

    async fn add_favorite_cuisine(
        &self,
        user_id: &Uuid,
        cuisine_id: &Uuid,
    ) -> AppResult<UserPreference> {
        let db = Arc::clone(&self.db);
        let user_id = *user_id;
        let cuisine_id = *cuisine_id;

        task::spawn_blocking(move || -> AppResult<UserPreference> {
            let mut conn = db.get_connection()?;

            let current = Self::get_or_create_blocking(&mut conn, user_id)?;

            diesel::insert_into(user_preference_cuisines::table)
                .values(&NewUserPreferenceCuisine {
                    preference_id: current.id,
                    cuisine_id,
                })
                .on_conflict_do_nothing()
                .execute(&mut conn)?;

            Self::get_or_create_blocking(&mut conn, user_id)
        })
        .await?
    }

    async fn remove_favorite_cuisine(
        &self,
        user_id: &Uuid,
        cuisine_id: &Uuid,
    ) -> AppResult<UserPreference> {
        let db = Arc::clone(&self.db);
        let user_id = *user_id;
        let cuisine_id = *cuisine_id;

        task::spawn_blocking(move || -> AppResult<UserPreference> {
            let mut conn = db.get_connection()?;

            let current = Self::get_or_create_blocking(&mut conn, user_id)?;

            diesel::delete(
                user_preference_cuisines::table
                    .filter(user_preference_cuisines::preference_id.eq(current.id))
                    .filter(user_preference_cuisines::cuisine_id.eq(cuisine_id)),
            )
            .execute(&mut conn)?;

            Self::get_or_create_blocking(&mut conn, user_id)
        })
        .await?
    }

    async fn persona_of(&self, user_id: &Uuid) -> AppResult<Option<Persona>> {
        let db = Arc::clone(&self.db);
        let user_id = *user_id;

        task::spawn_blocking(move || -> AppResult<Option<Persona>> {
            let mut conn = db.get_connection()?;

            let code: Option<Option<String>> = user_profiles::table
                .filter(user_profiles::user_id.eq(user_id))
                .select(user_profiles::persona)
                .first::<Option<String>>(&mut conn)
                .optional()?;

            Ok(code.flatten().and_then(|code| match code.parse::<Persona>() {
                Ok(persona) => Some(persona),
                Err(()) => {
                    tracing::warn!(%user_id, "Unknown persona code in profile: {:?}", code);
                    None
                }
            }))
        })
        .await?
    }
}
