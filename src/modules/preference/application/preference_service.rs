use std::sync::Arc;

use uuid::Uuid;

use crate::modules::preference::domain::entities::UserPreference;
use crate::modules::preference::domain::repositories::{PreferenceRepository, PreferenceUpdate};
use crate::modules::restaurant::domain::repositories::CuisineRepository;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

pub struct PreferenceService {
    preferences: Arc<dyn PreferenceRepository>,
    cuisines: Arc<dyn CuisineRepository>,
}

impl PreferenceService {
    pub fn new(
        preferences: Arc<dyn PreferenceRepository>,
        cuisines: Arc<dyn CuisineRepository>,
    ) -> Self {
        Self {
            preferences,
            cuisines,
        }
    }

    pub async fn get_preferences(&self, user_id: &Uuid) -> AppResult<UserPreference> {
        self.preferences.get_or_create(user_id).await
    }

    pub async fn update_preferences(
        &self,
        user_id: &Uuid,
        update: PreferenceUpdate,
    ) -> AppResult<UserPreference> {
        if let Some(Some(price_level)) = update.preferred_price_level {
            Validator::validate_price_level(price_level)?;
        }
        if let Some(Some(rating)) = update.preferred_rating {
            Validator::validate_rating(rating)?;
        }
        tracing::info!(%user_id, "Updating preferences");
        self.preferences.update(user_id, update).await
    }

    pub async fn add_favorite_cuisine(
        &self,
        user_id: &Uuid,
        cuisine_id: &Uuid,
    ) -> AppResult<UserPreference> {
        if self.cuisines.find_by_id(cuisine_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Cuisine {} not found",
                cuisine_id
            )));
        }
        self.preferences
            .add_favorite_cuisine(user_id, cuisine_id)
            .await
    }

    pub async fn remove_favorite_cuisine(
        &self,
        user_id: &Uuid,
        cuisine_id: &Uuid,
    ) -> AppResult<UserPreference> {
        if self.cuisines.find_by_id(cuisine_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Cuisine {} not found",
                cuisine_id
            )));
        }
        self.preferences
            .remove_favorite_cuisine(user_id, cuisine_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::preference::domain::repositories::MockPreferenceRepository;
    use crate::modules::restaurant::domain::entities::Cuisine;
    use crate::modules::restaurant::domain::repositories::MockCuisineRepository;

    fn empty_preference(user_id: Uuid) -> UserPreference {
        UserPreference {
            id: Uuid::new_v4(),
            user_id,
            preferred_price_level: None,
            preferred_rating: None,
            favorite_cuisines: Vec::new(),
        }
    }

    fn service(
        preferences: MockPreferenceRepository,
        cuisines: MockCuisineRepository,
    ) -> PreferenceService {
        PreferenceService::new(Arc::new(preferences), Arc::new(cuisines))
    }

    #[tokio::test]
    async fn update_rejects_out_of_range_price_level() {
        let mut preferences = MockPreferenceRepository::new();
        preferences.expect_update().never();

        let update = PreferenceUpdate {
            preferred_price_level: Some(Some(9)),
            ..Default::default()
        };
        let err = service(preferences, MockCuisineRepository::new())
            .update_preferences(&Uuid::new_v4(), update)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn update_accepts_explicit_clears() {
        let user_id = Uuid::new_v4();

        let mut preferences = MockPreferenceRepository::new();
        preferences
            .expect_update()
            .withf(|_, update| update.preferred_price_level == Some(None))
            .returning(|user_id, _| Ok(empty_preference(*user_id)));

        let update = PreferenceUpdate {
            preferred_price_level: Some(None),
            ..Default::default()
        };
        let result = service(preferences, MockCuisineRepository::new())
            .update_preferences(&user_id, update)
            .await
            .unwrap();
        assert_eq!(result.user_id, user_id);
    }

    #[tokio::test]
    async fn add_favorite_requires_existing_cuisine() {
        let mut cuisines = MockCuisineRepository::new();
        cuisines.expect_find_by_id().returning(|_| Ok(None));

        let mut preferences = MockPreferenceRepository::new();
        preferences.expect_add_favorite_cuisine().never();

        let err = service(preferences, cuisines)
            .add_favorite_cuisine(&Uuid::new_v4(), &Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn add_favorite_links_known_cuisine() {
        let cuisine_id = Uuid::new_v4();

        let mut cuisines = MockCuisineRepository::new();
        cuisines.expect_find_by_id().returning(move |id| {
            Ok(Some(Cuisine {
                id: *id,
                name: "Istrian".to_string(),
            }))
        });

        let mut preferences = MockPreferenceRepository::new();
        preferences
            .expect_add_favorite_cuisine()
            .returning(move |user_id, cuisine_id| {
                let mut preference = empty_preference(*user_id);
                preference.favorite_cuisines.push(Cuisine {
                    id: *cuisine_id,
                    name: "Istrian".to_string(),
                });
                Ok(preference)
            });

        let result = service(preferences, cuisines)
            .add_favorite_cuisine(&Uuid::new_v4(), &cuisine_id)
            .await
            .unwrap();
        assert_eq!(result.favorite_cuisines.len(), 1);
        assert_eq!(result.favorite_cuisines[0].id, cuisine_id);
    }
}
