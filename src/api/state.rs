use std::sync::Arc;

use crate::infrastructure::database::Database;
use crate::modules::interaction::application::InteractionService;
use crate::modules::interaction::infrastructure::InteractionRepositoryImpl;
use crate::modules::preference::application::PreferenceService;
use crate::modules::preference::infrastructure::PreferenceRepositoryImpl;
use crate::modules::restaurant::application::{CuisineService, RestaurantService};
use crate::modules::restaurant::domain::repositories::{CuisineRepository, RestaurantRepository};
use crate::modules::restaurant::infrastructure::{CuisineRepositoryImpl, RestaurantRepositoryImpl};

#[derive(Clone)]
pub struct AppState {
    pub restaurant_service: Arc<RestaurantService>,
    pub cuisine_service: Arc<CuisineService>,
    pub interaction_service: Arc<InteractionService>,
    pub preference_service: Arc<PreferenceService>,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        let restaurant_repo: Arc<dyn RestaurantRepository> =
            Arc::new(RestaurantRepositoryImpl::new(Arc::clone(&db)));
        let cuisine_repo: Arc<dyn CuisineRepository> =
            Arc::new(CuisineRepositoryImpl::new(Arc::clone(&db)));
        let interaction_repo = Arc::new(InteractionRepositoryImpl::new(Arc::clone(&db)));
        let preference_repo = Arc::new(PreferenceRepositoryImpl::new(Arc::clone(&db)));

        Self {
            restaurant_service: Arc::new(RestaurantService::new(
                Arc::clone(&restaurant_repo),
                preference_repo.clone(),
            )),
            cuisine_service: Arc::new(CuisineService::new(Arc::clone(&cuisine_repo))),
            interaction_service: Arc::new(InteractionService::new(
                interaction_repo,
                Arc::clone(&restaurant_repo),
            )),
            preference_service: Arc::new(PreferenceService::new(
                preference_repo,
                cuisine_repo,
            )),
        }
    }
}
