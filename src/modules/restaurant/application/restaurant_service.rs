use std::sync::Arc;

use chrono::{DateTime, Datelike, Local, Timelike};
use uuid::Uuid;

use crate::modules::preference::domain::repositories::PreferenceRepository;
use crate::modules::restaurant::domain::entities::{GeoPoint, Restaurant};
use crate::modules::restaurant::domain::repositories::{
    RestaurantFilter, RestaurantRepository, RestaurantSort, SuggestionPredicate,
};
use crate::modules::restaurant::domain::value_objects::Weekday;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::pagination::{PaginatedResult, PaginationParams};
use crate::shared::utils::Validator;

/// Listing parameters as they arrive from the outside, before any
/// viewer-specific enrichment.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub name: Option<String>,
    pub cuisine_id: Option<Uuid>,
    pub min_rating: Option<f32>,
    pub max_price: Option<i32>,
    pub vegan_only: bool,
    /// Liked-only toggle; `false` is a passthrough, not an exclusion.
    pub is_favorite: bool,
    /// Opt-in preference/persona pipeline for signed-in viewers.
    pub suggest: bool,
    pub ordering: Option<String>,
    pub origin: Option<GeoPoint>,
    /// Free-text term matched against name and address.
    pub search: Option<String>,
    pub pagination: PaginationParams,
}

pub struct RestaurantService {
    restaurants: Arc<dyn RestaurantRepository>,
    preferences: Arc<dyn PreferenceRepository>,
}

impl RestaurantService {
    pub fn new(
        restaurants: Arc<dyn RestaurantRepository>,
        preferences: Arc<dyn PreferenceRepository>,
    ) -> Self {
        Self {
            restaurants,
            preferences,
        }
    }

    /// Main listing. The catalog filters always apply; with `suggest` a
    /// signed-in viewer additionally loses their disliked restaurants,
    /// gets preference-based narrowing, and, when they have a persona
    /// and no explicit ordering, that persona's ranking. Anonymous
    /// viewers have no preferences, so `suggest` is a passthrough.
    pub async fn list_restaurants(
        &self,
        viewer: Option<Uuid>,
        query: ListQuery,
    ) -> AppResult<PaginatedResult<Restaurant>> {
        Validator::validate_pagination(query.pagination.offset(), query.pagination.limit())?;

        let mut filter = Self::base_filter(&query);
        let mut sort = match &query.ordering {
            Some(ordering) => Some(Self::parse_ordering(ordering, query.origin.is_some())?),
            None => None,
        };

        if let Some(viewer) = viewer {
            if query.is_favorite {
                filter.liked_by = Some(viewer);
            }

            if query.suggest {
                filter.exclude_disliked_by = Some(viewer);

                let preference = self.preferences.get_or_create(&viewer).await?;
                if !preference.is_unset() {
                    filter.suggestion = Some(SuggestionPredicate {
                        cuisine_ids: preference
                            .favorite_cuisines
                            .iter()
                            .map(|c| c.id)
                            .collect(),
                        max_price: preference.preferred_price_level,
                        min_rating: preference.preferred_rating,
                    });
                }

                if sort.is_none() {
                    if let Some(persona) = self.preferences.persona_of(&viewer).await? {
                        let policy = persona.policy();
                        filter.persona_filter = Some(policy.filter);
                        sort = Some(RestaurantSort::Persona(policy.sort));
                    }
                }
            }
        }

        let pagination = query.pagination;
        let (items, total) = self
            .restaurants
            .list(
                filter,
                sort.unwrap_or_default(),
                query.origin,
                pagination.offset(),
                pagination.limit(),
            )
            .await?;

        Ok(PaginatedResult::new(items, total as u64, &pagination))
    }

    pub async fn get_restaurant(&self, id: &Uuid) -> AppResult<Restaurant> {
        self.restaurants
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))
    }

    /// Distance-ordered listing around a point. Both coordinates are
    /// required; distance itself is computed by the database.
    pub async fn nearest(
        &self,
        viewer: Option<Uuid>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Restaurant>> {
        let (latitude, longitude) = match (latitude, longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => {
                return Err(AppError::InvalidInput(
                    "Both latitude and longitude are required".to_string(),
                ))
            }
        };
        Validator::validate_coordinates(latitude, longitude)?;
        Validator::validate_pagination(pagination.offset(), pagination.limit())?;

        let mut filter = RestaurantFilter::default();
        filter.exclude_disliked_by = viewer;

        let origin = GeoPoint {
            latitude,
            longitude,
        };
        let (items, total) = self
            .restaurants
            .list(
                filter,
                RestaurantSort::Distance,
                Some(origin),
                pagination.offset(),
                pagination.limit(),
            )
            .await?;

        Ok(PaginatedResult::new(items, total as u64, &pagination))
    }

    /// Persona-ranked picks. Requires a signed-in viewer; a viewer
    /// without an assigned persona falls back to the default ranking.
    pub async fn persona_recommendations(
        &self,
        viewer: Option<Uuid>,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Restaurant>> {
        let viewer = viewer.ok_or(AppError::AuthenticationRequired)?;
        Validator::validate_pagination(pagination.offset(), pagination.limit())?;

        let mut filter = RestaurantFilter::default();
        filter.exclude_disliked_by = Some(viewer);

        let sort = match self.preferences.persona_of(&viewer).await? {
            Some(persona) => {
                let policy = persona.policy();
                filter.persona_filter = Some(policy.filter);
                RestaurantSort::Persona(policy.sort)
            }
            None => RestaurantSort::default(),
        };

        let (items, total) = self
            .restaurants
            .list(filter, sort, None, pagination.offset(), pagination.limit())
            .await?;

        Ok(PaginatedResult::new(items, total as u64, &pagination))
    }

    /// Free-text search over name and address. Everything else from the
    /// main listing (filters, ordering, suggest, favorites) still
    /// applies; the default ordering is name ascending.
    pub async fn search(
        &self,
        viewer: Option<Uuid>,
        term: &str,
        mut query: ListQuery,
    ) -> AppResult<PaginatedResult<Restaurant>> {
        if term.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }
        query.search = Some(term.trim().to_string());
        if query.ordering.is_none() {
            query.ordering = Some("name".to_string());
        }
        self.list_restaurants(viewer, query).await
    }

    /// Restaurants whose stored schedule covers the given local moment.
    pub async fn open_now(
        &self,
        viewer: Option<Uuid>,
        at: DateTime<Local>,
        pagination: PaginationParams,
    ) -> AppResult<PaginatedResult<Restaurant>> {
        Validator::validate_pagination(pagination.offset(), pagination.limit())?;

        let day: Weekday = at.weekday().into();
        let minutes = (at.hour() * 60 + at.minute()) as u16;

        let mut filter = RestaurantFilter::default();
        filter.exclude_disliked_by = viewer;
        filter.open_at = Some((day, minutes));

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

    fn base_filter(query: &ListQuery) -> RestaurantFilter {
        RestaurantFilter {
            name_contains: query.name.clone(),
            search_term: query.search.clone(),
            cuisine_id: query.cuisine_id,
            min_rating: query.min_rating,
            max_price: query.max_price,
            vegan_only: query.vegan_only,
            ..Default::default()
        }
    }

    /// DRF-style ordering token: a field name with an optional leading
    /// `-` for descending.
    fn parse_ordering(ordering: &str, has_origin: bool) -> AppResult<RestaurantSort> {
        let (field, descending) = match ordering.strip_prefix('-') {
            Some(field) => (field, true),
            None => (ordering, false),
        };

        match field {
            "name" => Ok(RestaurantSort::Name { descending }),
            "rating" => Ok(RestaurantSort::Rating { descending }),
            "price_level" => Ok(RestaurantSort::PriceLevel { descending }),
            "distance" => {
                if descending {
                    return Err(AppError::InvalidInput(
                        "Distance ordering is ascending only".to_string(),
                    ));
                }
                if !has_origin {
                    return Err(AppError::InvalidInput(
                        "Distance ordering requires latitude and longitude".to_string(),
                    ));
                }
                Ok(RestaurantSort::Distance)
            }
            other => Err(AppError::InvalidInput(format!(
                "Unknown ordering field: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::preference::domain::entities::UserPreference;
    use crate::modules::preference::domain::repositories::MockPreferenceRepository;
    use crate::modules::restaurant::domain::repositories::MockRestaurantRepository;
    use crate::modules::restaurant::domain::value_objects::{Persona, PersonaFilter, PersonaSort};

    fn service(
        restaurants: MockRestaurantRepository,
        preferences: MockPreferenceRepository,
    ) -> RestaurantService {
        RestaurantService::new(Arc::new(restaurants), Arc::new(preferences))
    }

    fn preference_with(
        user_id: Uuid,
        price: Option<i32>,
        rating: Option<f32>,
    ) -> UserPreference {
        UserPreference {
            id: Uuid::new_v4(),
            user_id,
            preferred_price_level: price,
            preferred_rating: rating,
            favorite_cuisines: Vec::new(),
        }
    }

    #[tokio::test]
    async fn anonymous_listing_skips_personalization() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_list()
            .withf(|filter, sort, _, _, _| {
                filter.exclude_disliked_by.is_none()
                    && filter.suggestion.is_none()
                    && *sort == RestaurantSort::default()
            })
            .returning(|_, _, _, _, _| Ok((Vec::new(), 0)));

        let mut preferences = MockPreferenceRepository::new();
        preferences.expect_get_or_create().never();

        let query = ListQuery {
            suggest: true,
            ..Default::default()
        };
        let page = service(restaurants, preferences)
            .list_restaurants(None, query)
            .await
            .unwrap();
        assert_eq!(page.total_count, 0);
    }

    #[tokio::test]
    async fn favorite_toggle_narrows_to_liked_rows() {
        let viewer = Uuid::new_v4();

        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_list()
            .withf(move |filter, _, _, _, _| filter.liked_by == Some(viewer))
            .returning(|_, _, _, _, _| Ok((Vec::new(), 0)));

        let query = ListQuery {
            is_favorite: true,
            ..Default::default()
        };
        service(restaurants, MockPreferenceRepository::new())
            .list_restaurants(Some(viewer), query)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn empty_preferences_add_no_suggestion_predicate() {
        let viewer = Uuid::new_v4();

        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_list()
            .withf(move |filter, _, _, _, _| {
                filter.exclude_disliked_by == Some(viewer) && filter.suggestion.is_none()
            })
            .returning(|_, _, _, _, _| Ok((Vec::new(), 0)));

        let mut preferences = MockPreferenceRepository::new();
        preferences
            .expect_get_or_create()
            .returning(|user_id| Ok(preference_with(*user_id, None, None)));
        preferences.expect_persona_of().returning(|_| Ok(None));

        let query = ListQuery {
            suggest: true,
            ..Default::default()
        };
        service(restaurants, preferences)
            .list_restaurants(Some(viewer), query)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn populated_preferences_become_a_suggestion_predicate() {
        let viewer = Uuid::new_v4();

        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_list()
            .withf(|filter, _, _, _, _| {
                matches!(
                    &filter.suggestion,
                    Some(s) if s.max_price == Some(2) && s.min_rating == Some(4.0)
                )
            })
            .returning(|_, _, _, _, _| Ok((Vec::new(), 0)));

        let mut preferences = MockPreferenceRepository::new();
        preferences
            .expect_get_or_create()
            .returning(|user_id| Ok(preference_with(*user_id, Some(2), Some(4.0))));
        preferences.expect_persona_of().returning(|_| Ok(None));

        let query = ListQuery {
            suggest: true,
            ..Default::default()
        };
        service(restaurants, preferences)
            .list_restaurants(Some(viewer), query)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn explicit_ordering_overrides_persona_ranking() {
        let viewer = Uuid::new_v4();

        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_list()
            .withf(|filter, sort, _, _, _| {
                filter.persona_filter.is_none()
                    && *sort == RestaurantSort::Rating { descending: true }
            })
            .returning(|_, _, _, _, _| Ok((Vec::new(), 0)));

        let mut preferences = MockPreferenceRepository::new();
        preferences
            .expect_get_or_create()
            .returning(|user_id| Ok(preference_with(*user_id, None, None)));
        // Persona lookup is skipped entirely when an ordering is given.
        preferences.expect_persona_of().never();

        let query = ListQuery {
            suggest: true,
            ordering: Some("-rating".to_string()),
            ..Default::default()
        };
        service(restaurants, preferences)
            .list_restaurants(Some(viewer), query)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn persona_policy_shapes_default_listing() {
        let viewer = Uuid::new_v4();

        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_list()
            .withf(|filter, sort, _, _, _| {
                filter.persona_filter == Some(PersonaFilter::MinAdventureRating(7))
                    && *sort == RestaurantSort::Persona(PersonaSort::AdventureThenRating)
            })
            .returning(|_, _, _, _, _| Ok((Vec::new(), 0)));

        let mut preferences = MockPreferenceRepository::new();
        preferences
            .expect_get_or_create()
            .returning(|user_id| Ok(preference_with(*user_id, None, None)));
        preferences
            .expect_persona_of()
            .returning(|_| Ok(Some(Persona::Escapist)));

        let query = ListQuery {
            suggest: true,
            ..Default::default()
        };
        service(restaurants, preferences)
            .list_restaurants(Some(viewer), query)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn get_restaurant_maps_missing_to_not_found() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants.expect_find_by_id().returning(|_| Ok(None));

        let err = service(restaurants, MockPreferenceRepository::new())
            .get_restaurant(&Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn nearest_requires_both_coordinates() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants.expect_list().never();
        let svc = service(restaurants, MockPreferenceRepository::new());

        for (lat, lon) in [(Some(45.0), None), (None, Some(13.0)), (None, None)] {
            let err = svc
                .nearest(None, lat, lon, PaginationParams::default())
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }
    }

    #[tokio::test]
    async fn nearest_rejects_out_of_range_coordinates() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants.expect_list().never();

        let err = service(restaurants, MockPreferenceRepository::new())
            .nearest(None, Some(95.0), Some(13.0), PaginationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn nearest_orders_by_distance_from_origin() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_list()
            .withf(|_, sort, origin, _, _| {
                *sort == RestaurantSort::Distance
                    && matches!(origin, Some(o) if o.latitude == 45.0 && o.longitude == 13.6)
            })
            .returning(|_, _, _, _, _| Ok((Vec::new(), 0)));

        service(restaurants, MockPreferenceRepository::new())
            .nearest(None, Some(45.0), Some(13.6), PaginationParams::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn recommendations_require_authentication() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants.expect_list().never();

        let err = service(restaurants, MockPreferenceRepository::new())
            .persona_recommendations(None, PaginationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuthenticationRequired));
    }

    #[tokio::test]
    async fn recommendations_without_persona_use_default_ranking() {
        let viewer = Uuid::new_v4();

        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_list()
            .withf(|filter, sort, _, _, _| {
                filter.persona_filter.is_none() && *sort == RestaurantSort::default()
            })
            .returning(|_, _, _, _, _| Ok((Vec::new(), 0)));

        let mut preferences = MockPreferenceRepository::new();
        preferences.expect_persona_of().returning(|_| Ok(None));

        service(restaurants, preferences)
            .persona_recommendations(Some(viewer), PaginationParams::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn search_rejects_blank_queries() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants.expect_list().never();

        let err = service(restaurants, MockPreferenceRepository::new())
            .search(None, "   ", ListQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn search_carries_shared_filters_to_the_repository() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_list()
            .withf(|filter, sort, _, _, _| {
                filter.search_term.as_deref() == Some("konoba")
                    && filter.min_rating == Some(4.0)
                    && filter.max_price == Some(2)
                    && *sort == RestaurantSort::Name { descending: false }
            })
            .returning(|_, _, _, _, _| Ok((Vec::new(), 0)));

        let query = ListQuery {
            min_rating: Some(4.0),
            max_price: Some(2),
            ..Default::default()
        };
        service(restaurants, MockPreferenceRepository::new())
            .search(None, " konoba ", query)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn search_respects_an_explicit_ordering() {
        let mut restaurants = MockRestaurantRepository::new();
        restaurants
            .expect_list()
            .withf(|_, sort, _, _, _| *sort == RestaurantSort::Rating { descending: true })
            .returning(|_, _, _, _, _| Ok((Vec::new(), 0)));

        let query = ListQuery {
            ordering: Some("-rating".to_string()),
            ..Default::default()
        };
        service(restaurants, MockPreferenceRepository::new())
            .search(None, "konoba", query)
            .await
            .unwrap();
    }

    #[test]
    fn ordering_tokens_parse_with_direction() {
        assert_eq!(
            RestaurantService::parse_ordering("name", false).unwrap(),
            RestaurantSort::Name { descending: false }
        );
        assert_eq!(
            RestaurantService::parse_ordering("-rating", false).unwrap(),
            RestaurantSort::Rating { descending: true }
        );
        assert_eq!(
            RestaurantService::parse_ordering("distance", true).unwrap(),
            RestaurantSort::Distance
        );
        assert!(RestaurantService::parse_ordering("distance", false).is_err());
        assert!(RestaurantService::parse_ordering("-distance", true).is_err());
        assert!(RestaurantService::parse_ordering("karma", false).is_err());
    }
}
