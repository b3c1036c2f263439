use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::restaurant::domain::entities::{GeoPoint, Restaurant};
use crate::modules::restaurant::domain::value_objects::{PersonaFilter, PersonaSort, Weekday};
use crate::shared::errors::AppResult;

/// Preference-derived OR predicate: a row matches when it satisfies any
/// populated branch. An empty predicate matches nothing and callers
/// should omit it instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuggestionPredicate {
    pub cuisine_ids: Vec<Uuid>,
    pub max_price: Option<i32>,
    pub min_rating: Option<f32>,
}

impl SuggestionPredicate {
    pub fn is_empty(&self) -> bool {
        self.cuisine_ids.is_empty() && self.max_price.is_none() && self.min_rating.is_none()
    }
}

/// Composable restaurant query filter; all populated conditions AND
/// together (the suggestion predicate ORs internally).
#[derive(Debug, Clone, Default)]
pub struct RestaurantFilter {
    pub name_contains: Option<String>,
    /// Free-text search matching name or address.
    pub search_term: Option<String>,
    pub cuisine_id: Option<Uuid>,
    pub min_rating: Option<f32>,
    pub max_price: Option<i32>,
    pub vegan_only: bool,
    pub liked_by: Option<Uuid>,
    pub visited_by: Option<Uuid>,
    pub exclude_disliked_by: Option<Uuid>,
    pub suggestion: Option<SuggestionPredicate>,
    pub persona_filter: Option<PersonaFilter>,
    pub open_at: Option<(Weekday, u16)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestaurantSort {
    Name { descending: bool },
    Rating { descending: bool },
    PriceLevel { descending: bool },
    /// Ascending distance from the query origin; requires one.
    Distance,
    Persona(PersonaSort),
}

impl Default for RestaurantSort {
    fn default() -> Self {
        RestaurantSort::Rating { descending: true }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<Restaurant>>;
    async fn exists(&self, id: &Uuid) -> AppResult<bool>;
    /// Filtered, sorted page plus the total row count before paging.
    /// `origin` enables distance sorting and annotation.
    async fn list(
        &self,
        filter: RestaurantFilter,
        sort: RestaurantSort,
        origin: Option<GeoPoint>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Restaurant>, i64)>;
    /// Upsert keyed on the unique restaurant name; cuisine links are
    /// replaced to match the given record.
    async fn save(&self, restaurant: &Restaurant) -> AppResult<Restaurant>;
}
