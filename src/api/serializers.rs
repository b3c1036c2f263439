use std::collections::BTreeMap;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::modules::interaction::domain::entities::Interaction;
use crate::modules::interaction::domain::value_objects::LikeStatus;
use crate::modules::preference::domain::entities::UserPreference;
use crate::modules::restaurant::domain::entities::{Cuisine, Restaurant};

#[derive(Debug, Serialize)]
pub struct CuisineResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Cuisine> for CuisineResponse {
    fn from(cuisine: Cuisine) -> Self {
        Self {
            id: cuisine.id,
            name: cuisine.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RestaurantResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f32>,
    pub price_level: Option<i32>,
    pub cuisines: Vec<CuisineResponse>,
    pub vegan_options: bool,
    pub main_image_url: Option<String>,
    pub opening_hours_formatted: Option<BTreeMap<String, String>>,
    pub is_open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RestaurantResponse {
    pub fn from_entity(restaurant: Restaurant, now: DateTime<Local>) -> Self {
        let is_open = restaurant.is_open(now);
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
            latitude: restaurant.latitude,
            longitude: restaurant.longitude,
            phone_number: restaurant.phone_number,
            website: restaurant.website,
            rating: restaurant.rating,
            price_level: restaurant.price_level,
            cuisines: restaurant.cuisines.into_iter().map(Into::into).collect(),
            vegan_options: restaurant.vegan_options,
            main_image_url: restaurant.main_image_url,
            opening_hours_formatted: restaurant
                .opening_hours
                .as_ref()
                .map(|schedule| schedule.formatted()),
            is_open,
            distance: restaurant.distance,
            created_at: restaurant.created_at,
            updated_at: restaurant.updated_at,
        }
    }
}

impl From<Restaurant> for RestaurantResponse {
    fn from(restaurant: Restaurant) -> Self {
        Self::from_entity(restaurant, Local::now())
    }
}

#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub restaurant_id: Uuid,
    pub like_status: LikeStatus,
    pub visited: bool,
    pub user_rating: Option<i32>,
    pub interaction_date: DateTime<Utc>,
}

impl From<Interaction> for InteractionResponse {
    fn from(interaction: Interaction) -> Self {
        Self {
            id: interaction.id,
            user_id: interaction.user_id,
            restaurant_id: interaction.restaurant_id,
            like_status: interaction.like_status,
            visited: interaction.visited,
            user_rating: interaction.user_rating,
            interaction_date: interaction.interaction_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreferenceResponse {
    pub user_id: Uuid,
    pub preferred_price_level: Option<i32>,
    pub preferred_rating: Option<f32>,
    pub favorite_cuisines: Vec<CuisineResponse>,
}

impl From<UserPreference> for PreferenceResponse {
    fn from(preference: UserPreference) -> Self {
        Self {
            user_id: preference.user_id,
            preferred_price_level: preference.preferred_price_level,
            preferred_rating: preference.preferred_rating,
            favorite_cuisines: preference
                .favorite_cuisines
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::restaurant::domain::value_objects::{Weekday, WeeklySchedule};
    use chrono::TimeZone;

    fn restaurant_with_schedule() -> Restaurant {
        let mut schedule = WeeklySchedule::new();
        schedule.set(Weekday::Monday, 540, 1320);

        Restaurant {
            id: Uuid::new_v4(),
            name: "Konoba Batelina".to_string(),
            address: "Čimulje 25, Banjole".to_string(),
            latitude: Some(44.82),
            longitude: Some(13.85),
            phone_number: None,
            website: None,
            rating: Some(4.8),
            price_level: Some(3),
            adventure_rating: 8,
            cultural_significance: 9,
            instagram_worthiness: 6,
            planning_friendly: false,
            instagram_worthy: false,
            vegan_options: false,
            main_image_url: None,
            review_summary: None,
            opening_hours: Some(schedule),
            cuisines: vec![Cuisine {
                id: Uuid::new_v4(),
                name: "Seafood".to_string(),
            }],
            distance: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn is_open_reflects_the_schedule() {
        // 2026-08-24 is a Monday.
        let monday_noon = Local.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap();
        let monday_night = Local.with_ymd_and_hms(2026, 8, 24, 23, 0, 0).unwrap();

        let open = RestaurantResponse::from_entity(restaurant_with_schedule(), monday_noon);
        assert!(open.is_open);

        let closed = RestaurantResponse::from_entity(restaurant_with_schedule(), monday_night);
        assert!(!closed.is_open);
    }

    #[test]
    fn formatted_hours_cover_the_whole_week() {
        let response = RestaurantResponse::from_entity(
            restaurant_with_schedule(),
            Local.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap(),
        );
        let formatted = response.opening_hours_formatted.unwrap();
        assert_eq!(formatted["Monday"], "09:00 - 22:00");
        assert_eq!(formatted["Tuesday"], "Closed");
    }

    #[test]
    fn distance_is_omitted_without_an_origin() {
        let response = RestaurantResponse::from(restaurant_with_schedule());
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("distance").is_none());
    }
}
