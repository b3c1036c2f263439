use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::infrastructure::database::schema::{
    cuisines, restaurant_cuisines, restaurants, user_preference_cuisines, user_preferences,
    user_restaurant_interactions,
};

// ================== RESTAURANT MODELS ==================

/// DB row model (read)
#[derive(Queryable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = restaurants)]
pub struct RestaurantModel {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f32>,
    pub price_level: Option<i32>,
    pub adventure_rating: i32,
    pub cultural_significance: i32,
    pub instagram_worthiness: i32,
    pub planning_friendly: bool,
    pub instagram_worthy: bool,
    pub vegan_options: bool,
    pub main_image_url: Option<String>,
    pub review_summary: Option<String>,
    pub opening_hours: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload (write)
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f32>,
    pub price_level: Option<i32>,
    pub adventure_rating: i32,
    pub cultural_significance: i32,
    pub instagram_worthiness: i32,
    pub planning_friendly: bool,
    pub instagram_worthy: bool,
    pub vegan_options: bool,
    pub main_image_url: Option<String>,
    pub review_summary: Option<String>,
    pub opening_hours: Option<serde_json::Value>,
}

/// Update payload (write) — excludes `id` and `created_at`
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = restaurants)]
pub struct RestaurantChangeset {
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f32>,
    pub price_level: Option<i32>,
    pub main_image_url: Option<String>,
    pub review_summary: Option<String>,
    pub opening_hours: Option<serde_json::Value>,
    pub updated_at: DateTime<Utc>,
}

// ================== CUISINE MODELS ==================

#[derive(Queryable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = cuisines)]
pub struct CuisineModel {
    pub id: Uuid,
    pub name: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = cuisines)]
pub struct NewCuisine {
    pub id: Uuid,
    pub name: String,
}

// ============= RESTAURANT-CUISINE ASSOCIATION (join) =============

#[derive(Queryable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(RestaurantModel, foreign_key = restaurant_id))]
#[diesel(belongs_to(CuisineModel, foreign_key = cuisine_id))]
#[diesel(table_name = restaurant_cuisines)]
#[diesel(primary_key(restaurant_id, cuisine_id))]
pub struct RestaurantCuisine {
    pub restaurant_id: Uuid,
    pub cuisine_id: Uuid,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = restaurant_cuisines)]
pub struct NewRestaurantCuisine {
    pub restaurant_id: Uuid,
    pub cuisine_id: Uuid,
}

// ================== USER PREFERENCE MODELS ==================

#[derive(Queryable, Identifiable, Debug, Clone)]
#[diesel(table_name = user_preferences)]
pub struct UserPreferenceModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub preferred_price_level: Option<i32>,
    pub preferred_rating: Option<f32>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = user_preferences)]
pub struct NewUserPreference {
    pub id: Uuid,
    pub user_id: Uuid,
    pub preferred_price_level: Option<i32>,
    pub preferred_rating: Option<f32>,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = user_preferences)]
pub struct UserPreferenceChangeset {
    pub preferred_price_level: Option<Option<i32>>,
    pub preferred_rating: Option<Option<f32>>,
}

// ========= PREFERENCE-CUISINE ASSOCIATION (join) =========

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = user_preference_cuisines)]
pub struct NewUserPreferenceCuisine {
    pub preference_id: Uuid,
    pub cuisine_id: Uuid,
}

// ================== INTERACTION MODELS ==================

#[derive(Queryable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(RestaurantModel, foreign_key = restaurant_id))]
#[diesel(table_name = user_restaurant_interactions)]
pub struct InteractionModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub restaurant_id: Uuid,
    pub liked: Option<bool>,
    pub visited: bool,
    pub user_rating: Option<i32>,
    pub interaction_date: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = user_restaurant_interactions)]
pub struct NewInteraction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub restaurant_id: Uuid,
    pub liked: Option<bool>,
    pub visited: bool,
    pub user_rating: Option<i32>,
}
