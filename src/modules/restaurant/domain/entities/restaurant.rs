use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::restaurant::domain::value_objects::WeeklySchedule;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cuisine {
    pub id: Uuid,
    pub name: String,
}

/// WGS84 coordinate pair used as the origin of distance queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
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
    pub opening_hours: Option<WeeklySchedule>,
    pub cuisines: Vec<Cuisine>,
    /// Meters from the query origin; only set by distance-annotated queries.
    pub distance: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Restaurant {
    pub fn is_open(&self, at: DateTime<chrono::Local>) -> bool {
        self.opening_hours
            .as_ref()
            .map(|schedule| schedule.is_open(at))
            .unwrap_or(false)
    }
}
