use serde::Deserialize;

use crate::modules::restaurant::domain::value_objects::OpeningHoursEntry;

/// One scraped restaurant as it appears in the import JSON. Field names
/// follow the scraper's camelCase payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRecord {
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(rename = "totalScore", default)]
    pub total_score: Option<f32>,
    #[serde(rename = "priceLevel", default)]
    pub price_level: Option<i32>,
    #[serde(rename = "imageUrls", default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub location: Option<ImportLocation>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(rename = "openingHours", default)]
    pub opening_hours: Vec<OpeningHoursEntry>,
    #[serde(rename = "reviewsSummary", default)]
    pub review_summary: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ImportLocation {
    pub lat: f64,
    pub lng: f64,
}
