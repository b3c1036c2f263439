use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::modules::import::import_record::ImportRecord;
use crate::modules::restaurant::domain::entities::{Cuisine, Restaurant};
use crate::modules::restaurant::domain::repositories::RestaurantRepository;
use crate::modules::restaurant::domain::value_objects::WeeklySchedule;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

/// Outcome of a batch import. One bad record never aborts the batch;
/// its failure is recorded and the loop moves on.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub total: usize,
    pub imported: usize,
    pub failed: usize,
    pub failures: Vec<ImportFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportFailure {
    pub index: usize,
    pub title: String,
    pub reason: String,
}

pub struct ImportService {
    restaurants: Arc<dyn RestaurantRepository>,
}

impl ImportService {
    pub fn new(restaurants: Arc<dyn RestaurantRepository>) -> Self {
        Self { restaurants }
    }

    pub async fn import_json(&self, payload: &str) -> AppResult<ImportReport> {
        let records: Vec<ImportRecord> = serde_json::from_str(payload)?;
        self.import_records(records).await
    }

    pub async fn import_records(&self, records: Vec<ImportRecord>) -> AppResult<ImportReport> {
        let mut report = ImportReport {
            total: records.len(),
            ..Default::default()
        };

        for (index, record) in records.into_iter().enumerate() {
            let title = record.title.clone();
            match self.import_one(record).await {
                Ok(saved) => {
                    tracing::info!(name = %saved.name, "Imported restaurant");
                    report.imported += 1;
                }
                Err(err) => {
                    tracing::warn!(%title, index, "Skipping record: {}", err);
                    report.failed += 1;
                    report.failures.push(ImportFailure {
                        index,
                        title,
                        reason: err.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            total = report.total,
            imported = report.imported,
            failed = report.failed,
            "Import completed"
        );
        Ok(report)
    }

    async fn import_one(&self, record: ImportRecord) -> AppResult<Restaurant> {
        let restaurant = Self::record_to_entity(record)?;
        self.restaurants.save(&restaurant).await
    }

    fn record_to_entity(record: ImportRecord) -> AppResult<Restaurant> {
        Validator::validate_restaurant_name(record.title.trim())?;

        if let Some(rating) = record.total_score {
            Validator::validate_rating(rating)?;
        }
        if let Some(price_level) = record.price_level {
            Validator::validate_price_level(price_level)?;
        }

        let (latitude, longitude) = match record.location {
            Some(location) => {
                Validator::validate_coordinates(location.lat, location.lng)?;
                (Some(location.lat), Some(location.lng))
            }
            None => (None, None),
        };

        let opening_hours = if record.opening_hours.is_empty() {
            None
        } else {
            let schedule = WeeklySchedule::from_entries(&record.opening_hours);
            if schedule.is_empty() {
                None
            } else {
                Some(schedule)
            }
        };

        let cuisines = record
            .categories
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| Cuisine {
                // Placeholder id; the repository resolves the real one on save.
                id: Uuid::new_v4(),
                name: name.trim().to_string(),
            })
            .collect();

        let now = Utc::now();
        Ok(Restaurant {
            id: Uuid::new_v4(),
            name: record.title.trim().to_string(),
            address: record.address,
            latitude,
            longitude,
            phone_number: record.phone.filter(|p| !p.is_empty()),
            website: record.website.filter(|w| !w.is_empty()),
            rating: record.total_score,
            price_level: record.price_level,
            adventure_rating: 5,
            cultural_significance: 5,
            instagram_worthiness: 5,
            planning_friendly: false,
            instagram_worthy: false,
            vegan_options: false,
            main_image_url: record.image_urls.into_iter().next(),
            review_summary: record.review_summary,
            opening_hours,
            cuisines,
            distance: None,
            created_at: now,
            updated_at: now,
        })
    }
}
