use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::interaction::domain::value_objects::LikeStatus;

/// One user's accumulated state for one restaurant. A single row per
/// (user, restaurant) pair; every write refreshes `interaction_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub restaurant_id: Uuid,
    pub like_status: LikeStatus,
    pub visited: bool,
    pub user_rating: Option<i32>,
    pub interaction_date: DateTime<Utc>,
}
