use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::api::auth::AuthUser;
use crate::api::serializers::PreferenceResponse;
use crate::api::state::AppState;
use crate::modules::preference::domain::repositories::PreferenceUpdate;
use crate::shared::errors::{AppError, AppResult};

/// Distinguishes an absent field (leave alone) from an explicit null
/// (clear the value).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
pub struct PreferencePayload {
    #[serde(default, deserialize_with = "double_option")]
    pub preferred_price_level: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub preferred_rating: Option<Option<f32>>,
}

#[derive(Debug, Deserialize)]
pub struct CuisinePayload {
    pub cuisine_id: Option<Uuid>,
}

pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<PreferenceResponse>> {
    let preference = state.preference_service.get_preferences(&user_id).await?;
    Ok(Json(preference.into()))
}

pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<PreferencePayload>,
) -> AppResult<Json<PreferenceResponse>> {
    let update = PreferenceUpdate {
        preferred_price_level: payload.preferred_price_level,
        preferred_rating: payload.preferred_rating,
    };
    let preference = state
        .preference_service
        .update_preferences(&user_id, update)
        .await?;
    Ok(Json(preference.into()))
}

pub async fn add_favorite_cuisine(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CuisinePayload>,
) -> AppResult<Json<PreferenceResponse>> {
    let cuisine_id = payload
        .cuisine_id
        .ok_or_else(|| AppError::InvalidInput("cuisine_id is required".to_string()))?;
    let preference = state
        .preference_service
        .add_favorite_cuisine(&user_id, &cuisine_id)
        .await?;
    Ok(Json(preference.into()))
}

pub async fn remove_favorite_cuisine(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CuisinePayload>,
) -> AppResult<Json<PreferenceResponse>> {
    let cuisine_id = payload
        .cuisine_id
        .ok_or_else(|| AppError::InvalidInput("cuisine_id is required".to_string()))?;
    let preference = state
        .preference_service
        .remove_favorite_cuisine(&user_id, &cuisine_id)
        .await?;
    Ok(Json(preference.into()))
}
