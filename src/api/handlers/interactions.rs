use axum::extract::{Query, RawQuery, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::auth::AuthUser;
use crate::api::envelope::{Page, PageQuery};
use crate::api::serializers::{InteractionResponse, RestaurantResponse};
use crate::api::state::AppState;
use crate::shared::errors::{AppError, AppResult};

/// Required fields are Options so a missing field is a 400, not a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct InteractionPayload {
    pub restaurant_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct RatePayload {
    pub restaurant_id: Option<Uuid>,
    pub rating: Option<i32>,
}

fn require_restaurant_id(payload: Option<Uuid>) -> AppResult<Uuid> {
    payload.ok_or_else(|| AppError::InvalidInput("restaurant_id is required".to_string()))
}

pub async fn like_restaurant(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<InteractionPayload>,
) -> AppResult<Json<InteractionResponse>> {
    let restaurant_id = require_restaurant_id(payload.restaurant_id)?;
    let interaction = state
        .interaction_service
        .like(&user_id, &restaurant_id)
        .await?;
    Ok(Json(interaction.into()))
}

pub async fn unlike_restaurant(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<InteractionPayload>,
) -> AppResult<Json<InteractionResponse>> {
    let restaurant_id = require_restaurant_id(payload.restaurant_id)?;
    let interaction = state
        .interaction_service
        .unlike(&user_id, &restaurant_id)
        .await?;
    Ok(Json(interaction.into()))
}

pub async fn mark_visited(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<InteractionPayload>,
) -> AppResult<Json<InteractionResponse>> {
    let restaurant_id = require_restaurant_id(payload.restaurant_id)?;
    let interaction = state
        .interaction_service
        .mark_visited(&user_id, &restaurant_id)
        .await?;
    Ok(Json(interaction.into()))
}

pub async fn rate_restaurant(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<RatePayload>,
) -> AppResult<Json<InteractionResponse>> {
    let restaurant_id = require_restaurant_id(payload.restaurant_id)?;
    let rating = payload
        .rating
        .ok_or_else(|| AppError::InvalidInput("rating is required".to_string()))?;
    let interaction = state
        .interaction_service
        .rate(&user_id, &restaurant_id, rating)
        .await?;
    Ok(Json(interaction.into()))
}

pub async fn liked_restaurants(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    RawQuery(raw): RawQuery,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<Page<RestaurantResponse>>> {
    let page = state
        .interaction_service
        .liked_restaurants(&user_id, params.into())
        .await?
        .map(RestaurantResponse::from);
    Ok(Json(Page::from_result(
        "/user-restaurant-interactions/liked_restaurants/",
        raw.as_deref(),
        page,
    )))
}

pub async fn visited_restaurants(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    RawQuery(raw): RawQuery,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<Page<RestaurantResponse>>> {
    let page = state
        .interaction_service
        .visited_restaurants(&user_id, params.into())
        .await?
        .map(RestaurantResponse::from);
    Ok(Json(Page::from_result(
        "/user-restaurant-interactions/visited_restaurants/",
        raw.as_deref(),
        page,
    )))
}
