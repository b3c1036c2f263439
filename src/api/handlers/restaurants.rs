use axum::extract::{Path, Query, RawQuery, State};
use axum::Json;
use chrono::Local;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::auth::MaybeUser;
use crate::api::envelope::{Page, PageQuery};
use crate::api::serializers::RestaurantResponse;
use crate::api::state::AppState;
use crate::modules::restaurant::application::ListQuery;
use crate::modules::restaurant::domain::entities::GeoPoint;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::pagination::PaginationParams;
use crate::shared::utils::Validator;

#[derive(Debug, Default, Deserialize)]
pub struct RestaurantListParams {
    pub name: Option<String>,
    pub cuisine: Option<Uuid>,
    pub min_rating: Option<f32>,
    pub max_price: Option<i32>,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub suggest: bool,
    pub ordering: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

fn origin_from(lat: Option<f64>, lon: Option<f64>) -> AppResult<Option<GeoPoint>> {
    match (lat, lon) {
        (Some(latitude), Some(longitude)) => {
            Validator::validate_coordinates(latitude, longitude)?;
            Ok(Some(GeoPoint {
                latitude,
                longitude,
            }))
        }
        _ => Ok(None),
    }
}

fn list_query_from(params: RestaurantListParams) -> AppResult<ListQuery> {
    Ok(ListQuery {
        name: params.name,
        cuisine_id: params.cuisine,
        min_rating: params.min_rating,
        max_price: params.max_price,
        vegan_only: params.vegan,
        is_favorite: params.is_favorite,
        suggest: params.suggest,
        ordering: params.ordering,
        origin: origin_from(params.lat, params.lon)?,
        search: None,
        pagination: PageQuery {
            page: params.page,
            page_size: params.page_size,
        }
        .into(),
    })
}

pub async fn list_restaurants(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    RawQuery(raw): RawQuery,
    Query(params): Query<RestaurantListParams>,
) -> AppResult<Json<Page<RestaurantResponse>>> {
    let query = list_query_from(params)?;

    let page = state
        .restaurant_service
        .list_restaurants(viewer, query)
        .await?
        .map(RestaurantResponse::from);
    Ok(Json(Page::from_result("/restaurants/", raw.as_deref(), page)))
}

pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RestaurantResponse>> {
    let restaurant = state.restaurant_service.get_restaurant(&id).await?;
    Ok(Json(RestaurantResponse::from(restaurant)))
}

#[derive(Debug, Default, Deserialize)]
pub struct NearestParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

pub async fn nearest(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    RawQuery(raw): RawQuery,
    Query(params): Query<NearestParams>,
) -> AppResult<Json<Page<RestaurantResponse>>> {
    let pagination: PaginationParams = PageQuery {
        page: params.page,
        page_size: params.page_size,
    }
    .into();

    let page = state
        .restaurant_service
        .nearest(viewer, params.lat, params.lon, pagination)
        .await?
        .map(RestaurantResponse::from);
    Ok(Json(Page::from_result(
        "/restaurants/nearest/",
        raw.as_deref(),
        page,
    )))
}

pub async fn persona_recommendations(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    RawQuery(raw): RawQuery,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<Page<RestaurantResponse>>> {
    let page = state
        .restaurant_service
        .persona_recommendations(viewer, params.into())
        .await?
        .map(RestaurantResponse::from);
    Ok(Json(Page::from_result(
        "/restaurants/persona_recommendations/",
        raw.as_deref(),
        page,
    )))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchTerm {
    pub q: Option<String>,
}

/// Search shares the listing pipeline, so every listing filter works
/// here too; only `q` is mandatory.
pub async fn search(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    RawQuery(raw): RawQuery,
    Query(term): Query<SearchTerm>,
    Query(params): Query<RestaurantListParams>,
) -> AppResult<Json<Page<RestaurantResponse>>> {
    let q = term
        .q
        .ok_or_else(|| AppError::InvalidInput("Query parameter 'q' is required".to_string()))?;
    let query = list_query_from(params)?;

    let page = state
        .restaurant_service
        .search(viewer, &q, query)
        .await?
        .map(RestaurantResponse::from);
    Ok(Json(Page::from_result(
        "/restaurants/search/",
        raw.as_deref(),
        page,
    )))
}

pub async fn open_now(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    RawQuery(raw): RawQuery,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<Page<RestaurantResponse>>> {
    let now = Local::now();
    let page = state
        .restaurant_service
        .open_now(viewer, now, params.into())
        .await?
        .map(|restaurant| RestaurantResponse::from_entity(restaurant, now));
    Ok(Json(Page::from_result(
        "/restaurants/open_now/",
        raw.as_deref(),
        page,
    )))
}
