use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::api::serializers::CuisineResponse;
use crate::api::state::AppState;
use crate::shared::errors::AppResult;

pub async fn list_cuisines(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CuisineResponse>>> {
    let cuisines = state.cuisine_service.list_cuisines().await?;
    Ok(Json(cuisines.into_iter().map(Into::into).collect()))
}

pub async fn get_cuisine(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CuisineResponse>> {
    let cuisine = state.cuisine_service.get_cuisine(&id).await?;
    Ok(Json(cuisine.into()))
}
