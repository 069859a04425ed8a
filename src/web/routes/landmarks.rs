use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use tracing::warn;

use crate::error::AppResult;
use crate::services::browse_service::{
    self, CategoryListPage, CategoryListQuery, SearchPage, SearchQuery,
};
use crate::services::category_service::CategoryCard;
use crate::services::detail_service::{self, DetailPage, DetailQuery};
use crate::services::home_service::{self, HomePage};
use crate::services::map_service::{self, MapPage, MapQuery};
use crate::services::saved_service::{self, BookmarkOutcome};
use crate::services::now_ms;
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

pub async fn home_handler(State(state): State<AppState>) -> AppResult<Json<HomePage>> {
    let page = home_service::load_home_page(&state.home, state.landmarks.as_ref()).await?;
    Ok(Json(page))
}

pub async fn categories_handler() -> Json<Vec<CategoryCard>> {
    Json(browse_service::categories_page())
}

pub async fn category_list_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(category_id): Path<String>,
    Query(query): Query<CategoryListQuery>,
    State(state): State<AppState>,
) -> AppResult<Json<CategoryListPage>> {
    let page = browse_service::build_category_list_page(
        state.landmarks.as_ref(),
        state.saved.as_ref(),
        &auth_user.id,
        &category_id,
        &query,
    )
    .await
    .inspect_err(|e| warn!("Category list {} failed: {}", category_id, e))?;
    Ok(Json(page))
}

pub async fn search_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(query): Query<SearchQuery>,
    State(state): State<AppState>,
) -> AppResult<Json<SearchPage>> {
    let page = browse_service::build_search_page(
        state.landmarks.as_ref(),
        state.saved.as_ref(),
        &auth_user.id,
        &query,
    )
    .await?;
    Ok(Json(page))
}

pub async fn map_handler(
    Query(query): Query<MapQuery>,
    State(state): State<AppState>,
) -> AppResult<Json<MapPage>> {
    let page = map_service::build_map_page(state.landmarks.as_ref(), &query).await?;
    Ok(Json(page))
}

pub async fn detail_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(landmark_id): Path<String>,
    Query(query): Query<DetailQuery>,
    State(state): State<AppState>,
) -> AppResult<Json<DetailPage>> {
    let page = detail_service::build_detail_page(
        state.landmarks.as_ref(),
        state.saved.as_ref(),
        &auth_user.id,
        &landmark_id,
        &query,
    )
    .await?;
    Ok(Json(page))
}

pub async fn toggle_bookmark_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(landmark_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<BookmarkOutcome>> {
    let outcome =
        saved_service::toggle_bookmark(state.saved.as_ref(), &auth_user.id, &landmark_id, now_ms())
            .await?;
    Ok(Json(outcome))
}
