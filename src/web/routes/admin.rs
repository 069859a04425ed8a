use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::models::{Landmark, NewLandmark};
use crate::services::admin_service::{self, AdminDashboard, AdminListQuery, Broadcast, StatusChange};
use crate::services::now_ms;
use crate::state::AppState;

pub async fn dashboard_handler(
    Query(query): Query<AdminListQuery>,
    State(state): State<AppState>,
) -> AppResult<Json<AdminDashboard>> {
    Ok(Json(admin_service::build_dashboard(&state, &query).await?))
}

pub async fn create_landmark_handler(
    State(state): State<AppState>,
    Json(new): Json<NewLandmark>,
) -> AppResult<(StatusCode, Json<Landmark>)> {
    let landmark = admin_service::create_landmark(&state, new, now_ms()).await?;
    Ok((StatusCode::CREATED, Json(landmark)))
}

pub async fn update_landmark_handler(
    Path(landmark_id): Path<String>,
    State(state): State<AppState>,
    Json(new): Json<NewLandmark>,
) -> AppResult<Json<Landmark>> {
    let landmark = admin_service::update_landmark(&state, &landmark_id, new, now_ms()).await?;
    Ok(Json(landmark))
}

pub async fn set_status_handler(
    Path(landmark_id): Path<String>,
    State(state): State<AppState>,
    Json(change): Json<StatusChange>,
) -> AppResult<Json<Landmark>> {
    let landmark = admin_service::set_status(&state, &landmark_id, &change, now_ms()).await?;
    Ok(Json(landmark))
}

pub async fn delete_landmark_handler(
    Path(landmark_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    admin_service::delete_landmark(&state, &landmark_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn broadcast_handler(
    State(state): State<AppState>,
    Json(broadcast): Json<Broadcast>,
) -> AppResult<Json<Value>> {
    let sent = admin_service::broadcast(&state, &broadcast, now_ms()).await?;
    Ok(Json(json!({ "sent": sent })))
}
