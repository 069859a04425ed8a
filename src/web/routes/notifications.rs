use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::error::AppResult;
use crate::services::notification_service::{self, NotificationsPage};
use crate::services::now_ms;
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

pub async fn notifications_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> AppResult<Json<NotificationsPage>> {
    let page = notification_service::build_notifications_page(
        state.notifications.as_ref(),
        &auth_user.id,
        now_ms(),
    )
    .await?;
    Ok(Json(page))
}

pub async fn unread_count_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let count = notification_service::unread_count(state.notifications.as_ref(), &auth_user.id).await?;
    Ok(Json(json!({ "unreadCount": count })))
}

pub async fn mark_read_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(notification_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    notification_service::mark_read(
        state.notifications.as_ref(),
        &auth_user.id,
        &notification_id,
        now_ms(),
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_all_read_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let updated =
        notification_service::mark_all_read(state.notifications.as_ref(), &auth_user.id, now_ms())
            .await?;
    Ok(Json(json!({ "updated": updated })))
}

pub async fn delete_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(notification_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    notification_service::delete_notification(
        state.notifications.as_ref(),
        &auth_user.id,
        &notification_id,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_all_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let deleted = notification_service::delete_all(state.notifications.as_ref(), &auth_user.id).await?;
    Ok(Json(json!({ "deleted": deleted })))
}
