use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use crate::error::AppResult;
use crate::services::saved_service::{self, SavedPage};
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

pub async fn saved_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> AppResult<Json<SavedPage>> {
    let page = saved_service::build_saved_page(
        state.landmarks.as_ref(),
        state.saved.as_ref(),
        &auth_user.id,
    )
    .await?;
    Ok(Json(page))
}

pub async fn remove_saved_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(landmark_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    saved_service::remove_bookmark(state.saved.as_ref(), &auth_user.id, &landmark_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
