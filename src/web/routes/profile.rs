use axum::{extract::State, Extension, Json};

use crate::error::AppResult;
use crate::models::UserProfile;
use crate::services::profile_service::{self, ProfilePage, ProfileUpdate};
use crate::state::AppState;
use crate::web::middleware::auth::AuthenticatedUser;

pub async fn profile_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> AppResult<Json<ProfilePage>> {
    let page = profile_service::load_profile_page(state.users.as_ref(), &auth_user.id).await?;
    Ok(Json(page))
}

pub async fn save_profile_handler(
    Extension(auth_user): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> AppResult<Json<UserProfile>> {
    let profile =
        profile_service::save_profile(state.users.as_ref(), &auth_user.id, &update).await?;
    Ok(Json(profile))
}
