use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use crate::error::AppResult;
use crate::models::UserProfile;
use crate::services::now_ms;
use crate::services::signup_service::{self, SignupForm, SignupStarted, VerifyRequest};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ResendRequest {
    pub email: String,
}

pub async fn start_handler(
    State(state): State<AppState>,
    Json(form): Json<SignupForm>,
) -> AppResult<(StatusCode, Json<SignupStarted>)> {
    info!("📝 Sign-up attempt: email={}", form.email);
    let started =
        signup_service::start_signup(state.users.as_ref(), state.mail.as_ref(), &form, now_ms())
            .await?;
    Ok((StatusCode::ACCEPTED, Json(started)))
}

pub async fn resend_handler(
    State(state): State<AppState>,
    Json(request): Json<ResendRequest>,
) -> AppResult<Json<SignupStarted>> {
    let started = signup_service::resend_code(
        state.users.as_ref(),
        state.mail.as_ref(),
        &request.email,
        now_ms(),
    )
    .await?;
    Ok(Json(started))
}

pub async fn verify_handler(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    let user = signup_service::verify_code(state.users.as_ref(), &request, now_ms()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
