use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;
use crate::services::admin_service;
use crate::state::AppState;

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: String,
}

#[derive(Deserialize)]
struct JwtPayload {
    sub: String,
}

fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if bearer.is_some() {
        return bearer;
    }

    headers
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split(';')
                .map(str::trim)
                .find_map(|c| c.strip_prefix("access_token="))
        })
}

/// Reads the subject from the JWT payload. The signature belongs to the auth
/// provider and is checked upstream of this service.
pub fn subject_from_token(token: &str) -> Option<String> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload_bytes = general_purpose::URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload = serde_json::from_slice::<JwtPayload>(&payload_bytes).ok()?;
    Some(payload.sub).filter(|s| !s.trim().is_empty())
}

pub async fn require_auth(mut request: Request, next: Next) -> Response {
    let user_id = token_from_headers(request.headers()).and_then(subject_from_token);

    let Some(user_id) = user_id else {
        debug!("Rejected request without a usable token: {}", request.uri().path());
        return AppError::Unauthorized.into_response();
    };

    request
        .extensions_mut()
        .insert(AuthenticatedUser { id: user_id });
    next.run(request).await
}

pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(user) = request.extensions().get::<AuthenticatedUser>().cloned() else {
        return AppError::Unauthorized.into_response();
    };

    if let Err(e) = admin_service::require_admin(state.users.as_ref(), &user.id).await {
        return e.into_response();
    }
    next.run(request).await
}
