use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Every failure a service can report. None of them is fatal: handlers turn
/// each variant into a JSON body and the screen keeps its current state.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("mail relay error: {0}")]
    Mail(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Mail(_) => StatusCode::BAD_GATEWAY,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::Store(_) => "store_failed",
            AppError::Validation { .. } => "validation_failed",
            AppError::Mail(_) => "mail_failed",
            AppError::Unauthorized => "unauthorized",
            AppError::Forbidden => "forbidden",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Store(e) = &self {
            error!("Store call failed: {}", e);
        }

        let field = match &self {
            AppError::Validation { field, .. } => Some(*field),
            _ => None,
        };
        let message = match &self {
            AppError::Store(_) => "Something went wrong".to_string(),
            other => other.to_string(),
        };
        let body = json!({
            "error": self.code(),
            "field": field,
            "message": message,
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn store_errors_stay_out_of_the_body() {
        let raw = sqlx::Error::Protocol("no such table: landmarks".into());
        let (status, body) = body_of(AppError::Store(raw)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "store_failed");
        assert_eq!(body["message"], "Something went wrong");
        assert!(!body.to_string().contains("landmarks"));
    }

    #[tokio::test]
    async fn validation_names_the_field() {
        let (status, body) = body_of(AppError::validation("email", "Required")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["field"], "email");
        assert_eq!(body["message"], "email: Required");
    }
}
