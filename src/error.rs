use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Template(#[from] askama::Error),
    #[error("mail error: {0}")]
    Mail(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Client(String),
    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn client(message: impl Into<String>) -> Self {
        Self::Client(message.into())
    }

    pub fn trip_not_found() -> Self {
        Self::NotFound("trip not found".into())
    }

    pub fn participant_not_found() -> Self {
        Self::NotFound("participant not found".into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Client(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Io(_)
            | AppError::Database(_)
            | AppError::Migrate(_)
            | AppError::Template(_)
            | AppError::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_facing_errors_map_to_4xx() {
        assert_eq!(
            AppError::client("end date must be after start date").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::trip_not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Mail("smtp down".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
