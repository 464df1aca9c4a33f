use crate::api::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadUpload(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Recipe {recipe_id} references missing author {author_id}")]
    MissingAuthor { recipe_id: i32, author_id: i32 },

    #[error("Database error: {0}")]
    Database(#[from] DieselError),

    #[error("Database connection failed: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Maps a unique-constraint violation to `Conflict`; other database
    /// errors pass through unchanged.
    pub fn conflict_on_unique(err: DieselError, message: &str) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                Self::Conflict(message.to_string())
            }
            other => Self::Database(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadUpload(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::MissingAuthor { .. }
            | Self::Database(_)
            | Self::Pool(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity() {
        let err = AppError::NotFound("Ingredient");
        assert_eq!(err.to_string(), "Ingredient not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn storage_failures_are_server_errors() {
        let err = AppError::from(DieselError::RollbackTransaction);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::MissingAuthor {
            recipe_id: 1,
            author_id: 9,
        };
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn non_unique_errors_are_not_conflicts() {
        let err = AppError::conflict_on_unique(DieselError::NotFound, "duplicate");
        assert!(matches!(err, AppError::Database(DieselError::NotFound)));
    }
}
