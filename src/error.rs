use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::response::ErrorBody;

/// Failures raised by the data-access layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No valid updates provided")]
    NoUpdatesProvided,

    #[error("{0}")]
    UniqueViolation(&'static str),

    #[error("Cannot delete category \"{name}\": it is used by {items} inventory item(s)")]
    CategoryInUse { name: String, items: u64 },

    #[error("database error")]
    Database(#[from] sqlx::Error),

    #[error("database error")]
    Orm(#[from] DbErr),
}

impl StoreError {
    /// Re-map a unique-constraint failure on write to `UniqueViolation`.
    pub(crate) fn on_write(err: DbErr, conflict: &'static str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::UniqueViolation(conflict),
            _ => StoreError::Orm(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NoUpdatesProvided => AppError::BadRequest(err.to_string()),
            StoreError::UniqueViolation(msg) => AppError::Conflict(msg.to_string()),
            StoreError::CategoryInUse { .. } => AppError::Conflict(err.to_string()),
            StoreError::Database(e) => AppError::DbError(e),
            StoreError::Orm(e) => AppError::OrmError(e),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::DbError(e) => {
                tracing::error!(error = %e, "database error");
                ErrorBody::internal("database error")
            }
            AppError::OrmError(e) => {
                tracing::error!(error = %e, "orm error");
                ErrorBody::internal("database error")
            }
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "internal error");
                ErrorBody::internal("internal error")
            }
            _ => ErrorBody::new(self.to_string()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
