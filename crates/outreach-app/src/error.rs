use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, async_trait};
use serde::Serialize;
use thiserror::Error;

use outreach_core::error::CoreError;
use outreach_db::error::DbError;
use outreach_service::error::ServiceError;

/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] DbError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ServiceError(ServiceError::ValidationError(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::ServiceError(ServiceError::NotFound(message.into()))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::ServiceError(ServiceError::Conflict(message.into()))
    }

    /// Maps the error taxonomy to an HTTP status: Validation -> 400,
    /// NotFound -> 404, Conflict -> 409, store unavailable -> 503,
    /// everything else -> 500.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ServiceError(service_error) => match service_error {
                ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Conflict(_) => StatusCode::CONFLICT,
                ServiceError::DatabaseError(db_error) => db_status(db_error),
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::DatabaseError(db_error) => db_status(db_error),
            AppError::CoreError(CoreError::ValidationError(_) | CoreError::InvalidInput(_)) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to echo to the caller. Server-side failures keep their
    /// detail in the log only.
    #[must_use]
    pub fn public_message(&self) -> String {
        // Fixture problems are admin-facing 500s whose cause is worth
        // echoing; other server-side failures stay generic.
        if let AppError::ServiceError(ServiceError::FixtureError(detail)) = self {
            return format!("Fixture error: {detail}");
        }

        match self.status() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            StatusCode::SERVICE_UNAVAILABLE => "Database unavailable".to_string(),
            _ => self.to_string(),
        }
    }
}

fn db_status(db_error: &DbError) -> StatusCode {
    if db_error.is_unique_violation() {
        StatusCode::CONFLICT
    } else if matches!(db_error, DbError::PoolError(_)) {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[async_trait]
impl salvo::Writer for AppError {
    async fn write(mut self, _req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        res.status_code(status);
        res.render(Json(ErrorResponse {
            error: self.public_message(),
        }));
    }
}
