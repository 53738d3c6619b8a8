//! Error responses

use actix_web::{HttpResponse, http::StatusCode};
use tracing::error;

use crate::models::StorageError;

/// Convert StorageError to HTTP response
///
/// The body is always empty; the cause is only logged.
impl From<StorageError> for HttpResponse {
    fn from(error: StorageError) -> Self {
        let status = match &error {
            StorageError::FilesystemQuery { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StorageError::DeviceEnumeration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StorageError::DeviceQuery { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StorageError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StorageError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error!("Request failed: {}", error);
        HttpResponse::build(status).finish()
    }
}

/// Result type that can be converted to HttpResponse
pub type ApiResult<T> = Result<T, StorageError>;
