//! Error types for the storage collector

use thiserror::Error;

/// Storage collector errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Filesystem query failed for {path}: {reason}")]
    FilesystemQuery { path: String, reason: String },

    #[error("Device enumeration failed: {0}")]
    DeviceEnumeration(String),

    #[error("Device query failed: MSFT_PhysicalDisk={modern}; Win32_DiskDrive={legacy}")]
    DeviceQuery { modern: String, legacy: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorageError {
    pub fn filesystem_query(path: impl Into<String>, reason: impl ToString) -> Self {
        StorageError::FilesystemQuery {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn device_query(modern: impl Into<String>, legacy: impl Into<String>) -> Self {
        StorageError::DeviceQuery {
            modern: modern.into(),
            legacy: legacy.into(),
        }
    }
}

impl From<config::ConfigError> for StorageError {
    fn from(err: config::ConfigError) -> Self {
        StorageError::Config(err.to_string())
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
