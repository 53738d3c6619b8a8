//! Parachute - Host Monitoring Service
//!
//! A small HTTP service reporting:
//! - Liveness (`/heartbeat`)
//! - Storage metadata: usage of the system volume and the physical drives
//!   visible to the OS (`/storage-metadata`)

pub mod config;
pub mod models;
pub mod storage;
pub mod services;
pub mod api;
pub mod metrics;

// Re-export commonly used types
pub use config::Settings;
pub use models::{BusType, DiskUsage, DriveInfo, Platform, SolidState, StorageError, StorageReport, StorageResult};
pub use storage::{default_collector, StorageCollector};
pub use services::{HeartbeatService, StorageMetadataService};

/// Version of parachute
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
