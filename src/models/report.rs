//! Storage report model

use serde::{Deserialize, Serialize};

use super::drive::DriveInfo;

/// Host OS family tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Windows,
    Darwin,
    Unknown,
}

impl Platform {
    /// Platform this binary was built for
    pub const fn current() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Darwin
        } else {
            Platform::Unknown
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Linux => write!(f, "linux"),
            Platform::Windows => write!(f, "windows"),
            Platform::Darwin => write!(f, "darwin"),
            Platform::Unknown => write!(f, "unknown"),
        }
    }
}

/// Raw filesystem statistics for one volume root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    pub total: u64,
    pub free: u64,
    /// Free bytes available to unprivileged callers
    pub available: u64,
    pub platform: Platform,
}

impl DiskUsage {
    /// Used bytes, clamped to zero when `free` exceeds `total`
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.free)
    }

    /// False when the OS reported free or available space above the total,
    /// which can happen under concurrent filesystem activity
    pub fn is_consistent(&self) -> bool {
        self.free <= self.total && self.available <= self.total
    }
}

/// Storage metadata for the host, built fresh for each request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageReport {
    pub platform: Platform,
    pub total_storage: u64,
    pub used_storage: u64,
    pub free_storage: u64,
    pub available_storage: u64,
    pub drives: Vec<DriveInfo>,
}

impl StorageReport {
    pub fn new(usage: DiskUsage, drives: Vec<DriveInfo>) -> Self {
        Self {
            platform: usage.platform,
            total_storage: usage.total,
            used_storage: usage.used(),
            free_storage: usage.free,
            available_storage: usage.available.min(usage.total),
            drives,
        }
    }
}
