//! Platform storage collectors
//!
//! One [`StorageCollector`] implementation exists per OS family; the one
//! matching the build target is returned by [`default_collector`].

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::StorageSettings;
use crate::models::{DiskUsage, DriveInfo, Platform, StorageResult};

/// Capability interface over the host's storage facilities
pub trait StorageCollector: Send + Sync {
    /// Platform tag reported alongside usage figures
    fn platform(&self) -> Platform;

    /// Root of the primary/system volume
    fn primary_root(&self) -> PathBuf;

    /// Usage statistics for the filesystem containing `path`
    fn usage(&self, path: &std::path::Path) -> StorageResult<DiskUsage>;

    /// Physical drives visible to the OS
    fn list_drives(&self) -> StorageResult<Vec<DriveInfo>>;
}

/// Collector for POSIX-like hosts: `statvfs` plus a sysfs walk
#[cfg(unix)]
pub struct PosixCollector {
    enumerator: super::sysfs::SysfsEnumerator,
}

#[cfg(unix)]
impl PosixCollector {
    pub fn new(settings: &StorageSettings) -> Self {
        Self {
            enumerator: super::sysfs::SysfsEnumerator::new(
                &settings.block_device_path,
                settings.extra_excluded_prefixes.clone(),
            ),
        }
    }
}

#[cfg(unix)]
impl StorageCollector for PosixCollector {
    fn platform(&self) -> Platform {
        Platform::current()
    }

    fn primary_root(&self) -> PathBuf {
        PathBuf::from("/")
    }

    fn usage(&self, path: &std::path::Path) -> StorageResult<DiskUsage> {
        super::usage::disk_usage(path)
    }

    fn list_drives(&self) -> StorageResult<Vec<DriveInfo>> {
        self.enumerator.list_drives()
    }
}

/// Collector for Windows hosts: `GetDiskFreeSpaceExW` plus WMI
#[cfg(windows)]
pub struct WindowsCollector {
    enumerator: super::wmi_source::WmiEnumerator,
}

#[cfg(windows)]
impl WindowsCollector {
    pub fn new(_settings: &StorageSettings) -> Self {
        Self {
            enumerator: super::wmi_source::WmiEnumerator,
        }
    }
}

#[cfg(windows)]
impl StorageCollector for WindowsCollector {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn primary_root(&self) -> PathBuf {
        PathBuf::from(system_drive_root(std::env::var("SYSTEMDRIVE").ok()))
    }

    fn usage(&self, path: &std::path::Path) -> StorageResult<DiskUsage> {
        super::usage::disk_usage(path)
    }

    fn list_drives(&self) -> StorageResult<Vec<DriveInfo>> {
        self.enumerator.list_drives()
    }
}

/// Collector for targets without a native implementation
#[cfg(not(any(unix, windows)))]
pub struct UnsupportedCollector;

#[cfg(not(any(unix, windows)))]
impl StorageCollector for UnsupportedCollector {
    fn platform(&self) -> Platform {
        Platform::Unknown
    }

    fn primary_root(&self) -> PathBuf {
        PathBuf::from("/")
    }

    fn usage(&self, path: &std::path::Path) -> StorageResult<DiskUsage> {
        super::usage::disk_usage(path)
    }

    fn list_drives(&self) -> StorageResult<Vec<DriveInfo>> {
        Err(crate::models::StorageError::DeviceEnumeration(
            "drive enumeration is not supported on this platform".to_string(),
        ))
    }
}

/// Build the collector for the current target
pub fn default_collector(settings: &StorageSettings) -> Arc<dyn StorageCollector> {
    #[cfg(unix)]
    {
        Arc::new(PosixCollector::new(settings))
    }
    #[cfg(windows)]
    {
        Arc::new(WindowsCollector::new(settings))
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = settings;
        Arc::new(UnsupportedCollector)
    }
}

/// Volume root derived from a `SYSTEMDRIVE` value such as `C:`
pub fn system_drive_root(system_drive: Option<String>) -> String {
    match system_drive.as_deref().map(str::trim) {
        Some(drive) if !drive.is_empty() => {
            if drive.ends_with('\\') {
                drive.to_string()
            } else {
                format!("{}\\", drive)
            }
        }
        _ => r"C:\".to_string(),
    }
}
