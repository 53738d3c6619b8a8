//! Block-device enumeration from a sysfs tree
//!
//! Walks `/sys/block` (or a configured stand-in), skipping pseudo-devices
//! and reading per-device attribute files. A missing attribute leaves its
//! field at the zero/unknown value; only an unreadable registry fails the
//! whole enumeration.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::{BusType, DriveInfo, SolidState, StorageError, StorageResult};

/// Size of the unit the kernel reports in the `size` attribute
pub const SECTOR_SIZE: u64 = 512;

/// Loopback and RAM-backed pseudo-devices, never reported
pub const PSEUDO_DEVICE_PREFIXES: &[&str] = &["loop", "ram"];

/// Enumerates block devices under a sysfs block directory
#[derive(Debug, Clone)]
pub struct SysfsEnumerator {
    root: PathBuf,
    excluded_prefixes: Vec<String>,
}

impl SysfsEnumerator {
    /// `extra_excluded_prefixes` adds to [`PSEUDO_DEVICE_PREFIXES`]
    pub fn new(root: impl Into<PathBuf>, extra_excluded_prefixes: Vec<String>) -> Self {
        Self {
            root: root.into(),
            excluded_prefixes: extra_excluded_prefixes,
        }
    }

    /// Whether a device name matches a pseudo-device or configured prefix
    pub fn is_excluded(&self, name: &str) -> bool {
        PSEUDO_DEVICE_PREFIXES
            .iter()
            .any(|prefix| name.starts_with(prefix))
            || self
                .excluded_prefixes
                .iter()
                .any(|prefix| !prefix.is_empty() && name.starts_with(prefix.as_str()))
    }

    /// List block devices, ordered by name
    pub fn list_drives(&self) -> StorageResult<Vec<DriveInfo>> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            StorageError::DeviceEnumeration(format!("{}: {}", self.root.display(), e))
        })?;

        // Non-UTF-8 names are reported lossily but read through the real path
        let mut devices: Vec<(String, PathBuf)> = entries
            .flatten()
            .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
            .filter(|(name, _)| !self.is_excluded(name))
            .collect();
        devices.sort_by(|a, b| a.0.cmp(&b.0));

        let drives: Vec<DriveInfo> = devices
            .iter()
            .map(|(name, base)| read_device(name, base))
            .collect();
        debug!("Enumerated {} block devices under {}", drives.len(), self.root.display());

        Ok(drives)
    }
}

fn read_device(name: &str, base: &Path) -> DriveInfo {
    let solid_state = read_attr(&base.join("queue/rotational"))
        .map(|flag| parse_rotational(&flag))
        .unwrap_or(SolidState::Unknown);

    let model = read_attr(&base.join("device/model")).unwrap_or_default();
    let serial = read_attr(&base.join("device/serial")).unwrap_or_default();

    let size_bytes = read_attr(&base.join("size"))
        .and_then(|sectors| sectors.parse::<u64>().ok())
        .map(|sectors| sectors.saturating_mul(SECTOR_SIZE))
        .unwrap_or(0);

    DriveInfo {
        name: name.to_string(),
        model,
        serial,
        size_bytes,
        bus: bus_from_name(name),
        solid_state,
    }
}

/// Read and trim a sysfs attribute, `None` if it cannot be read
fn read_attr(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(value) => Some(value.trim().to_string()),
        Err(e) => {
            debug!("Skipping attribute {}: {}", path.display(), e);
            None
        }
    }
}

/// Map the `queue/rotational` flag to a solid-state tri-state
pub fn parse_rotational(flag: &str) -> SolidState {
    match flag.trim() {
        "0" => SolidState::Yes,
        "1" => SolidState::No,
        _ => SolidState::Unknown,
    }
}

/// Infer the bus from the kernel device name
pub fn bus_from_name(name: &str) -> BusType {
    if name.starts_with("nvme") {
        BusType::Nvme
    } else if name.starts_with("sd") {
        BusType::ScsiSataUsb
    } else if name.starts_with("vd") || name.starts_with("xvd") {
        BusType::Virtual
    } else if name.starts_with("hd") {
        BusType::Ata
    } else {
        BusType::Unknown
    }
}
