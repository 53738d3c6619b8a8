//! Physical drive metadata from WMI
//!
//! Two providers are queried side by side:
//! - `MSFT_PhysicalDisk` (Storage namespace) is preferred; it reports bus
//!   and media type directly.
//! - `Win32_DiskDrive` (default namespace) enriches missing fields and is
//!   the sole source when the Storage provider returns nothing.
//!
//! The merge is a pure function over both query results so it can be
//! exercised on any host.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use tracing::debug;

use crate::models::{BusType, DriveInfo, SolidState, StorageError, StorageResult};

/// Namespace hosting `MSFT_PhysicalDisk`
pub const STORAGE_NAMESPACE: &str = r"ROOT\Microsoft\Windows\Storage";

/// Record from the Storage-namespace provider
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename = "MSFT_PhysicalDisk", rename_all = "PascalCase")]
pub struct MsftPhysicalDisk {
    /// Disk number as a string (matches `Win32_DiskDrive.Index`)
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub size: u64,
    #[serde(default)]
    pub bus_type: Option<u16>,
    #[serde(default)]
    pub media_type: Option<u16>,
}

impl MsftPhysicalDisk {
    pub fn index(&self) -> Option<u32> {
        self.device_id.as_deref().and_then(|id| id.trim().parse().ok())
    }
}

/// Record from the legacy disk-drive provider
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename = "Win32_DiskDrive", rename_all = "PascalCase")]
pub struct Win32DiskDrive {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Bytes, reported as a string by most WMI builds
    #[serde(default, deserialize_with = "lenient_u64")]
    pub size: u64,
    /// e.g. `\\.\PHYSICALDRIVE0`
    #[serde(default, rename = "DeviceID")]
    pub device_id: Option<String>,
    /// "SCSI", "IDE", "USB", ...
    #[serde(default)]
    pub interface_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => n,
        Some(NumberOrText::Text(s)) => s.trim().parse().unwrap_or(0),
        None => 0,
    })
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// `MSFT_PhysicalDisk.MediaType`: 3 = HDD, 4 = SSD, 5 = SCM
pub fn media_type_to_solid_state(media_type: Option<u16>) -> SolidState {
    match media_type {
        Some(4) | Some(5) => SolidState::Yes,
        Some(3) => SolidState::No,
        _ => SolidState::Unknown,
    }
}

/// `MSFT_PhysicalDisk.BusType`, falling back to the legacy interface type
pub fn bus_type_from_code(code: Option<u16>, fallback: &str) -> BusType {
    match code {
        Some(1) => BusType::Scsi,
        Some(2) => BusType::Atapi,
        Some(3) => BusType::Ata,
        Some(4) => BusType::Ieee1394,
        Some(6) => BusType::FibreChannel,
        Some(7) => BusType::Usb,
        Some(8) => BusType::Raid,
        Some(9) => BusType::Iscsi,
        Some(10) => BusType::Sas,
        Some(11) => BusType::Sata,
        Some(14) => BusType::Virtual,
        Some(16) => BusType::StorageSpaces,
        Some(17) => BusType::Nvme,
        _ => BusType::from_platform_label(fallback),
    }
}

/// Merge both provider results into one drive list
///
/// Fails only when neither provider yields usable data.
pub fn reconcile(
    modern: Result<Vec<MsftPhysicalDisk>, String>,
    legacy: Result<Vec<Win32DiskDrive>, String>,
) -> StorageResult<Vec<DriveInfo>> {
    let modern = match modern {
        Ok(disks) if disks.is_empty() => Err("no physical disks returned".to_string()),
        other => other,
    };

    match (modern, legacy) {
        (Err(modern_err), Err(legacy_err)) => {
            Err(StorageError::device_query(modern_err, legacy_err))
        }
        (Ok(disks), legacy) => {
            let legacy = legacy.unwrap_or_else(|e| {
                debug!("Win32_DiskDrive unavailable, skipping enrichment: {}", e);
                Vec::new()
            });
            Ok(merge_with_legacy(disks, legacy))
        }
        (Err(modern_err), Ok(legacy)) => {
            debug!("Falling back to Win32_DiskDrive: {}", modern_err);
            Ok(legacy.into_iter().map(legacy_only).collect())
        }
    }
}

fn merge_with_legacy(disks: Vec<MsftPhysicalDisk>, legacy: Vec<Win32DiskDrive>) -> Vec<DriveInfo> {
    let by_index: HashMap<u32, Win32DiskDrive> =
        legacy.into_iter().map(|d| (d.index, d)).collect();
    let missing = Win32DiskDrive::default();

    disks
        .into_iter()
        .map(|pd| {
            let index = pd.index();
            let w = index.and_then(|i| by_index.get(&i)).unwrap_or(&missing);

            let mut model = trimmed(&pd.friendly_name);
            if model.is_empty() {
                model = trimmed(&w.model);
            }

            let mut serial = trimmed(&pd.serial_number);
            if serial.is_empty() {
                serial = trimmed(&w.serial_number);
            }

            let size_bytes = if pd.size == 0 { w.size } else { pd.size };

            let mut name = trimmed(&w.device_id);
            if name.is_empty() {
                let number = index
                    .map(|i| i.to_string())
                    .unwrap_or_else(|| trimmed(&pd.device_id));
                name = format!(r"\\.\PHYSICALDRIVE{}", number);
            }

            DriveInfo {
                name,
                model,
                serial,
                size_bytes,
                bus: bus_type_from_code(pd.bus_type, &trimmed(&w.interface_type)),
                solid_state: media_type_to_solid_state(pd.media_type),
            }
        })
        .collect()
}

fn legacy_only(d: Win32DiskDrive) -> DriveInfo {
    DriveInfo {
        name: trimmed(&d.device_id),
        model: trimmed(&d.model),
        serial: trimmed(&d.serial_number),
        size_bytes: d.size,
        bus: BusType::from_platform_label(&trimmed(&d.interface_type)),
        solid_state: SolidState::Unknown,
    }
}

/// Enumerates physical drives through WMI
#[cfg(windows)]
#[derive(Debug, Clone, Default)]
pub struct WmiEnumerator;

#[cfg(windows)]
impl WmiEnumerator {
    pub fn list_drives(&self) -> StorageResult<Vec<DriveInfo>> {
        let com = match wmi::COMLibrary::new() {
            Ok(com) => com,
            Err(e) => {
                let reason = format!("COM initialization failed: {}", e);
                return Err(StorageError::device_query(reason.clone(), reason));
            }
        };

        let modern = wmi::WMIConnection::with_namespace_path(STORAGE_NAMESPACE, com)
            .and_then(|conn| conn.query::<MsftPhysicalDisk>())
            .map_err(|e| e.to_string());
        let legacy = wmi::WMIConnection::new(com)
            .and_then(|conn| conn.query::<Win32DiskDrive>())
            .map_err(|e| e.to_string());

        reconcile(modern, legacy)
    }
}
