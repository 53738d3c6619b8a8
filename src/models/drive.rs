//! Physical drive model

use serde::{Deserialize, Serialize};

/// Transport/interface category of a storage device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum BusType {
    Nvme,
    Sata,
    Scsi,
    Usb,
    Sas,
    Ata,
    Atapi,
    Ieee1394,
    FibreChannel,
    Raid,
    Iscsi,
    Virtual,
    StorageSpaces,
    /// `sd*` devices on Linux, which may sit behind any of these buses
    ScsiSataUsb,
    Unknown,
    /// Platform-specific label that matches none of the above
    Other(String),
}

impl BusType {
    pub fn as_str(&self) -> &str {
        match self {
            BusType::Nvme => "NVMe",
            BusType::Sata => "SATA",
            BusType::Scsi => "SCSI",
            BusType::Usb => "USB",
            BusType::Sas => "SAS",
            BusType::Ata => "ATA",
            BusType::Atapi => "ATAPI",
            BusType::Ieee1394 => "IEEE 1394",
            BusType::FibreChannel => "Fibre Channel",
            BusType::Raid => "RAID",
            BusType::Iscsi => "iSCSI",
            BusType::Virtual => "Virtual",
            BusType::StorageSpaces => "Storage Spaces",
            BusType::ScsiSataUsb => "scsi/sata/usb",
            BusType::Unknown => "Unknown",
            BusType::Other(label) => label,
        }
    }

    /// Map a platform label onto a known bus, keeping unmatched labels as-is
    pub fn from_platform_label(label: &str) -> Self {
        BusType::from_label(label.trim())
    }

    /// Parse a display string back into a bus type
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "" | "Unknown" => BusType::Unknown,
            "NVMe" => BusType::Nvme,
            "SATA" => BusType::Sata,
            "SCSI" => BusType::Scsi,
            "USB" => BusType::Usb,
            "SAS" => BusType::Sas,
            "ATA" => BusType::Ata,
            "ATAPI" => BusType::Atapi,
            "IEEE 1394" => BusType::Ieee1394,
            "Fibre Channel" => BusType::FibreChannel,
            "RAID" => BusType::Raid,
            "iSCSI" => BusType::Iscsi,
            "Virtual" => BusType::Virtual,
            "Storage Spaces" => BusType::StorageSpaces,
            "scsi/sata/usb" => BusType::ScsiSataUsb,
            other => BusType::Other(other.to_string()),
        }
    }
}

impl Default for BusType {
    fn default() -> Self {
        BusType::Unknown
    }
}

impl std::fmt::Display for BusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<BusType> for String {
    fn from(bus: BusType) -> Self {
        bus.as_str().to_string()
    }
}

impl From<String> for BusType {
    fn from(label: String) -> Self {
        BusType::from_label(&label)
    }
}

/// Whether a device is flash-based, rotational, or indeterminate
///
/// Serialized as `true`, `false` or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Option<bool>", from = "Option<bool>")]
pub enum SolidState {
    Yes,
    No,
    Unknown,
}

impl Default for SolidState {
    fn default() -> Self {
        SolidState::Unknown
    }
}

impl From<SolidState> for Option<bool> {
    fn from(state: SolidState) -> Self {
        match state {
            SolidState::Yes => Some(true),
            SolidState::No => Some(false),
            SolidState::Unknown => None,
        }
    }
}

impl From<Option<bool>> for SolidState {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => SolidState::Yes,
            Some(false) => SolidState::No,
            None => SolidState::Unknown,
        }
    }
}

impl std::fmt::Display for SolidState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolidState::Yes => write!(f, "yes"),
            SolidState::No => write!(f, "no"),
            SolidState::Unknown => write!(f, "unknown"),
        }
    }
}

/// A physical storage device visible to the OS
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveInfo {
    /// Platform-native identifier (e.g. "sda", "\\.\PHYSICALDRIVE0")
    pub name: String,
    /// Model string, empty when unavailable
    pub model: String,
    /// Serial number, empty when unavailable
    pub serial: String,
    /// Size in bytes, 0 when the size query failed
    pub size_bytes: u64,
    pub bus: BusType,
    #[serde(rename = "isSsd")]
    pub solid_state: SolidState,
}

impl DriveInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_state_serializes_unknown_as_null() {
        let drive = DriveInfo::new("sda");
        let json = serde_json::to_value(&drive).unwrap();
        assert!(json["isSsd"].is_null());

        let drive = DriveInfo {
            solid_state: SolidState::No,
            ..DriveInfo::new("sdb")
        };
        let json = serde_json::to_value(&drive).unwrap();
        assert_eq!(json["isSsd"], serde_json::json!(false));
    }

    #[test]
    fn test_drive_field_names() {
        let drive = DriveInfo {
            name: "nvme0n1".to_string(),
            model: "Samsung SSD 980".to_string(),
            serial: "S64DNX0R".to_string(),
            size_bytes: 1_000_204_886_016,
            bus: BusType::Nvme,
            solid_state: SolidState::Yes,
        };
        let json = serde_json::to_value(&drive).unwrap();
        assert_eq!(json["name"], "nvme0n1");
        assert_eq!(json["sizeBytes"], 1_000_204_886_016u64);
        assert_eq!(json["bus"], "NVMe");
        assert_eq!(json["isSsd"], true);
    }

    #[test]
    fn test_bus_type_labels() {
        assert_eq!(BusType::ScsiSataUsb.to_string(), "scsi/sata/usb");
        assert_eq!(BusType::from_label("Fibre Channel"), BusType::FibreChannel);
        assert_eq!(BusType::from_label("IDE"), BusType::Other("IDE".to_string()));
        assert_eq!(BusType::from_platform_label("  "), BusType::Unknown);
        assert_eq!(BusType::from_platform_label(" SCSI "), BusType::Scsi);
        assert_eq!(BusType::from_platform_label("IDE"), BusType::Other("IDE".to_string()));
    }

    #[test]
    fn test_platform_labels_survive_json() {
        for label in ["USB", "SCSI", "IDE", "1394", ""] {
            let bus = BusType::from_platform_label(label);
            let json = serde_json::to_value(&bus).unwrap();
            let back: BusType = serde_json::from_value(json).unwrap();
            assert_eq!(back, bus);
        }
    }
}
