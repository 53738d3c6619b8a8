//! Storage collection for the host
//!
//! Reads filesystem usage for a volume root and enumerates physical drives
//! through the OS-native interfaces: `statvfs` and sysfs on POSIX-like
//! systems, `GetDiskFreeSpaceExW` and WMI on Windows.

pub mod collector;
pub mod sysfs;
pub mod usage;
pub mod wmi_source;

pub use collector::*;
