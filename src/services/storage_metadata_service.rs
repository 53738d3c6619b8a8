//! Storage report assembly
//!
//! Usage figures for the primary volume are mandatory: if they cannot be
//! read the report fails and drives are not enumerated. Drive enumeration
//! is best-effort and degrades to an empty list.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::metrics;
use crate::models::{StorageReport, StorageResult};
use crate::storage::StorageCollector;

/// Builds [`StorageReport`]s from a platform collector
pub struct StorageMetadataService {
    collector: Arc<dyn StorageCollector>,
    root_override: Option<PathBuf>,
}

impl StorageMetadataService {
    pub fn new(collector: Arc<dyn StorageCollector>) -> Self {
        Self {
            collector,
            root_override: None,
        }
    }

    /// Report usage for `root` instead of the collector's primary volume
    pub fn with_root(mut self, root: Option<impl Into<PathBuf>>) -> Self {
        self.root_override = root.map(Into::into);
        self
    }

    /// Volume root the report covers
    pub fn root(&self) -> PathBuf {
        self.root_override
            .clone()
            .unwrap_or_else(|| self.collector.primary_root())
    }

    /// Collect usage and drives into a fresh report
    pub fn build_report(&self) -> StorageResult<StorageReport> {
        let started = Instant::now();
        let root = self.root();

        let usage = match self.collector.usage(&root) {
            Ok(usage) => usage,
            Err(e) => {
                metrics::record_storage_report_duration(started.elapsed().as_secs_f64());
                return Err(e);
            }
        };
        debug!(
            "Usage for {}: total={} free={} available={}",
            root.display(),
            usage.total,
            usage.free,
            usage.available
        );

        if !usage.is_consistent() {
            warn!(
                "Inconsistent usage for {}: total={} free={} available={}; clamping",
                root.display(),
                usage.total,
                usage.free,
                usage.available
            );
        }

        let drives = match self.collector.list_drives() {
            Ok(drives) => drives,
            Err(e) => {
                warn!("Drive enumeration failed, reporting no drives: {}", e);
                metrics::record_drive_enumeration_failure();
                Vec::new()
            }
        };

        metrics::set_drives_detected(drives.len() as i64);
        metrics::record_storage_report_duration(started.elapsed().as_secs_f64());

        Ok(StorageReport::new(usage, drives))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{BusType, DiskUsage, DriveInfo, Platform, SolidState, StorageError};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Collector returning canned results
    pub(crate) struct FakeCollector {
        pub usage: Result<DiskUsage, String>,
        pub drives: Result<Vec<DriveInfo>, String>,
        pub list_calls: AtomicUsize,
    }

    impl FakeCollector {
        pub(crate) fn new(usage: Result<DiskUsage, String>, drives: Result<Vec<DriveInfo>, String>) -> Self {
            Self {
                usage,
                drives,
                list_calls: AtomicUsize::new(0),
            }
        }
    }

    impl StorageCollector for FakeCollector {
        fn platform(&self) -> Platform {
            Platform::Linux
        }

        fn primary_root(&self) -> PathBuf {
            PathBuf::from("/")
        }

        fn usage(&self, path: &Path) -> StorageResult<DiskUsage> {
            self.usage
                .clone()
                .map_err(|e| StorageError::filesystem_query(path.display().to_string(), e))
        }

        fn list_drives(&self) -> StorageResult<Vec<DriveInfo>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.drives.clone().map_err(StorageError::DeviceEnumeration)
        }
    }

    pub(crate) fn gigabyte_usage() -> DiskUsage {
        DiskUsage {
            total: 1_000_000_000,
            free: 400_000_000,
            available: 350_000_000,
            platform: Platform::Linux,
        }
    }

    pub(crate) fn ssd() -> DriveInfo {
        DriveInfo {
            name: "sda".to_string(),
            bus: BusType::ScsiSataUsb,
            solid_state: SolidState::Yes,
            ..Default::default()
        }
    }

    #[test]
    fn test_report_combines_usage_and_drives() {
        let collector = FakeCollector::new(Ok(gigabyte_usage()), Ok(vec![ssd()]));
        let service = StorageMetadataService::new(Arc::new(collector));

        let report = service.build_report().unwrap();
        assert_eq!(report.platform, Platform::Linux);
        assert_eq!(report.total_storage, 1_000_000_000);
        assert_eq!(report.used_storage, 600_000_000);
        assert_eq!(report.free_storage, 400_000_000);
        assert!(report.available_storage <= report.total_storage);
        assert_eq!(report.drives, vec![ssd()]);
    }

    #[test]
    fn test_enumeration_failure_yields_empty_drives() {
        let collector = FakeCollector::new(Ok(gigabyte_usage()), Err("no sysfs".to_string()));
        let service = StorageMetadataService::new(Arc::new(collector));

        let report = service.build_report().unwrap();
        assert!(report.drives.is_empty());
        assert_eq!(report.used_storage, 600_000_000);
    }

    #[test]
    fn test_usage_failure_skips_enumeration() {
        let collector = Arc::new(FakeCollector::new(
            Err("permission denied".to_string()),
            Ok(vec![ssd()]),
        ));
        let service = StorageMetadataService::new(collector.clone());

        let err = service.build_report().unwrap_err();
        assert!(matches!(err, StorageError::FilesystemQuery { .. }));
        assert_eq!(collector.list_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_usage_failure_still_records_duration() {
        let collector = FakeCollector::new(Err("device not ready".to_string()), Ok(Vec::new()));
        let service = StorageMetadataService::new(Arc::new(collector));

        let before = metrics::storage_report_duration_count();
        assert!(service.build_report().is_err());
        assert!(metrics::storage_report_duration_count() >= before + 1);
    }

    #[test]
    fn test_inconsistent_usage_is_clamped() {
        let usage = DiskUsage {
            total: 500,
            free: 800,
            available: 900,
            platform: Platform::Linux,
        };
        let collector = FakeCollector::new(Ok(usage), Ok(Vec::new()));
        let service = StorageMetadataService::new(Arc::new(collector));

        let report = service.build_report().unwrap();
        assert_eq!(report.used_storage, 0);
        assert_eq!(report.available_storage, 500);
    }

    #[test]
    fn test_root_override() {
        let collector = FakeCollector::new(Ok(gigabyte_usage()), Ok(Vec::new()));
        let service = StorageMetadataService::new(Arc::new(collector));
        assert_eq!(service.root(), PathBuf::from("/"));

        let service = service.with_root(Some("/var/lib"));
        assert_eq!(service.root(), PathBuf::from("/var/lib"));
    }
}
