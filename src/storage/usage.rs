//! Disk usage for a volume root

use std::path::Path;

use crate::models::{DiskUsage, Platform, StorageError, StorageResult};

/// Get total/free/available bytes for the filesystem containing `path`
#[cfg(unix)]
pub fn disk_usage(path: &Path) -> StorageResult<DiskUsage> {
    use std::ffi::CString;
    use std::mem::MaybeUninit;
    use std::os::unix::ffi::OsStrExt;

    let path_cstr = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| StorageError::filesystem_query(path.display().to_string(), e))?;

    let mut stat: MaybeUninit<libc::statvfs> = MaybeUninit::uninit();

    let result = unsafe { libc::statvfs(path_cstr.as_ptr(), stat.as_mut_ptr()) };

    if result != 0 {
        return Err(StorageError::filesystem_query(
            path.display().to_string(),
            std::io::Error::last_os_error(),
        ));
    }

    let stat = unsafe { stat.assume_init() };

    // f_blocks and friends are counted in f_frsize units
    let block_size = match stat.f_frsize as u64 {
        0 => stat.f_bsize as u64,
        frsize => frsize,
    };

    Ok(DiskUsage {
        total: (stat.f_blocks as u64).saturating_mul(block_size),
        free: (stat.f_bfree as u64).saturating_mul(block_size),
        available: (stat.f_bavail as u64).saturating_mul(block_size),
        platform: Platform::current(),
    })
}

/// Get total/free/available bytes for the volume rooted at `path`
#[cfg(windows)]
pub fn disk_usage(path: &Path) -> StorageResult<DiskUsage> {
    use std::os::windows::ffi::OsStrExt;
    use windows::core::PCWSTR;
    use windows::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let mut available = 0u64;
    let mut total = 0u64;
    let mut free = 0u64;

    unsafe {
        GetDiskFreeSpaceExW(
            PCWSTR(wide.as_ptr()),
            Some(&mut available),
            Some(&mut total),
            Some(&mut free),
        )
    }
    .map_err(|e| StorageError::filesystem_query(path.display().to_string(), e))?;

    Ok(DiskUsage {
        total,
        free,
        available,
        platform: Platform::Windows,
    })
}

#[cfg(not(any(unix, windows)))]
pub fn disk_usage(path: &Path) -> StorageResult<DiskUsage> {
    Err(StorageError::filesystem_query(
        path.display().to_string(),
        "filesystem statistics are not supported on this platform",
    ))
}
