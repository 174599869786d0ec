//! # File I/O Module
//!
//! Handles store file operations with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **File locking**: Prevent concurrent edits on shared drives
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Stores are saved as `.pack` files containing JSON.
//! Lock files use the `.pack.lock` extension with metadata about who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pack_core::file_io::{save_store, FileLock};
//! use pack_core::store::PackagingStore;
//! use std::path::Path;
//!
//! let store = PackagingStore::new("Operations");
//! let path = Path::new("catalog.pack");
//!
//! let lock = FileLock::acquire(path, "planner@company.com").unwrap();
//! save_store(&store, path).unwrap();
//!
//! // Lock is released when dropped
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::store::{PackagingStore, SCHEMA_VERSION};

/// Locks older than this are taken over regardless of the holder
const STALE_LOCK_HOURS: i64 = 24;

/// Lock file metadata stored in .pack.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine name where lock was acquired
    pub machine: String,
    /// Process ID that holds the lock
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Create new lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Holder description used in lock errors
    pub fn holder(&self) -> String {
        format!("{} ({})", self.user_id, self.machine)
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

/// Exclusive edit lock on a store file, released on drop.
///
/// Combines an OS-level lock (via fs2) with a `.lock` sidecar holding
/// [`LockInfo`] so other users can see who is editing.
pub struct FileLock {
    store_path: PathBuf,
    lock_path: PathBuf,
    /// Keeps the OS lock alive
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a store file.
    ///
    /// A sidecar left behind by a dead process, or older than 24 hours, is
    /// taken over.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock acquired successfully
    /// * `Err(CalcError::FileLocked)` - Another process holds the lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if let Some(existing) = FileLock::check(path) {
            return Err(CalcError::file_locked(
                path.display().to_string(),
                existing.holder(),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| {
                CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string())
            })?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let lock_json = serde_json::to_string_pretty(&info)
            .map_err(|e| CalcError::serialization(e.to_string()))?;

        lock_file.write_all(lock_json.as_bytes()).map_err(|e| {
            CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string())
        })?;

        lock_file.sync_all().map_err(|e| {
            CalcError::file_error("sync lock", lock_path.display().to_string(), e.to_string())
        })?;

        tracing::debug!(path = %path.display(), user = %info.user_id, "store lock acquired");

        Ok(FileLock {
            store_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Check if a file is locked without acquiring the lock.
    ///
    /// Returns `Some(LockInfo)` if a live lock exists, `None` if available.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if !lock_path.exists() {
            return None;
        }
        match read_lock_info(&lock_path) {
            Ok(info) if !is_lock_stale(&info) => Some(info),
            Ok(info) => {
                tracing::warn!(holder = %info.holder(), "taking over stale store lock");
                None
            }
            Err(_) => None,
        }
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `catalog.pack` -> `catalog.pack.lock`
fn lock_path_for(store_path: &Path) -> PathBuf {
    let mut lock_path = store_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let contents = read_to_string(lock_path, "read lock")?;
    serde_json::from_str(&contents).map_err(|e| CalcError::serialization(e.to_string()))
}

/// A lock is stale when its process is gone (same machine only) or it is
/// older than [`STALE_LOCK_HOURS`].
fn is_lock_stale(info: &LockInfo) -> bool {
    if hostname().is_some_and(|ours| ours == info.machine) && !process_alive(info.pid) {
        return true;
    }

    let age = Utc::now() - info.locked_at;
    age.num_hours() > STALE_LOCK_HOURS
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(windows)]
fn process_alive(pid: u32) -> bool {
    use std::process::Command;
    match Command::new("tasklist")
        .args(["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
    {
        Ok(output) => String::from_utf8_lossy(&output.stdout).contains(&pid.to_string()),
        Err(_) => true,
    }
}

#[cfg(not(any(unix, windows)))]
fn process_alive(_pid: u32) -> bool {
    true
}

fn read_to_string(path: &Path, operation: &str) -> CalcResult<String> {
    let mut file =
        File::open(path).map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Save a store to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize store to JSON
/// 2. Write to a temporary file (.pack.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp over the target
///
/// # Example
///
/// ```rust,no_run
/// use pack_core::file_io::save_store;
/// use pack_core::store::PackagingStore;
/// use std::path::Path;
///
/// let store = PackagingStore::new("Operations");
/// save_store(&store, Path::new("catalog.pack"))?;
/// # Ok::<(), pack_core::errors::CalcError>(())
/// ```
pub fn save_store(store: &PackagingStore, path: &Path) -> CalcResult<()> {
    let json =
        serde_json::to_string_pretty(store).map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = path.with_extension("pack.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(
        path = %path.display(),
        products = store.products.len(),
        configurations = store.configurations.len(),
        "store saved"
    );
    Ok(())
}

/// Load a store from a file.
///
/// # Returns
///
/// * `Ok(PackagingStore)` - Successfully loaded store
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_store(path: &Path) -> CalcResult<PackagingStore> {
    let contents = read_to_string(path, "read")?;

    let store: PackagingStore = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&store.meta.version)?;

    tracing::info!(path = %path.display(), products = store.products.len(), "store loaded");
    Ok(store)
}

/// Load a store, also reporting whether someone else is editing it.
///
/// # Returns
///
/// * `Ok((PackagingStore, None))` - Loaded successfully, no lock
/// * `Ok((PackagingStore, Some(LockInfo)))` - Loaded, but another user has the lock
/// * `Err(_)` - Failed to load
pub fn load_store_with_lock_check(path: &Path) -> CalcResult<(PackagingStore, Option<LockInfo>)> {
    let store = load_store(path)?;
    let lock_info = FileLock::check(path);
    Ok((store, lock_info))
}

/// Major versions must match; in 0.x a newer minor is rejected too.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, ..], [current_major, ..]) if file_major != current_major => Err(mismatch()),
        ([0, file_minor, ..], [0, current_minor, ..]) if file_minor > current_minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}
