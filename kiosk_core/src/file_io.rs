//! # Session Files
//!
//! Saves and loads design sessions:
//! - **Atomic saves**: write `<name>.kiosk.tmp`, fsync, rename over the target
//! - **Advisory locking**: an OS lock (fs2) plus a `.kiosk.lock` sidecar naming the holder
//! - **Version check**: refuse files written by an incompatible schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use kiosk_core::file_io::{load_session, save_session, FileLock};
//! use kiosk_core::session::DesignSession;
//! use std::path::Path;
//!
//! let path = Path::new("harbor.kiosk");
//! let session = DesignSession::new("Designer", "Harbor front");
//!
//! let lock = FileLock::acquire(path, "designer@example.com")?;
//! save_session(&session, path)?;
//! drop(lock);
//!
//! let reloaded = load_session(path)?;
//! assert_eq!(reloaded.meta.id, session.meta.id);
//! # Ok::<(), kiosk_core::errors::KioskError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{KioskError, KioskResult};
use crate::session::{DesignSession, SCHEMA_VERSION};

/// File extension for design sessions
pub const SESSION_EXTENSION: &str = "kiosk";

/// Locks older than this are considered abandoned
const STALE_LOCK_HOURS: i64 = 24;

/// Who holds a session lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine the lock was taken on
    pub machine: String,
    /// Process holding the lock
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn current(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: machine_name().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Holder no longer running on this machine, or the lock is too old
    pub fn is_stale(&self) -> bool {
        if Utc::now() - self.locked_at > chrono::Duration::hours(STALE_LOCK_HOURS) {
            return true;
        }
        match machine_name() {
            Some(machine) if machine == self.machine => !process_alive(self.pid),
            _ => false,
        }
    }
}

fn machine_name() -> Option<String> {
    ["HOSTNAME", "COMPUTERNAME", "HOST"]
        .iter()
        .find_map(|var| std::env::var(var).ok())
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    // No cheap liveness probe; rely on the age check
    true
}

/// Exclusive lock on a session file, released on drop.
pub struct FileLock {
    session_path: PathBuf,
    lock_path: PathBuf,
    /// Keeps the OS lock alive
    _handle: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the lock for `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(FileLock)` - Lock held until dropped
    /// * `Err(KioskError::FileLocked)` - Someone else holds a live lock
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> KioskResult<Self> {
        let lock_path = lock_path_for(path);

        if let Some(holder) = read_lock_info(&lock_path).filter(|info| !info.is_stale()) {
            return Err(KioskError::file_locked(
                path.display().to_string(),
                format!("{} ({})", holder.user_id, holder.machine),
                holder.locked_at.to_rfc3339(),
            ));
        }

        let io_err = |op: &str, e: std::io::Error| KioskError::file_error(op, lock_path.display().to_string(), e.to_string());

        let mut handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| io_err("create lock", e))?;

        handle.try_lock_exclusive().map_err(|_| {
            KioskError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let info = LockInfo::current(user_id);
        let json = serde_json::to_string_pretty(&info).map_err(|e| KioskError::SerializationError {
            reason: e.to_string(),
        })?;
        handle.write_all(json.as_bytes()).map_err(|e| io_err("write lock", e))?;
        handle.sync_all().map_err(|e| io_err("sync lock", e))?;

        Ok(FileLock {
            session_path: path.to_path_buf(),
            lock_path,
            _handle: handle,
            info,
        })
    }

    /// Current live lock on `path`, if any
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path)).filter(|info| !info.is_stale())
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `harbor.kiosk` -> `harbor.kiosk.lock`
fn lock_path_for(session_path: &Path) -> PathBuf {
    sidecar_path(session_path, "lock")
}

fn sidecar_path(session_path: &Path, suffix: &str) -> PathBuf {
    let mut path = session_path.to_path_buf();
    let extension = match session_path.extension() {
        Some(ext) => format!("{}.{}", ext.to_string_lossy(), suffix),
        None => suffix.to_string(),
    };
    path.set_extension(extension);
    path
}

fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a session with atomic write semantics.
///
/// The JSON is written to a `.tmp` sibling, synced, then renamed over `path`,
/// so an interrupted save never leaves a truncated session behind.
pub fn save_session(session: &DesignSession, path: &Path) -> KioskResult<()> {
    let json = serde_json::to_string_pretty(session).map_err(|e| KioskError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = sidecar_path(path, "tmp");
    let tmp_err = |op: &str, e: std::io::Error| KioskError::file_error(op, tmp_path.display().to_string(), e.to_string());

    let mut tmp_file = File::create(&tmp_path).map_err(|e| tmp_err("create temp file", e))?;
    tmp_file.write_all(json.as_bytes()).map_err(|e| tmp_err("write temp file", e))?;
    tmp_file.sync_all().map_err(|e| tmp_err("sync temp file", e))?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        KioskError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Load a session and check its schema version.
///
/// # Returns
///
/// * `Ok(DesignSession)` - Loaded session
/// * `Err(KioskError::VersionMismatch)` - Written by an incompatible schema
/// * `Err(KioskError::SerializationError)` - Not a valid session document
/// * `Err(KioskError::InvalidParameter | InvalidSelection)` - Edited into an invalid state
/// * `Err(KioskError::FileError)` - I/O error
pub fn load_session(path: &Path) -> KioskResult<DesignSession> {
    let contents = fs::read_to_string(path)
        .map_err(|e| KioskError::file_error("read", path.display().to_string(), e.to_string()))?;

    let session: DesignSession = serde_json::from_str(&contents).map_err(|e| KioskError::SerializationError {
        reason: format!("Invalid session in {}: {}", path.display(), e),
    })?;

    check_schema_version(&session.meta.version)?;
    session.validate()?;
    Ok(session)
}

/// Load a session and report whether someone else is editing it.
pub fn load_session_with_lock_check(path: &Path) -> KioskResult<(DesignSession, Option<LockInfo>)> {
    let session = load_session(path)?;
    Ok((session, FileLock::check(path)))
}

/// Same major version required; while on 0.x, files from a newer minor are refused.
fn check_schema_version(file_version: &str) -> KioskResult<()> {
    let parse = |v: &str| -> Option<(u32, u32)> {
        let mut parts = v.split('.').map(|p| p.parse::<u32>().ok());
        Some((parts.next()??, parts.next().flatten().unwrap_or(0)))
    };
    let mismatch = || KioskError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (file_major, file_minor) = parse(file_version).ok_or_else(mismatch)?;
    let (our_major, our_minor) = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != our_major || (our_major == 0 && file_minor > our_minor) {
        return Err(mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retrofits::{RetrofitId, RetrofitSelection};
    use std::env::temp_dir;

    fn temp_session_path(name: &str) -> PathBuf {
        temp_dir().join(format!("kiosk_test_{}_{}.kiosk", name, std::process::id()))
    }

    #[test]
    fn test_sidecar_paths() {
        let path = Path::new("/sites/harbor.kiosk");
        assert_eq!(lock_path_for(path), Path::new("/sites/harbor.kiosk.lock"));
        assert_eq!(sidecar_path(path, "tmp"), Path::new("/sites/harbor.kiosk.tmp"));
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_session_path("roundtrip");
        let session = DesignSession::new("Test Designer", "Test Site")
            .with_preset("Temporaire (Bambou)")
            .unwrap()
            .with_retrofit(RetrofitSelection::with_defaults(RetrofitId::SlidingDoors))
            .unwrap();

        save_session(&session, &path).unwrap();
        assert!(!sidecar_path(&path, "tmp").exists());

        let loaded = load_session(&path).unwrap();
        assert_eq!(loaded, session);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let path = temp_session_path("garbage");
        fs::write(&path, "{ not json").unwrap();
        let err = load_session(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);

        let missing = load_session(&temp_session_path("does_not_exist")).unwrap_err();
        assert_eq!(missing.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_rejects_edited_session() {
        let path = temp_session_path("edited");
        let session = DesignSession::new("Test", "Site")
            .with_retrofit(RetrofitSelection::with_defaults(RetrofitId::SlidingDoors))
            .unwrap();

        let mut json: serde_json::Value = serde_json::to_value(&session).unwrap();
        json["retrofits"][0]["count"] = serde_json::json!(9);
        fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();
        assert_eq!(load_session(&path).unwrap_err().error_code(), "INVALID_SELECTION");

        let mut json: serde_json::Value = serde_json::to_value(&session).unwrap();
        json["cost_optimization"] = serde_json::json!(200);
        fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();
        assert_eq!(load_session(&path).unwrap_err().error_code(), "INVALID_PARAMETER");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_lock_acquire_and_release() {
        let path = temp_session_path("lock");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "designer@example.com").unwrap();
        assert_eq!(lock.info.user_id, "designer@example.com");
        assert_eq!(lock.session_path(), path.as_path());
        assert!(lock_path_for(&path).exists());

        drop(lock);
        assert!(!lock_path_for(&path).exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_stale_lock_by_age() {
        let mut info = LockInfo::current("someone");
        info.locked_at = Utc::now() - chrono::Duration::hours(STALE_LOCK_HOURS + 1);
        assert!(info.is_stale());
    }

    #[test]
    fn test_schema_versions() {
        assert!(check_schema_version(SCHEMA_VERSION).is_ok());
        assert!(check_schema_version("0.1.7").is_ok());
        assert!(check_schema_version("0.0.3").is_ok());
        assert!(check_schema_version("0.2.0").is_err());
        assert!(check_schema_version("1.0.0").is_err());
        assert!(check_schema_version("banana").is_err());
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_session_path("lock_check");
        save_session(&DesignSession::new("Test", "Site"), &path).unwrap();

        let (loaded, holder) = load_session_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.designer, "Test");
        assert!(holder.is_none());

        let _ = fs::remove_file(&path);
    }
}
