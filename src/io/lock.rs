//! Lock file management for single-instance enforcement.
//!
//! The interactive host holds an exclusive `fs2` lock on a file in the runtime directory
//! for as long as it runs. The kernel drops the lock when the process dies, so a lock
//! that can be acquired is never stale; the PID written into the file is only used to
//! tell the user which process holds it.

use anyhow::{Context, Result, bail};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::common::constants::LOCK_FILE_NAME;

/// An acquired instance lock.
///
/// Released explicitly with [`LockFile::release`], or on drop if an early return skips
/// that call.
#[derive(Debug)]
pub struct LockFile {
    file: File,
    path: PathBuf,
    released: bool,
}

impl LockFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unlock and remove the lock file.
    pub fn release(mut self) -> Result<()> {
        self.unlock_and_remove()
    }

    fn unlock_and_remove(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        FileExt::unlock(&self.file)
            .with_context(|| format!("Failed to unlock {}", self.path.display()))?;
        std::fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        Ok(())
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if let Err(e) = self.unlock_and_remove() {
            log_warning!("Failed to release the lock file: {e}");
        }
    }
}

/// `$XDG_RUNTIME_DIR/vivace.lock`, falling back to `/tmp`.
pub fn default_lock_path() -> PathBuf {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());
    Path::new(&runtime_dir).join(LOCK_FILE_NAME)
}

/// Take the instance lock at `path` without blocking.
///
/// Fails if another process already holds it, naming that process when its PID can be
/// read from the file.
pub fn acquire_lock(path: &Path) -> Result<LockFile> {
    // Do not truncate before locking: the holder's PID must stay readable.
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .with_context(|| format!("Failed to open lock file {}", path.display()))?;

    if file.try_lock_exclusive().is_err() {
        match read_holder_pid(path) {
            Some(pid) => bail!("vivace is already running (PID: {pid})"),
            None => bail!("vivace is already running"),
        }
    }

    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    writeln!(file, "{}", std::process::id())?;
    file.flush()?;

    Ok(LockFile {
        file,
        path: path.to_path_buf(),
        released: false,
    })
}

fn read_holder_pid(path: &Path) -> Option<u32> {
    std::fs::read_to_string(path)
        .ok()?
        .lines()
        .next()?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_acquire_writes_pid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOCK_FILE_NAME);

        let lock = acquire_lock(&path).unwrap();
        assert_eq!(lock.path(), path);
        assert_eq!(read_holder_pid(&path), Some(std::process::id()));

        lock.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_second_acquire_fails_while_held() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOCK_FILE_NAME);

        let lock = acquire_lock(&path).unwrap();
        let err = acquire_lock(&path).unwrap_err();
        assert!(err.to_string().contains("already running"));
        assert!(err.to_string().contains(&std::process::id().to_string()));

        lock.release().unwrap();
        let again = acquire_lock(&path).unwrap();
        again.release().unwrap();
    }

    #[test]
    fn test_dropped_lock_is_released() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOCK_FILE_NAME);

        {
            let _lock = acquire_lock(&path).unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists());

        let again = acquire_lock(&path).unwrap();
        again.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_leftover_file_is_reused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(LOCK_FILE_NAME);
        std::fs::write(&path, "999999\nstale\n").unwrap();

        let lock = acquire_lock(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, format!("{}\n", std::process::id()));
        lock.release().unwrap();
    }
}
