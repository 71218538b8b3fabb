//! Session details gathered once at startup: who is logged in, and the password
//! marker file.
//!
//! Nothing here is allowed to stop the lock screen from starting. Every failure degrades
//! to a fallback and a warning.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::common::constants::{
    DATA_DIR_NAME, FALLBACK_USERNAME, MARKER_FILE_NAME, MARKER_PLACEHOLDER,
};
use crate::common::utils::private_path;

/// Name shown for the user running the process.
///
/// The real name from the GECOS field wins over the login name; `"Guest"` is used when
/// the user cannot be resolved at all.
pub fn current_username() -> String {
    match nix::unistd::User::from_uid(nix::unistd::getuid()) {
        Ok(Some(user)) if !user.name.is_empty() => {
            display_name(&user.name, &user.gecos.to_string_lossy())
        }
        Ok(_) => {
            log_warning!("No user entry for the current uid, using {FALLBACK_USERNAME}");
            FALLBACK_USERNAME.to_string()
        }
        Err(e) => {
            log_warning!("Failed to look up the current user: {e}");
            FALLBACK_USERNAME.to_string()
        }
    }
}

/// First GECOS field (the full name) if it is set, otherwise `login`.
fn display_name(login: &str, gecos: &str) -> String {
    match gecos.split(',').next().map(str::trim) {
        Some(real_name) if !real_name.is_empty() => real_name.to_string(),
        _ => login.to_string(),
    }
}

/// Outcome of checking the password marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStatus {
    /// `None` when no data directory could be determined.
    pub path: Option<PathBuf>,
    pub exists: bool,
}

/// Marker location: `<base>/VivaceLockScreen/password.txt`.
///
/// `base` overrides the platform data directory.
pub fn marker_path(base: Option<&Path>) -> Option<PathBuf> {
    let base = match base {
        Some(dir) => dir.to_path_buf(),
        None => dirs::data_dir()?,
    };
    Some(base.join(DATA_DIR_NAME).join(MARKER_FILE_NAME))
}

/// Make sure the marker file exists, creating it with placeholder content if missing.
///
/// The content is never read back.
pub fn ensure_marker(path: &Path) -> Result<bool> {
    if path.is_file() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", private_path(parent)))?;
    }
    std::fs::write(path, MARKER_PLACEHOLDER)
        .with_context(|| format!("Failed to write {}", private_path(path)))?;
    Ok(true)
}

/// Locate and, if needed, create the marker. Failures are logged, never returned.
pub fn check_marker(base: Option<&Path>) -> MarkerStatus {
    let Some(path) = marker_path(base) else {
        log_warning!("No data directory available, password marker disabled");
        return MarkerStatus {
            path: None,
            exists: false,
        };
    };

    let exists = match ensure_marker(&path) {
        Ok(true) => {
            log_decorated!("Created password marker at {}", private_path(&path));
            true
        }
        Ok(false) => {
            log_decorated!("Password marker found at {}", private_path(&path));
            true
        }
        Err(e) => {
            log_error!("{e:#}");
            false
        }
    };

    MarkerStatus {
        path: Some(path),
        exists,
    }
}

/// Username plus marker state, as shown and used by the lock screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub marker: MarkerStatus,
}

impl Session {
    pub fn detect(data_dir: Option<&Path>) -> Self {
        Self {
            username: current_username(),
            marker: check_marker(data_dir),
        }
    }
}
