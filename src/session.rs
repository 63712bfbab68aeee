/// Session marker for the CLI shell
///
/// Holds the active worker's normalized email in a single file under the app
/// directory. This is the desktop stand-in for the platform's secure
/// key-value store: the storage core never reads it, only the command
/// handlers do, to decide who (if anyone) is logged in.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed single-value session store
pub struct SessionStore {
    marker_path: PathBuf,
}

impl SessionStore {
    /// Create a session store rooted in the given app directory
    pub fn new<P: AsRef<Path>>(app_dir: P) -> Self {
        Self {
            marker_path: app_dir.as_ref().join("session"),
        }
    }

    /// Persist the active worker's email
    pub fn save(&self, email: &str) -> Result<()> {
        if let Some(parent) = self.marker_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.marker_path, email)?;

        // Keep the marker private to the current user (Unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.marker_path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.marker_path, perms)?;
        }

        Ok(())
    }

    /// Read the active worker's email, if any
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.marker_path) {
            Ok(contents) => {
                let email = contents.trim().to_string();
                if email.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(email))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Forget the active session
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.marker_path) {
            Ok(()) => Ok(()),
            // Clearing an absent session is fine
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
