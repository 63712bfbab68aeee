// Export pipeline: snapshot the live database file and offer it for sharing
//
// The snapshot is a byte-for-byte copy placed next to the live file, named
// with a millisecond timestamp so repeated exports never clash.

use crate::error::{IntakeError, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// MIME type handed to the share surface along with the snapshot
pub const EXPORT_MIME: &str = "application/octet-stream";

/// Optional platform share sheet
///
/// The core only needs two things from the platform: is sharing possible at
/// all, and hand this file off. A shell that has no share sheet passes `None`
/// to [`Exporter::export_snapshot`] and the export still succeeds.
pub trait ShareSurface {
    fn is_available(&self) -> bool;
    fn share(&self, path: &Path, mime: &str) -> Result<()>;
}

/// What an export produced
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Path of the snapshot file
    pub path: PathBuf,
    /// Whether a share surface actually took the file
    pub shared: bool,
}

pub struct Exporter {
    db_path: PathBuf,
}

impl Exporter {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Copy the live database file to a fresh snapshot
    ///
    /// Fails with `DatabaseFileMissing` if nothing has been written to disk
    /// yet. Copy failures propagate; there is no safe way to continue an
    /// export whose snapshot didn't land. Returns the snapshot path and
    /// whether a share surface took it.
    pub async fn export_snapshot(
        &self,
        share: Option<&dyn ShareSurface>,
    ) -> Result<ExportOutcome> {
        if !tokio::fs::try_exists(&self.db_path).await? {
            return Err(IntakeError::DatabaseFileMissing(self.db_path.clone()));
        }

        let snapshot = self.allocate_snapshot_path().await?;
        tokio::fs::copy(&self.db_path, &snapshot).await?;

        // No share surface, or one that isn't usable right now, still counts
        // as a successful export. The caller decides what to tell the user.
        let mut shared = false;
        if let Some(surface) = share {
            if surface.is_available() {
                surface.share(&snapshot, EXPORT_MIME)?;
                shared = true;
            }
        }

        Ok(ExportOutcome {
            path: snapshot,
            shared,
        })
    }

    // Millisecond timestamp in the name, plus a retry suffix in case two
    // exports land inside the same millisecond.
    async fn allocate_snapshot_path(&self) -> Result<PathBuf> {
        let dir = self.db_path.parent().unwrap_or_else(|| Path::new("."));
        let stem = self
            .db_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("intake");
        let timestamp = Utc::now().format("%Y%m%d-%H%M%S%3f");

        let mut candidate = dir.join(format!("{}-backup-{}.db", stem, timestamp));
        let mut attempt = 1u32;
        while tokio::fs::try_exists(&candidate).await? {
            candidate = dir.join(format!("{}-backup-{}-{}.db", stem, timestamp, attempt));
            attempt += 1;
        }

        Ok(candidate)
    }
}
