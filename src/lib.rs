/// field-intake library
///
/// Core functionality for the offline obstetric survey collection app:
/// account storage, survey record storage, and database export.

pub mod db;
pub mod error;
pub mod export;
pub mod session;

// Re-exports for convenience
pub use db::Database;
pub use error::{IntakeError, Result};
pub use export::{ExportOutcome, Exporter, ShareSurface, EXPORT_MIME};
pub use session::SessionStore;
