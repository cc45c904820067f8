//! Best-effort reaping of stale working files.
//!
//! Runs after each successful analysis, detached from the response. Every
//! failure here is logged and swallowed; housekeeping must never surface an
//! error to a caller.

use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

/// Working files older than this are deleted.
pub const STALE_AFTER: Duration = Duration::from_secs(60 * 60);

/// Deletes files in `dir` whose modification time is older than `max_age`.
pub fn cleanup_stale_uploads(dir: &Path, max_age: Duration) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Could not scan upload directory {}: {e}", dir.display());
            return;
        }
    };

    for entry in entries {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let age = entry
            .metadata()
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| modified.elapsed().ok());

        match age {
            Some(age) if age > max_age => match std::fs::remove_file(&path) {
                Ok(()) => info!("Deleted stale upload: {}", path.display()),
                Err(e) => warn!("Could not delete {}: {e}", path.display()),
            },
            _ => {}
        }
    }
}
