//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the router is built.

use std::path::Path;

use tracing::warn;

/// Warn when the static assets directory is missing; the API still works without it.
///
/// The data directory is not touched here: the store creates it lazily on first access.
pub async fn ensure_env(static_dir: &Path) -> anyhow::Result<()> {
    match tokio::fs::metadata(static_dir).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            warn!(static_dir = %static_dir.display(), "static path is not a directory; static assets will 404");
        }
        Err(_) => {
            warn!(static_dir = %static_dir.display(), "static assets directory not found; static assets will 404");
        }
    }
    Ok(())
}
