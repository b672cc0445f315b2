//! Photo retention
//!
//! Gate photos are only needed while the visitor is on site. Anything older
//! than the retention window is deleted and cleared from its pass.

use crate::db::repository::{RepoResult, pass};
use shared::util::now_millis;
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;

/// Remove photos taken more than `retention` ago, returns how many were cleared
pub async fn cleanup_stale_photos(pool: &SqlitePool, retention: Duration) -> RepoResult<usize> {
    let cutoff = now_millis() - retention.as_millis() as i64;
    let stale = pass::find_photos_before(pool, cutoff).await?;

    let mut cleaned = 0;
    for p in stale {
        if let Some(photo) = p.photo_path.as_deref() {
            match tokio::fs::remove_file(Path::new(photo)).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(pass_id = p.id, error = %e, "Failed to delete pass photo");
                    continue;
                }
            }
        }
        pass::clear_photo(pool, p.id).await?;
        cleaned += 1;
    }

    if cleaned > 0 {
        tracing::info!(count = cleaned, "Stale pass photos cleaned up");
    }
    Ok(cleaned)
}
