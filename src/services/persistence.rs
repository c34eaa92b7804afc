//! Persistence service: periodic flush of dirty documents.
//!
//! DESIGN
//! ======
//! A background task wakes every `flush_interval_ms`, snapshots dirty
//! documents under the lock, releases it, then upserts each one to Postgres.
//! An entry is only marked clean if no save landed while its write was in
//! flight; otherwise it stays dirty and goes out on the next tick. Failed
//! writes are logged and retried the same way.

use std::collections::HashMap;
use std::time::Duration;

use canvas::doc::SlideDocument;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::services::documents::upsert_document;
use crate::state::{AppState, DocumentState};

/// Spawn the background persistence task. Returns a handle for shutdown.
pub fn spawn_persistence_task(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(state.config.flush_interval_ms.max(1)));
        loop {
            interval.tick().await;
            flush_all_dirty(&state).await;
        }
    })
}

/// Write every dirty document. Returns how many were flushed.
pub async fn flush_all_dirty(state: &AppState) -> usize {
    let pending = {
        let docs = state.documents.read().await;
        collect_dirty(&docs)
    };
    if pending.is_empty() {
        return 0;
    }

    let mut flushed = 0;
    for (id, document, revision) in pending {
        match upsert_document(&state.pool, &document).await {
            Ok(()) => {
                let mut docs = state.documents.write().await;
                if clear_flushed(&mut docs, &id, revision) {
                    flushed += 1;
                }
            }
            Err(e) => error!(error = %e, presentation_id = %id, "persistence flush failed"),
        }
    }
    debug!(flushed, "persistence flush complete");
    flushed
}

fn collect_dirty(docs: &HashMap<String, DocumentState>) -> Vec<(String, SlideDocument, u64)> {
    docs.iter()
        .filter(|(_, entry)| entry.dirty)
        .map(|(id, entry)| (id.clone(), entry.document.clone(), entry.revision))
        .collect()
}

/// Mark `id` clean if it is still at `revision`. Returns whether it was cleared.
fn clear_flushed(docs: &mut HashMap<String, DocumentState>, id: &str, revision: u64) -> bool {
    match docs.get_mut(id) {
        Some(entry) if entry.revision == revision => {
            entry.dirty = false;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
