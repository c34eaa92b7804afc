//! Document service: load and save slide documents.
//!
//! DESIGN
//! ======
//! Reads are served from the in-memory cache, hydrating from Postgres on the
//! first request for a presentation. Saves only touch the cache and mark the
//! entry dirty; the persistence task writes it out. Every saved document is
//! sanitized with the same clamping the editor applies on load, so stored
//! geometry always satisfies the surface bounds.

use canvas::doc::SlideDocument;
use sqlx::PgPool;
use sqlx::types::Json;
use tracing::info;

use crate::state::{AppState, DocumentState};

const MAX_ID_LEN: usize = 128;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("invalid presentation id: {0:?}")]
    InvalidId(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Presentation ids are 1..=128 characters of `[A-Za-z0-9_-]`.
///
/// # Errors
///
/// Returns [`DocumentError::InvalidId`] for anything else.
pub fn validate_id(id: &str) -> Result<(), DocumentError> {
    let valid = !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid { Ok(()) } else { Err(DocumentError::InvalidId(id.to_owned())) }
}

/// Stamp the path id onto `doc` and clamp its geometry.
#[must_use]
pub fn prepare_for_save(id: &str, mut doc: SlideDocument) -> SlideDocument {
    doc.presentation_id = id.to_owned();
    let repaired = doc.sanitize();
    if repaired > 0 {
        info!(presentation_id = %id, count = repaired, "clamped elements on save");
    }
    doc
}

/// Fetch a presentation, from cache or database. A presentation that was
/// never saved is an empty document.
///
/// # Errors
///
/// Returns [`DocumentError::InvalidId`] for a malformed id and
/// [`DocumentError::Database`] if hydration fails.
pub async fn load(state: &AppState, id: &str) -> Result<SlideDocument, DocumentError> {
    validate_id(id)?;
    if let Some(entry) = state.documents.read().await.get(id) {
        return Ok(entry.document.clone());
    }

    let fetched = fetch_document(&state.pool, id).await?;
    let document = fetched.unwrap_or_else(|| SlideDocument::new(id));

    // EDGE: a save may have landed while the fetch was in flight; it wins.
    let mut docs = state.documents.write().await;
    let entry = docs.entry(id.to_owned()).or_insert_with(|| DocumentState::clean(document));
    Ok(entry.document.clone())
}

/// Replace a presentation in the cache and mark it for flushing.
///
/// # Errors
///
/// Returns [`DocumentError::InvalidId`] for a malformed id.
pub async fn save(state: &AppState, id: &str, doc: SlideDocument) -> Result<SlideDocument, DocumentError> {
    validate_id(id)?;
    let doc = prepare_for_save(id, doc);
    let mut docs = state.documents.write().await;
    let entry = docs.entry(id.to_owned()).or_insert_with(|| DocumentState::clean(SlideDocument::new(id)));
    entry.document = doc.clone();
    entry.dirty = true;
    entry.revision += 1;
    Ok(doc)
}

/// Read a stored document. Stored geometry is sanitized on the way out.
///
/// # Errors
///
/// Returns a database error if the query or JSON decoding fails.
pub async fn fetch_document(pool: &PgPool, id: &str) -> Result<Option<SlideDocument>, DocumentError> {
    let row: Option<(Json<SlideDocument>,)> =
        sqlx::query_as("SELECT document FROM slide_documents WHERE presentation_id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(Json(mut doc),)| {
        doc.presentation_id = id.to_owned();
        doc.sanitize();
        doc
    }))
}

/// Insert or replace a stored document.
///
/// # Errors
///
/// Returns the underlying database error.
pub async fn upsert_document(pool: &PgPool, doc: &SlideDocument) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO slide_documents (presentation_id, document, updated_at) \
         VALUES ($1, $2, now()) \
         ON CONFLICT (presentation_id) DO UPDATE SET \
             document = EXCLUDED.document, updated_at = now()",
    )
    .bind(&doc.presentation_id)
    .bind(Json(doc))
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
#[path = "documents_test.rs"]
mod tests;
