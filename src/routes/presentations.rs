//! Presentation document routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use canvas::doc::SlideDocument;
use tracing::error;

use crate::services::documents::{self, DocumentError};
use crate::state::AppState;

/// `GET /api/presentations/:id`: load a presentation.
pub async fn get_presentation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SlideDocument>, StatusCode> {
    let doc = documents::load(&state, &id).await.map_err(document_error_to_status)?;
    Ok(Json(doc))
}

/// `PUT /api/presentations/:id`: replace a presentation. Returns what was stored.
pub async fn put_presentation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SlideDocument>,
) -> Result<Json<SlideDocument>, StatusCode> {
    let doc = documents::save(&state, &id, body).await.map_err(document_error_to_status)?;
    Ok(Json(doc))
}

pub(crate) fn document_error_to_status(err: DocumentError) -> StatusCode {
    match err {
        DocumentError::InvalidId(_) => StatusCode::BAD_REQUEST,
        DocumentError::Database(e) => {
            error!(error = %e, "document store failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "presentations_test.rs"]
mod tests;
