//! Media upload route.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use canvas::doc::MediaAsset;
use tracing::error;

use crate::services::media::{self, MediaError};
use crate::state::AppState;

/// `POST /api/media`: store the raw request body as a media file.
pub async fn upload_media(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<MediaAsset>), StatusCode> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()).unwrap_or("");
    let asset = media::store(&state.config, content_type, &body).await.map_err(media_error_to_status)?;
    Ok((StatusCode::CREATED, Json(asset)))
}

pub(crate) fn media_error_to_status(err: MediaError) -> StatusCode {
    match err {
        MediaError::UnsupportedType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        MediaError::Empty => StatusCode::BAD_REQUEST,
        MediaError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        MediaError::Io(e) => {
            error!(error = %e, "media write failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
