//! Media service: store uploaded images and videos on disk.
//!
//! Files are written under `media_dir` as `{uuid}.{ext}` and served back by
//! the static file layer at `/media/{file}`. The returned URL goes verbatim
//! into an element's `source_ref`.

use canvas::doc::{MediaAsset, MediaKind};
use tracing::info;
use uuid::Uuid;

use crate::config::ServerConfig;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("unsupported media type: {0}")]
    UnsupportedType(String),
    #[error("empty upload")]
    Empty,
    #[error("upload of {size} bytes exceeds limit of {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Map a `Content-Type` header to a media kind and file extension.
///
/// # Errors
///
/// Returns [`MediaError::UnsupportedType`] for anything that is not an image
/// or video.
pub fn classify(content_type: &str) -> Result<(MediaKind, &'static str), MediaError> {
    let mime = content_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    let kind = MediaKind::from_mime(&mime).ok_or_else(|| MediaError::UnsupportedType(content_type.to_owned()))?;
    let ext = match mime.as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/ogg" => "ogv",
        "video/quicktime" => "mov",
        _ => "bin",
    };
    Ok((kind, ext))
}

/// Validate and persist one upload.
///
/// # Errors
///
/// Fails on an unsupported type, an empty or oversized body, or a write error.
pub async fn store(config: &ServerConfig, content_type: &str, bytes: &[u8]) -> Result<MediaAsset, MediaError> {
    let (kind, ext) = classify(content_type)?;
    if bytes.is_empty() {
        return Err(MediaError::Empty);
    }
    if bytes.len() > config.media_max_bytes {
        return Err(MediaError::TooLarge { size: bytes.len(), limit: config.media_max_bytes });
    }

    tokio::fs::create_dir_all(&config.media_dir).await?;
    let id = Uuid::new_v4();
    let file_name = format!("{id}.{ext}");
    tokio::fs::write(config.media_dir.join(&file_name), bytes).await?;

    let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
    info!(%id, ?kind, size, "stored media");
    Ok(MediaAsset { id, url: format!("{}/media/{file_name}", config.media_base_url), kind, size })
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
