use axum::http::HeaderValue;
use canvas::doc::MediaKind;

use super::*;
use crate::state::test_helpers;

fn headers(content_type: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(content_type).unwrap());
    headers
}

#[test]
fn media_error_to_status_maps_every_variant() {
    assert_eq!(media_error_to_status(MediaError::UnsupportedType("text/plain".into())), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(media_error_to_status(MediaError::Empty), StatusCode::BAD_REQUEST);
    assert_eq!(
        media_error_to_status(MediaError::TooLarge { size: 2, limit: 1 }),
        StatusCode::PAYLOAD_TOO_LARGE
    );
    let io = std::io::Error::other("disk full");
    assert_eq!(media_error_to_status(MediaError::Io(io)), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn upload_returns_created_asset() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state_with_media(dir.path());
    let (status, Json(asset)) =
        upload_media(State(state), headers("video/mp4"), Bytes::from_static(b"mp4 bytes")).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(asset.kind, MediaKind::Video);
    assert!(asset.url.ends_with(".mp4"));
}

#[tokio::test]
async fn upload_without_content_type_is_unsupported() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state_with_media(dir.path());
    let status = upload_media(State(state), HeaderMap::new(), Bytes::from_static(b"data")).await.unwrap_err();
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn upload_empty_body_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state_with_media(dir.path());
    let status = upload_media(State(state), headers("image/png"), Bytes::new()).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
