use super::*;
use crate::state::test_helpers;

#[test]
fn classify_known_types() {
    assert_eq!(classify("image/png").unwrap(), (MediaKind::Image, "png"));
    assert_eq!(classify("image/jpeg").unwrap(), (MediaKind::Image, "jpg"));
    assert_eq!(classify("video/mp4").unwrap(), (MediaKind::Video, "mp4"));
    assert_eq!(classify("video/quicktime").unwrap(), (MediaKind::Video, "mov"));
}

#[test]
fn classify_strips_parameters_and_case() {
    assert_eq!(classify("Image/PNG; charset=binary").unwrap(), (MediaKind::Image, "png"));
}

#[test]
fn classify_unknown_subtype_falls_back_to_bin() {
    assert_eq!(classify("image/x-exotic").unwrap(), (MediaKind::Image, "bin"));
}

#[test]
fn classify_rejects_non_media() {
    for ct in ["application/pdf", "text/plain", ""] {
        assert!(matches!(classify(ct), Err(MediaError::UnsupportedType(_))), "{ct:?}");
    }
}

#[tokio::test]
async fn store_writes_file_and_returns_url() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state_with_media(dir.path());
    let asset = store(&state.config, "image/png", b"\x89PNG fake").await.unwrap();

    assert_eq!(asset.kind, MediaKind::Image);
    assert_eq!(asset.size, 9);
    assert_eq!(asset.url, format!("/media/{}.png", asset.id));
    let on_disk = std::fs::read(dir.path().join(format!("{}.png", asset.id))).unwrap();
    assert_eq!(on_disk, b"\x89PNG fake");
}

#[tokio::test]
async fn store_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("uploads/deep");
    let state = test_helpers::test_app_state_with_media(&nested);
    let asset = store(&state.config, "video/webm", b"webm").await.unwrap();
    assert!(nested.join(format!("{}.webm", asset.id)).exists());
}

#[tokio::test]
async fn store_rejects_empty_body() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state_with_media(dir.path());
    assert!(matches!(store(&state.config, "image/png", b"").await, Err(MediaError::Empty)));
}

#[tokio::test]
async fn store_rejects_oversized_body() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state_with_media(dir.path());
    let big = vec![0_u8; 1025];
    let err = store(&state.config, "image/png", &big).await.unwrap_err();
    assert!(matches!(err, MediaError::TooLarge { size: 1025, limit: 1024 }));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn store_checks_type_before_size() {
    let dir = tempfile::tempdir().unwrap();
    let state = test_helpers::test_app_state_with_media(dir.path());
    let err = store(&state.config, "text/html", b"").await.unwrap_err();
    assert!(matches!(err, MediaError::UnsupportedType(_)));
}
