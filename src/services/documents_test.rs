use canvas::consts::{MIN_ELEMENT_SIZE, SURFACE};
use canvas::doc::Slide;

use super::*;
use crate::state::test_helpers;

// =============================================================================
// validate_id
// =============================================================================

#[test]
fn validate_id_accepts_slug_characters() {
    assert!(validate_id("harvest-2024_Q3").is_ok());
    assert!(validate_id("a").is_ok());
    assert!(validate_id(&"x".repeat(128)).is_ok());
}

#[test]
fn validate_id_rejects_bad_input() {
    for bad in ["", "has space", "../etc", "semi;colon", "ünicode", "dot.ted"] {
        assert!(matches!(validate_id(bad), Err(DocumentError::InvalidId(_))), "{bad:?}");
    }
    assert!(validate_id(&"x".repeat(129)).is_err());
}

// =============================================================================
// prepare_for_save
// =============================================================================

#[test]
fn prepare_overrides_body_id() {
    let doc = prepare_for_save("from-path", test_helpers::sample_document("from-body"));
    assert_eq!(doc.presentation_id, "from-path");
}

#[test]
fn prepare_clamps_and_sorts() {
    let mut doc = SlideDocument::new("deck");
    let mut late = Slide::new(3);
    let mut el = test_helpers::sample_document("x").slides[0].elements[0].clone();
    el.x = 5000.0;
    el.width = 1.0;
    late.elements.push(el);
    doc.slides.push(late);
    doc.slides.push(Slide::new(1));

    let doc = prepare_for_save("deck", doc);
    assert_eq!(doc.slides[0].order, 1);
    let el = &doc.slides[1].elements[0];
    assert!((el.width - MIN_ELEMENT_SIZE).abs() < f64::EPSILON);
    assert!((el.x - (SURFACE.width - MIN_ELEMENT_SIZE)).abs() < f64::EPSILON);
}

// =============================================================================
// load / save against the cache
// =============================================================================

#[tokio::test]
async fn save_marks_dirty_and_bumps_revision() {
    let state = test_helpers::test_app_state();
    save(&state, "deck", test_helpers::sample_document("deck")).await.unwrap();
    save(&state, "deck", test_helpers::sample_document("deck")).await.unwrap();
    let docs = state.documents.read().await;
    let entry = docs.get("deck").unwrap();
    assert!(entry.dirty);
    assert_eq!(entry.revision, 2);
}

#[tokio::test]
async fn load_after_save_returns_saved_document() {
    let state = test_helpers::test_app_state();
    let saved = save(&state, "deck", test_helpers::sample_document("other")).await.unwrap();
    let loaded = load(&state, "deck").await.unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.presentation_id, "deck");
}

#[tokio::test]
async fn load_serves_seeded_cache_without_database() {
    let state = test_helpers::test_app_state();
    let doc = test_helpers::sample_document("seeded");
    test_helpers::seed_document(&state, doc.clone()).await;
    assert_eq!(load(&state, "seeded").await.unwrap(), doc);
}

#[tokio::test]
async fn load_rejects_invalid_id_before_touching_database() {
    let state = test_helpers::test_app_state();
    assert!(matches!(load(&state, "no/slashes").await, Err(DocumentError::InvalidId(_))));
}

#[tokio::test]
async fn load_uncached_surfaces_database_error() {
    let state = test_helpers::test_app_state();
    assert!(matches!(load(&state, "never-cached").await, Err(DocumentError::Database(_))));
    assert!(state.documents.read().await.is_empty());
}

#[tokio::test]
async fn save_rejects_invalid_id() {
    let state = test_helpers::test_app_state();
    let result = save(&state, "", SlideDocument::new("")).await;
    assert!(matches!(result, Err(DocumentError::InvalidId(_))));
    assert!(state.documents.read().await.is_empty());
}
