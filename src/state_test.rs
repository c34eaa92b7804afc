use super::*;

#[test]
fn clean_entry_is_not_dirty() {
    let entry = DocumentState::clean(SlideDocument::new("deck"));
    assert!(!entry.dirty);
    assert_eq!(entry.revision, 0);
    assert_eq!(entry.document.presentation_id, "deck");
}

#[tokio::test]
async fn app_state_starts_with_empty_cache() {
    let state = test_helpers::test_app_state();
    assert!(state.documents.read().await.is_empty());
    assert_eq!(state.config.media_base_url, "");
}

#[tokio::test]
async fn seeded_document_is_shared_between_clones() {
    let state = test_helpers::test_app_state();
    let clone = state.clone();
    test_helpers::seed_document(&state, test_helpers::sample_document("deck")).await;
    let docs = clone.documents.read().await;
    assert_eq!(docs.get("deck").map(|d| d.document.slides.len()), Some(1));
}
