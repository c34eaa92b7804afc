use super::*;
use crate::surface::Rect;

fn video() -> Element {
    Element::new(MediaKind::Video, "v.mp4", Rect::new(0.0, 0.0, 100.0, 100.0))
}

fn image() -> Element {
    Element::new(MediaKind::Image, "a.png", Rect::new(0.0, 0.0, 100.0, 100.0))
}

#[test]
fn mounts_only_videos() {
    let (v, i) = (video(), image());
    let mut reg: PlaybackRegistry<String> = PlaybackRegistry::new();
    let stale = reg.sync([&v, &i], |el| el.source_ref.clone());
    assert!(stale.is_empty());
    assert_eq!(reg.len(), 1);
    assert_eq!(reg.get(&v.id).map(String::as_str), Some("v.mp4"));
    assert!(reg.get(&i.id).is_none());
}

#[test]
fn existing_handles_are_not_remounted() {
    let v = video();
    let mut reg = PlaybackRegistry::new();
    let mut mounts = 0;
    reg.sync([&v], |_| {
        mounts += 1;
        mounts
    });
    reg.sync([&v], |_| {
        mounts += 1;
        mounts
    });
    assert_eq!(mounts, 1);
    assert_eq!(reg.get(&v.id), Some(&1));
}

#[test]
fn vanished_videos_are_handed_back() {
    let (a, b) = (video(), video());
    let mut reg = PlaybackRegistry::new();
    reg.sync([&a, &b], |el| el.id);
    let stale = reg.sync([&b], |el| el.id);
    assert_eq!(stale, vec![a.id]);
    assert_eq!(reg.len(), 1);
    assert!(reg.get(&a.id).is_none());
}

#[test]
fn handles_are_mutable_in_place() {
    let v = video();
    let mut reg = PlaybackRegistry::new();
    reg.sync([&v], |_| 0u32);
    if let Some(h) = reg.get_mut(&v.id) {
        *h = 7;
    }
    assert_eq!(reg.get(&v.id), Some(&7));
}

#[test]
fn clear_releases_everything() {
    let (a, b) = (video(), video());
    let mut reg = PlaybackRegistry::new();
    reg.sync([&a, &b], |el| el.id);
    let mut released = reg.clear();
    released.sort();
    let mut expected = vec![a.id, b.id];
    expected.sort();
    assert_eq!(released, expected);
    assert!(reg.is_empty());
}

#[test]
fn empty_sync_releases_all() {
    let v = video();
    let mut reg = PlaybackRegistry::default();
    reg.sync([&v], |el| el.id);
    let stale = reg.sync(std::iter::empty::<&Element>(), |el| el.id);
    assert_eq!(stale.len(), 1);
    assert!(reg.is_empty());
}
