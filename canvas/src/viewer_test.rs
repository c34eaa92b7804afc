#![allow(clippy::float_cmp)]

use super::*;
use crate::doc::MediaKind;

fn el(x: f64, y: f64, w: f64, h: f64) -> Element {
    Element::new(MediaKind::Image, "a.png", Rect::new(x, y, w, h))
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// Letterbox
// =============================================================

#[test]
fn same_aspect_fills_without_offsets() {
    let lb = Letterbox::fit(Size::new(1920.0, 1080.0)).unwrap();
    assert!(approx(lb.scale, 1.6));
    assert!(approx(lb.offset_x, 0.0));
    assert!(approx(lb.offset_y, 0.0));
}

#[test]
fn same_aspect_projects_element() {
    let lb = Letterbox::fit(Size::new(1920.0, 1080.0)).unwrap();
    let p = lb.project(&el(100.0, 100.0, 200.0, 150.0));
    assert!(approx(p.rect.x, 160.0));
    assert!(approx(p.rect.y, 160.0));
    assert!(approx(p.rect.width, 320.0));
    assert!(approx(p.rect.height, 240.0));
}

#[test]
fn square_viewport_letterboxes_vertically() {
    let lb = Letterbox::fit(Size::new(1000.0, 1000.0)).unwrap();
    assert!(approx(lb.scale, 1000.0 / 1200.0));
    assert!(approx(lb.offset_x, 0.0));
    assert!(approx(lb.offset_y, (1000.0 - 675.0 * (1000.0 / 1200.0)) / 2.0));
    assert!(lb.offset_y > 0.0);
}

#[test]
fn tall_content_pillarboxes_horizontally() {
    let lb = Letterbox::fit(Size::new(3000.0, 675.0)).unwrap();
    assert!(approx(lb.scale, 1.0));
    assert!(approx(lb.offset_x, 900.0));
    assert!(approx(lb.offset_y, 0.0));
}

#[test]
fn content_rect_is_centred() {
    let lb = Letterbox::fit(Size::new(1000.0, 1000.0)).unwrap();
    let r = lb.content_rect();
    assert!(approx(r.x + r.width / 2.0, 500.0));
    assert!(approx(r.y + r.height / 2.0, 500.0));
    assert!(approx(r.width, 1000.0));
}

#[test]
fn degenerate_viewport_has_no_letterbox() {
    assert!(Letterbox::fit(Size::new(0.0, 0.0)).is_none());
    assert!(Letterbox::fit(Size::new(800.0, -1.0)).is_none());
    assert!(Letterbox::fit(Size::new(f64::INFINITY, 600.0)).is_none());
}

#[test]
fn letterbox_round_trips_points() {
    let lb = Letterbox::fit(Size::new(1366.0, 1024.0)).unwrap();
    let p = Point::new(417.25, 333.5);
    let back = lb.to_canonical(lb.to_physical(p));
    assert!(approx(back.x, p.x));
    assert!(approx(back.y, p.y));
}

#[test]
fn uniform_scale_preserves_aspect_ratio() {
    let lb = Letterbox::fit(Size::new(777.0, 1234.0)).unwrap();
    let p = lb.project(&el(10.0, 10.0, 300.0, 100.0));
    assert!(approx(p.rect.width / p.rect.height, 3.0));
}

#[test]
fn projection_scales_corner_radius_keeps_rotation() {
    let lb = Letterbox::fit(Size::new(1920.0, 1080.0)).unwrap();
    let mut e = el(0.0, 0.0, 100.0, 100.0);
    e.corner_radius = 10.0;
    e.rotation = 33.0;
    let p = lb.project(&e);
    assert!(approx(p.corner_radius_x, 16.0));
    assert_eq!(p.corner_radius_x, p.corner_radius_y);
    assert_eq!(p.rotation, 33.0);
}

#[test]
fn free_project_handles_degenerate() {
    let e = el(0.0, 0.0, 100.0, 100.0);
    assert!(project(&e, Size::new(0.0, 10.0)).is_none());
    assert!(project(&e, Size::new(1200.0, 675.0)).is_some());
}

// =============================================================
// ViewerCore
// =============================================================

#[test]
fn load_then_viewport_projects_in_z_order() {
    let mut a = el(0.0, 0.0, 100.0, 100.0);
    let mut b = el(0.0, 0.0, 100.0, 100.0);
    a.z_index = 5;
    b.z_index = 2;
    let mut viewer = ViewerCore::new();
    viewer.load_slide(vec![a.clone(), b.clone()]);
    assert!(viewer.layout().is_empty());
    assert!(viewer.set_viewport(Size::new(1200.0, 675.0)));
    let ids: Vec<_> = viewer.layout().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);
}

#[test]
fn equal_z_keeps_list_order() {
    let a = el(0.0, 0.0, 100.0, 100.0);
    let b = el(0.0, 0.0, 100.0, 100.0);
    let mut viewer = ViewerCore::new();
    viewer.set_viewport(Size::new(1200.0, 675.0));
    viewer.load_slide(vec![a.clone(), b.clone()]);
    let ids: Vec<_> = viewer.layout().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[test]
fn load_clamps_corrupt_geometry() {
    let mut viewer = ViewerCore::new();
    viewer.set_viewport(Size::new(1200.0, 675.0));
    viewer.load_slide(vec![el(5000.0, -10.0, 0.0, 100.0)]);
    let e = &viewer.elements()[0];
    assert_eq!((e.x, e.y, e.width), (1150.0, 0.0, 50.0));
}

#[test]
fn resize_reprojects() {
    let mut viewer = ViewerCore::new();
    viewer.load_slide(vec![el(100.0, 100.0, 200.0, 150.0)]);
    viewer.set_viewport(Size::new(1200.0, 675.0));
    assert!(approx(viewer.layout()[0].rect.x, 100.0));
    viewer.set_viewport(Size::new(1920.0, 1080.0));
    assert!(approx(viewer.layout()[0].rect.x, 160.0));
}

#[test]
fn degenerate_viewport_keeps_last_layout() {
    let mut viewer = ViewerCore::new();
    viewer.load_slide(vec![el(100.0, 100.0, 200.0, 150.0)]);
    viewer.set_viewport(Size::new(1920.0, 1080.0));
    let before = viewer.layout().to_vec();
    assert!(!viewer.set_viewport(Size::new(0.0, 0.0)));
    assert_eq!(viewer.layout(), before.as_slice());
    assert!(viewer.layout().iter().all(|p| p.rect.x.is_finite()));
    assert_eq!(viewer.viewport(), Size::new(0.0, 0.0));
    assert!(approx(viewer.letterbox().unwrap().scale, 1.6));
}

#[test]
fn fullscreen_change_reprojects() {
    let mut viewer = ViewerCore::new();
    viewer.load_slide(vec![el(0.0, 0.0, 100.0, 100.0)]);
    assert!(viewer.on_fullscreen_change(Size::new(2400.0, 1350.0)));
    assert!(approx(viewer.layout()[0].rect.width, 200.0));
}

#[test]
fn loading_new_slide_replaces_layout() {
    let mut viewer = ViewerCore::new();
    viewer.set_viewport(Size::new(1200.0, 675.0));
    viewer.load_slide(vec![el(0.0, 0.0, 100.0, 100.0), el(0.0, 0.0, 100.0, 100.0)]);
    viewer.load_slide(vec![el(0.0, 0.0, 100.0, 100.0)]);
    assert_eq!(viewer.layout().len(), 1);
}
