//! Document model: slide elements, their properties, and the in-memory store.
//!
//! This module defines the persisted slide shape (`SlideDocument`, `Slide`,
//! `Element`), a sparse-update type for incremental edits (`PartialElement`),
//! and the runtime store that owns the elements of the slide being edited
//! (`DocStore`).
//!
//! Every write path keeps the bounds invariant: an element always lies
//! fully inside [`SURFACE`] and is at least [`MIN_ELEMENT_SIZE`] on each side.
//! Corrupt persisted geometry is clamped on load, never rejected.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DUPLICATE_OFFSET, MIN_ELEMENT_SIZE, MIN_Z_INDEX, SURFACE};
use crate::error::CanvasResult;
use crate::snap::Snap;
use crate::surface::Rect;

/// Unique identifier for a slide element. Never reused.
pub type ElementId = Uuid;

/// The kind of media an element displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a MIME type such as `"image/png"` or `"video/mp4"`.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        let top = mime.split('/').next().unwrap_or("").trim().to_ascii_lowercase();
        match top.as_str() {
            "image" => Some(Self::Image),
            "video" => Some(Self::Video),
            _ => None,
        }
    }
}

/// Playback hints for video elements. Not part of geometry.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackFlags {
    pub autoplay: bool,
    pub muted: bool,
    #[serde(rename = "loop")]
    pub looping: bool,
    /// Show the browser's native video controls.
    pub controls: bool,
}

impl Default for PlaybackFlags {
    fn default() -> Self {
        Self { autoplay: false, muted: true, looping: true, controls: true }
    }
}

fn default_opacity() -> f64 {
    1.0
}

/// A media element placed on a slide, as stored in the document and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// Image or video.
    pub kind: MediaKind,
    /// Opaque media URL returned by the blob store.
    pub source_ref: String,
    /// Left edge in canonical units.
    pub x: f64,
    /// Top edge in canonical units.
    pub y: f64,
    /// Width in canonical units.
    pub width: f64,
    /// Height in canonical units.
    pub height: f64,
    /// Stacking order; higher values paint on top. Ties keep insertion order.
    pub z_index: i64,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Visual rotation in degrees, `[-180, 180]`. Does not affect hit-testing.
    #[serde(default)]
    pub rotation: f64,
    /// Corner radius in canonical units.
    #[serde(default)]
    pub corner_radius: f64,
    /// Locked elements ignore drag, resize, and keyboard nudges.
    #[serde(default)]
    pub locked: bool,
    /// Video playback hints; always `None` for images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playback: Option<PlaybackFlags>,
}

impl Element {
    /// Create an unlocked, fully opaque element with the given geometry.
    #[must_use]
    pub fn new(kind: MediaKind, source_ref: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            source_ref: source_ref.into(),
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            z_index: MIN_Z_INDEX,
            opacity: 1.0,
            rotation: 0.0,
            corner_radius: 0.0,
            locked: false,
            playback: match kind {
                MediaKind::Video => Some(PlaybackFlags::default()),
                MediaKind::Image => None,
            },
        }
    }

    /// Axis-aligned bounding box in canonical units.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback: Option<PlaybackFlags>,
}

impl PartialElement {
    /// A position-only update.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    /// A full geometry update.
    #[must_use]
    pub fn geometry(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
            ..Default::default()
        }
    }

    /// Whether any of `x`, `y`, `width`, `height` is present.
    #[must_use]
    pub fn has_geometry(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.width.is_some() || self.height.is_some()
    }

    /// True when no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Non-geometry visual properties edited from the inspector controls.
///
/// Allowed on locked elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePatch {
    pub opacity: Option<f64>,
    pub rotation: Option<f64>,
    pub corner_radius: Option<f64>,
}

impl From<StylePatch> for PartialElement {
    fn from(style: StylePatch) -> Self {
        Self {
            opacity: style.opacity,
            rotation: style.rotation,
            corner_radius: style.corner_radius,
            ..Default::default()
        }
    }
}

/// Result of a media upload, as returned by the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: Uuid,
    /// Stable URL; placed verbatim into [`Element::source_ref`].
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Size of the uploaded file in bytes.
    pub size: u64,
}

/// One slide: its media elements plus slide-level text fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: Uuid,
    /// Position among sibling slides.
    pub order: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// CSS background (color or image URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Slide {
    #[must_use]
    pub fn new(order: u32) -> Self {
        Self { id: Uuid::new_v4(), order, title: String::new(), body: String::new(), background: None, elements: Vec::new() }
    }
}

/// A whole presentation as persisted by the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideDocument {
    /// Owning presentation. Servers overwrite it with the id from the request path.
    #[serde(default)]
    pub presentation_id: String,
    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl SlideDocument {
    /// An empty presentation.
    #[must_use]
    pub fn new(presentation_id: impl Into<String>) -> Self {
        Self { presentation_id: presentation_id.into(), slides: Vec::new() }
    }

    /// Decode a document and repair any out-of-range geometry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CanvasError::Decode`] when the JSON does not
    /// describe a slide document.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let mut doc: Self = serde_json::from_str(json)?;
        doc.sanitize();
        Ok(doc)
    }

    /// # Errors
    ///
    /// Returns [`crate::error::CanvasError::Decode`] if serialization fails.
    pub fn to_json(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Sort slides by `order` and clamp every element into a valid state.
    ///
    /// Returns the number of elements that needed correction.
    pub fn sanitize(&mut self) -> usize {
        self.slides.sort_by_key(|s| s.order);
        self.slides
            .iter_mut()
            .flat_map(|s| s.elements.iter_mut())
            .map(sanitize_element)
            .filter(|changed| *changed)
            .count()
    }
}

// =============================================================================
// CLAMPING
// =============================================================================

/// Floor a dimension at the minimum element size and cap it at the surface extent.
#[must_use]
pub fn clamp_dimension(value: f64, extent: f64) -> f64 {
    if !value.is_finite() {
        return MIN_ELEMENT_SIZE;
    }
    value.max(MIN_ELEMENT_SIZE).min(extent)
}

/// Clamp a leading-edge position so `[pos, pos + size]` fits inside `[0, extent]`.
#[must_use]
pub fn clamp_position(pos: f64, size: f64, extent: f64) -> f64 {
    if !pos.is_finite() {
        return 0.0;
    }
    pos.max(0.0).min((extent - size).max(0.0))
}

fn clamp_opacity(value: f64) -> f64 {
    if value.is_finite() { value.clamp(0.0, 1.0) } else { 1.0 }
}

/// Wrap a rotation into `[-180, 180]`.
fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    if (-180.0..=180.0).contains(&degrees) {
        return degrees;
    }
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

fn clamp_corner_radius(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

/// Repair an element in place. Returns `true` if anything changed.
pub fn sanitize_element(el: &mut Element) -> bool {
    let before = el.clone();
    el.width = clamp_dimension(el.width, SURFACE.width);
    el.height = clamp_dimension(el.height, SURFACE.height);
    el.x = clamp_position(el.x, el.width, SURFACE.width);
    el.y = clamp_position(el.y, el.height, SURFACE.height);
    el.opacity = clamp_opacity(el.opacity);
    el.rotation = normalize_rotation(el.rotation);
    el.corner_radius = clamp_corner_radius(el.corner_radius);
    el.z_index = el.z_index.max(MIN_Z_INDEX);
    match el.kind {
        MediaKind::Video => {
            if el.playback.is_none() {
                el.playback = Some(PlaybackFlags::default());
            }
        }
        MediaKind::Image => el.playback = None,
    }
    *el != before
}

// =============================================================================
// STORE
// =============================================================================

struct Entry {
    element: Element,
    /// Tie-break for equal `z_index`; lower paints first.
    seq: i64,
}

/// In-memory store of the elements on the slide being edited.
pub struct DocStore {
    entries: HashMap<ElementId, Entry>,
    next_seq: i64,
    low_seq: i64,
}

impl DocStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: HashMap::new(), next_seq: 0, low_seq: -1 }
    }

    fn push(&mut self, element: Element) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(element.id, Entry { element, seq });
    }

    /// Replace all elements with a persisted slide's elements, keeping their
    /// stored `z_index` and list order as the tie-break. A repeated id gets a
    /// fresh one so neither element is lost.
    pub fn load(&mut self, elements: Vec<Element>) {
        self.entries.clear();
        self.next_seq = 0;
        self.low_seq = -1;
        let mut repaired = 0usize;
        for mut el in elements {
            if sanitize_element(&mut el) {
                repaired += 1;
            }
            if self.contains(&el.id) {
                let fresh = Uuid::new_v4();
                log::warn!("duplicate element id {} on load; reassigned to {fresh}", el.id);
                el.id = fresh;
            }
            self.push(el);
        }
        if repaired > 0 {
            log::warn!("clamped {repaired} element(s) with invalid geometry on load");
        }
    }

    /// Insert a new element on top of the stack and return its id.
    pub fn add(&mut self, mut element: Element) -> ElementId {
        sanitize_element(&mut element);
        element.z_index = self.max_z().map_or(1, |z| z + 1);
        let id = element.id;
        self.push(element);
        id
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        self.entries.remove(id).map(|e| e.element)
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.entries.get(id).map(|e| &e.element)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.entries.contains_key(id)
    }

    /// Apply a sparse update.
    ///
    /// `x`/`y` pass through `snap` and are then clamped to the surface;
    /// `width`/`height` are floored at the minimum size and capped at the
    /// surface. Geometry fields are ignored on a locked element; everything
    /// else still applies. Returns the fields as actually stored, or `None`
    /// if the element does not exist.
    pub fn update(&mut self, id: &ElementId, partial: &PartialElement, snap: Snap) -> Option<PartialElement> {
        let el = &mut self.entries.get_mut(id)?.element;
        let mut applied = PartialElement::default();

        if partial.has_geometry() && !el.locked {
            let width = partial.width.map_or(el.width, |w| clamp_dimension(w, SURFACE.width));
            let height = partial.height.map_or(el.height, |h| clamp_dimension(h, SURFACE.height));
            let x = partial.x.map_or(el.x, |x| snap.apply(x));
            let y = partial.y.map_or(el.y, |y| snap.apply(y));
            el.width = width;
            el.height = height;
            el.x = clamp_position(x, width, SURFACE.width);
            el.y = clamp_position(y, height, SURFACE.height);
            applied.x = Some(el.x);
            applied.y = Some(el.y);
            applied.width = Some(el.width);
            applied.height = Some(el.height);
        }
        if let Some(z) = partial.z_index {
            el.z_index = z.max(MIN_Z_INDEX);
            applied.z_index = Some(el.z_index);
        }
        if let Some(o) = partial.opacity {
            el.opacity = clamp_opacity(o);
            applied.opacity = Some(el.opacity);
        }
        if let Some(r) = partial.rotation {
            el.rotation = normalize_rotation(r);
            applied.rotation = Some(el.rotation);
        }
        if let Some(c) = partial.corner_radius {
            el.corner_radius = clamp_corner_radius(c);
            applied.corner_radius = Some(el.corner_radius);
        }
        if let Some(flags) = partial.playback {
            if el.kind == MediaKind::Video {
                el.playback = Some(flags);
                applied.playback = Some(flags);
            }
        }
        if let Some(locked) = partial.locked {
            el.locked = locked;
            applied.locked = Some(locked);
        }
        Some(applied)
    }

    /// Clone an element with a fresh id, offset by [`DUPLICATE_OFFSET`], on top
    /// of the stack. The copy starts unlocked.
    pub fn duplicate(&mut self, id: &ElementId) -> Option<ElementId> {
        let source = self.get(id)?;
        let mut copy = source.clone();
        copy.id = Uuid::new_v4();
        copy.x = clamp_position(copy.x + DUPLICATE_OFFSET, copy.width, SURFACE.width);
        copy.y = clamp_position(copy.y + DUPLICATE_OFFSET, copy.height, SURFACE.height);
        copy.locked = false;
        Some(self.add(copy))
    }

    /// Raise an element above every other one. Returns its new `z_index`.
    pub fn bring_to_front(&mut self, id: &ElementId) -> Option<i64> {
        let current = self.get(id)?.z_index;
        let others_max = self.entries.values().filter(|e| e.element.id != *id).map(|e| e.element.z_index).max();
        let z = match others_max {
            Some(max) if current <= max => max + 1,
            _ => current,
        };
        let seq = self.next_seq;
        self.next_seq += 1;
        let entry = self.entries.get_mut(id)?;
        entry.element.z_index = z;
        entry.seq = seq;
        Some(z)
    }

    /// Lower an element beneath every other one. Returns its new `z_index`.
    ///
    /// The index never drops below [`MIN_Z_INDEX`]; when that floor produces a
    /// tie the element still paints first because its tie-break is reset to
    /// the lowest.
    pub fn send_to_back(&mut self, id: &ElementId) -> Option<i64> {
        let current = self.get(id)?.z_index;
        let others_min = self.entries.values().filter(|e| e.element.id != *id).map(|e| e.element.z_index).min();
        let z = match others_min {
            Some(min) if current >= min => (min - 1).max(MIN_Z_INDEX),
            _ => current,
        };
        let seq = self.low_seq;
        self.low_seq -= 1;
        let entry = self.entries.get_mut(id)?;
        entry.element.z_index = z;
        entry.seq = seq;
        Some(z)
    }

    /// Highest `z_index` in the store.
    #[must_use]
    pub fn max_z(&self) -> Option<i64> {
        self.entries.values().map(|e| e.element.z_index).max()
    }

    /// All elements in paint order (bottom first).
    #[must_use]
    pub fn sorted_elements(&self) -> Vec<&Element> {
        let mut entries: Vec<&Entry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.element.z_index.cmp(&b.element.z_index).then(a.seq.cmp(&b.seq)));
        entries.into_iter().map(|e| &e.element).collect()
    }

    /// Owned copy of all elements in paint order, ready to persist.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Element> {
        self.sorted_elements().into_iter().cloned().collect()
    }

    /// Number of elements currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DocStore {
    fn default() -> Self {
        Self::new()
    }
}
