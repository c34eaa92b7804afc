//! Full-screen playback: letterboxed projection of a committed slide.
//!
//! The viewer never accepts input. It reprojects the slide's elements with
//! a single uniform scale whenever the viewport changes, centring the
//! surface so proportions and rotations look exactly as they did in the
//! editor. A degenerate viewport (zero size during initial layout) keeps
//! the last good layout instead of producing NaN geometry.

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

use crate::consts::SURFACE;
use crate::doc::{Element, sanitize_element};
use crate::render::ProjectedElement;
use crate::surface::{Point, Rect, Size};

/// Uniform scale plus centring offsets that fit the surface into a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    /// Physical pixels per canonical unit, on both axes.
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Letterbox {
    /// Fit the surface into `viewport`. `None` for a degenerate viewport.
    #[must_use]
    pub fn fit(viewport: Size) -> Option<Self> {
        if viewport.is_degenerate() {
            return None;
        }
        let scale = (viewport.width / SURFACE.width).min(viewport.height / SURFACE.height);
        Some(Self {
            scale,
            offset_x: (viewport.width - SURFACE.width * scale) / 2.0,
            offset_y: (viewport.height - SURFACE.height * scale) / 2.0,
        })
    }

    #[must_use]
    pub fn to_physical(&self, canonical: Point) -> Point {
        Point::new(canonical.x * self.scale + self.offset_x, canonical.y * self.scale + self.offset_y)
    }

    #[must_use]
    pub fn to_canonical(&self, physical: Point) -> Point {
        Point::new((physical.x - self.offset_x) / self.scale, (physical.y - self.offset_y) / self.scale)
    }

    /// The physical rectangle the surface occupies inside the viewport.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        Rect::new(self.offset_x, self.offset_y, SURFACE.width * self.scale, SURFACE.height * self.scale)
    }

    /// Project one element. Corner radius scales with the content.
    #[must_use]
    pub fn project(&self, el: &Element) -> ProjectedElement {
        let origin = self.to_physical(Point::new(el.x, el.y));
        let rect = Rect::new(origin.x, origin.y, el.width * self.scale, el.height * self.scale);
        let radius = el.corner_radius * self.scale;
        ProjectedElement::new(el, rect, radius, radius)
    }
}

/// Project a single element into `viewport`. `None` for a degenerate viewport.
#[must_use]
pub fn project(el: &Element, viewport: Size) -> Option<ProjectedElement> {
    Letterbox::fit(viewport).map(|lb| lb.project(el))
}

/// Playback state for one slide: its elements and the layout for the
/// current viewport.
#[derive(Debug, Clone, Default)]
pub struct ViewerCore {
    elements: Vec<Element>,
    viewport: Size,
    letterbox: Option<Letterbox>,
    layout: Vec<ProjectedElement>,
}

impl ViewerCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a slide's committed elements. Invalid geometry is clamped.
    pub fn load_slide(&mut self, mut elements: Vec<Element>) {
        for el in &mut elements {
            sanitize_element(el);
        }
        // Stable sort keeps list order for equal z.
        elements.sort_by_key(|el| el.z_index);
        self.elements = elements;
        self.layout.clear();
        self.reproject();
    }

    /// Record a viewport resize and reproject. Returns `true` when the layout
    /// was recomputed, `false` when the viewport was degenerate and the last
    /// good layout was kept.
    pub fn set_viewport(&mut self, viewport: Size) -> bool {
        self.viewport = viewport;
        self.reproject()
    }

    /// Fullscreen entered or exited; the viewport size changed with it.
    pub fn on_fullscreen_change(&mut self, viewport: Size) -> bool {
        log::debug!("fullscreen change: {}x{}", viewport.width, viewport.height);
        self.set_viewport(viewport)
    }

    fn reproject(&mut self) -> bool {
        let Some(letterbox) = Letterbox::fit(self.viewport) else {
            return false;
        };
        self.letterbox = Some(letterbox);
        self.layout = self.elements.iter().map(|el| letterbox.project(el)).collect();
        true
    }

    /// Elements in paint order, projected for the current viewport.
    #[must_use]
    pub fn layout(&self) -> &[ProjectedElement] {
        &self.layout
    }

    #[must_use]
    pub fn letterbox(&self) -> Option<Letterbox> {
        self.letterbox
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

/// Browser-side viewer that reads the window size itself.
#[derive(Debug, Default)]
pub struct Viewer {
    pub core: ViewerCore,
}

impl Viewer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the window's inner size and reproject. Call from `resize` and
    /// `fullscreenchange` listeners.
    pub fn sync_window_viewport(&mut self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        let width = match window.inner_width() {
            Ok(v) => v.as_f64().unwrap_or(0.0),
            Err(_) => 0.0,
        };
        let height = match window.inner_height() {
            Ok(v) => v.as_f64().unwrap_or(0.0),
            Err(_) => 0.0,
        };
        self.core.set_viewport(Size::new(width, height))
    }
}
