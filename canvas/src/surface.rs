//! Canonical canvas model: points, sizes, rectangles, and the mapping
//! between canonical units and a physical rendering box.
//!
//! All element geometry is stored in canonical units on the fixed
//! [`SURFACE`](crate::consts::SURFACE). A physical box (the editor preview,
//! in CSS pixels) maps onto that surface with an independent scale per
//! axis. A box with zero or non-finite size has no scale; conversions
//! through it return their input unchanged.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use serde::{Deserialize, Serialize};

use crate::consts::SURFACE;

/// A point in either canonical or physical space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either side is zero, negative, or not finite.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// The canonical-to-physical scale of one physical box.
///
/// Captured once per gesture so pointer deltas keep converting at the same
/// ratio even if the surrounding layout reflows while the pointer is down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxScale {
    rect: Rect,
    /// Physical pixels per canonical unit, horizontally.
    sx: f64,
    /// Physical pixels per canonical unit, vertically.
    sy: f64,
}

impl BoxScale {
    /// Capture the scale of `rect`. Returns `None` for a degenerate box.
    #[must_use]
    pub fn capture(rect: Rect) -> Option<Self> {
        if rect.size().is_degenerate() || !rect.x.is_finite() || !rect.y.is_finite() {
            return None;
        }
        Some(Self { rect, sx: rect.width / SURFACE.width, sy: rect.height / SURFACE.height })
    }

    /// The physical box this scale was captured from.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub fn scale_x(&self) -> f64 {
        self.sx
    }

    #[must_use]
    pub fn scale_y(&self) -> f64 {
        self.sy
    }

    /// Canonical point → physical point (box origin included).
    #[must_use]
    pub fn to_physical(&self, canonical: Point) -> Point {
        Point { x: self.rect.x + canonical.x * self.sx, y: self.rect.y + canonical.y * self.sy }
    }

    /// Physical point → canonical point.
    #[must_use]
    pub fn to_canonical(&self, physical: Point) -> Point {
        Point { x: (physical.x - self.rect.x) / self.sx, y: (physical.y - self.rect.y) / self.sy }
    }

    /// Physical displacement → canonical displacement. Origin-free.
    #[must_use]
    pub fn delta_to_canonical(&self, physical_delta: Point) -> Point {
        Point { x: physical_delta.x / self.sx, y: physical_delta.y / self.sy }
    }

    /// Canonical rectangle → physical rectangle.
    #[must_use]
    pub fn rect_to_physical(&self, canonical: Rect) -> Rect {
        let origin = self.to_physical(canonical.origin());
        Rect::new(origin.x, origin.y, canonical.width * self.sx, canonical.height * self.sy)
    }
}

/// Convert a canonical point into `box_rect`'s physical space.
///
/// A degenerate box leaves the point unchanged.
#[must_use]
pub fn to_physical(canonical: Point, box_rect: Rect) -> Point {
    match BoxScale::capture(box_rect) {
        Some(scale) => scale.to_physical(canonical),
        None => canonical,
    }
}

/// Convert a physical point inside `box_rect` back into canonical space.
///
/// A degenerate box leaves the point unchanged.
#[must_use]
pub fn to_canonical(physical: Point, box_rect: Rect) -> Point {
    match BoxScale::capture(box_rect) {
        Some(scale) => scale.to_canonical(physical),
        None => physical,
    }
}
