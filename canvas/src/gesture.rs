//! Geometry for drag, resize, and keyboard nudge.
//!
//! Pure functions of (start geometry, canonical delta, snap policy). The
//! engine converts pointer deltas into canonical deltas with the scale it
//! captured at pointer-down and commits the returned rectangle to the store.
//! Each function returns a rectangle that already satisfies the bounds
//! invariant, so committing it never moves the element further.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::consts::{MIN_ELEMENT_SIZE, SURFACE};
use crate::doc::clamp_position;
use crate::hit::ResizeAnchor;
use crate::snap::Snap;
use crate::surface::{Point, Rect};

/// Move `start` by `delta`: clamp to the surface, snap, then clamp again in
/// case snapping rounded past the far edge.
#[must_use]
pub fn drag(start: Rect, delta: Point, snap: Snap) -> Rect {
    let x = clamp_position(start.x + delta.x, start.width, SURFACE.width);
    let y = clamp_position(start.y + delta.y, start.height, SURFACE.height);
    Rect::new(
        clamp_position(snap.apply(x), start.width, SURFACE.width),
        clamp_position(snap.apply(y), start.height, SURFACE.height),
        start.width,
        start.height,
    )
}

/// Keyboard nudge: a discrete drag with no pointer involved.
#[must_use]
pub fn nudge(start: Rect, dx: f64, dy: f64, snap: Snap) -> Rect {
    drag(start, Point::new(dx, dy), snap)
}

/// Resize `start` by dragging `anchor` by `delta`.
///
/// Edges not touched by the handle stay fixed. The grid applies to the
/// dragged edge, so the opposite edge never shifts when snapping is on.
/// Per axis: the new dimension is rounded and floored at the minimum size,
/// the leading coordinate is recomputed from that floored value, and the
/// dimension is capped so the element stays on the surface.
#[must_use]
pub fn resize(start: Rect, anchor: ResizeAnchor, delta: Point, snap: Snap) -> Rect {
    let (x, width) = resize_axis(
        start.x,
        start.width,
        delta.x,
        AxisEdge::from_flags(anchor.moves_west(), anchor.moves_east()),
        SURFACE.width,
        snap,
    );
    let (y, height) = resize_axis(
        start.y,
        start.height,
        delta.y,
        AxisEdge::from_flags(anchor.moves_north(), anchor.moves_south()),
        SURFACE.height,
        snap,
    );
    Rect::new(x, y, width, height)
}

/// Which edge of one axis a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisEdge {
    /// Left or top edge; the far edge is the anchor.
    Leading,
    /// Right or bottom edge; the position is the anchor.
    Trailing,
    /// Handle does not act on this axis.
    Fixed,
}

impl AxisEdge {
    fn from_flags(leading: bool, trailing: bool) -> Self {
        if leading {
            Self::Leading
        } else if trailing {
            Self::Trailing
        } else {
            Self::Fixed
        }
    }
}

fn resize_axis(pos: f64, size: f64, delta: f64, edge: AxisEdge, extent: f64, snap: Snap) -> (f64, f64) {
    let far = pos + size;
    match edge {
        AxisEdge::Leading => {
            let dragged = snap.apply(pos + delta);
            // far - new_size must stay >= 0
            let new_size = (far - dragged).round().max(MIN_ELEMENT_SIZE).min(far);
            (far - new_size, new_size)
        }
        AxisEdge::Trailing => {
            let dragged = snap.apply(far + delta);
            let new_size = (dragged - pos).round().max(MIN_ELEMENT_SIZE).min(extent - pos);
            (pos, new_size)
        }
        AxisEdge::Fixed => (pos, size),
    }
}
