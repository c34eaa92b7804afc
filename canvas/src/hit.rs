#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{DocStore, ElementId};
use crate::surface::{BoxScale, Point, Rect};

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    ResizeHandle(ResizeAnchor),
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// All eight handles, clockwise from north.
    pub const ALL: [ResizeAnchor; 8] = [Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W, Self::Nw];

    /// Handle drags the left edge.
    #[must_use]
    pub fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Handle drags the right edge.
    #[must_use]
    pub fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Handle drags the top edge.
    #[must_use]
    pub fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Handle drags the bottom edge.
    #[must_use]
    pub fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Centre of this handle on `rect`.
    #[must_use]
    pub fn position(self, rect: Rect) -> Point {
        let cx = rect.x + rect.width * 0.5;
        let cy = rect.y + rect.height * 0.5;
        let x = if self.moves_west() {
            rect.x
        } else if self.moves_east() {
            rect.right()
        } else {
            cx
        };
        let y = if self.moves_north() {
            rect.y
        } else if self.moves_south() {
            rect.bottom()
        } else {
            cy
        };
        Point::new(x, y)
    }

    /// CSS cursor shown while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::Nw | Self::Se => "nwse-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Test which element (if any) is under the physical point `pt`.
///
/// The selected element's handles win over everything (locked elements have
/// none). Bodies are tested topmost first using the axis-aligned bounding
/// box; rotation is ignored.
#[must_use]
pub fn hit_test(pt: Point, doc: &DocStore, scale: &BoxScale, selected_id: Option<ElementId>) -> Option<Hit> {
    if let Some(el) = selected_id.and_then(|id| doc.get(&id)) {
        if !el.locked {
            let rect = scale.rect_to_physical(el.rect());
            for anchor in ResizeAnchor::ALL {
                let handle = anchor.position(rect);
                if (pt.x - handle.x).abs() <= HANDLE_RADIUS_PX && (pt.y - handle.y).abs() <= HANDLE_RADIUS_PX {
                    return Some(Hit { element_id: el.id, part: HitPart::ResizeHandle(anchor) });
                }
            }
        }
    }

    doc.sorted_elements()
        .into_iter()
        .rev()
        .find(|el| scale.rect_to_physical(el.rect()).contains(pt))
        .map(|el| Hit { element_id: el.id, part: HitPart::Body })
}
