//! Shared numeric constants for the canvas crate.

use crate::surface::Size;

// ── Canonical surface ───────────────────────────────────────────

/// Logical design surface every element's geometry is stored in.
///
/// Editor and viewer must agree on this value or persisted slides drift
/// between the two.
pub const SURFACE: Size = Size { width: 1200.0, height: 675.0 };

/// Smallest width or height an element may have, in canonical units.
pub const MIN_ELEMENT_SIZE: f64 = 50.0;

/// Lowest `z_index` an element may hold. `send_to_back` floors here.
pub const MIN_Z_INDEX: i64 = 1;

/// Offset applied to both axes when duplicating an element.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Default size of a freshly placed media element.
pub const DEFAULT_ELEMENT_SIZE: Size = Size { width: 400.0, height: 300.0 };

// ── Grid ────────────────────────────────────────────────────────

/// Grid step used when no editor config has been supplied.
pub const DEFAULT_GRID_STEP: u32 = 20;

/// Nudge distance for arrow keys with Shift held.
pub const FINE_NUDGE: f64 = 1.0;

// ── Hit-testing ─────────────────────────────────────────────────

/// Physical-pixel hit slop around each resize handle centre.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Drawn side length of a resize handle square, in physical pixels.
pub const HANDLE_SIZE_PX: f64 = 10.0;
