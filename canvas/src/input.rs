//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Modifiers`, `Button`, and `Key` describe raw events delivered by the host.
//! `InputState` is the interaction session tracked between pointer-down and
//! pointer-up, carrying everything needed to recompute geometry from the
//! total pointer displacement on each move. It is never persisted.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::ElementId;
use crate::hit::ResizeAnchor;
use crate::surface::{BoxScale, Point, Rect};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key as reported by the browser (`KeyboardEvent.key`), e.g.
/// `"ArrowLeft"`, `"Delete"`, `"d"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected element, if any.
    pub selected_id: Option<ElementId>,
    /// Cursor last reported to the host while idle.
    pub cursor: &'static str,
}

/// Coarse gesture mode, for hosts that only need to know whether a gesture
/// is running (e.g. to disable lock controls).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    Idle,
    Dragging,
    Resizing,
}

/// Internal state for the input state machine.
///
/// Each active variant carries the context captured at pointer-down. The
/// scale is captured once so that the physical-to-canonical ratio stays
/// stable for the whole gesture.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an element across the slide.
    Dragging {
        /// Id of the element being dragged.
        id: ElementId,
        /// Physical pointer position at pointer-down.
        start_pointer: Point,
        /// Element geometry at pointer-down.
        start: Rect,
        /// Preview box scale at pointer-down.
        scale: BoxScale,
    },
    /// The user is resizing an element by dragging one of its eight handles.
    Resizing {
        /// Id of the element being resized.
        id: ElementId,
        /// Which corner/edge handle is being dragged.
        anchor: ResizeAnchor,
        /// Physical pointer position at pointer-down.
        start_pointer: Point,
        /// Element geometry at pointer-down.
        start: Rect,
        /// Preview box scale at pointer-down.
        scale: BoxScale,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn mode(&self) -> GestureMode {
        match self {
            Self::Idle => GestureMode::Idle,
            Self::Dragging { .. } => GestureMode::Dragging,
            Self::Resizing { .. } => GestureMode::Resizing,
        }
    }

    /// The element the active gesture targets.
    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(*id),
        }
    }

    /// Geometry of the target at pointer-down.
    #[must_use]
    pub fn start_rect(&self) -> Option<Rect> {
        match self {
            Self::Idle => None,
            Self::Dragging { start, .. } | Self::Resizing { start, .. } => Some(*start),
        }
    }
}
