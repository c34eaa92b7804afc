use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use wasm_bindgen::JsCast;

use crate::config::EditorConfig;
use crate::consts::{DEFAULT_ELEMENT_SIZE, FINE_NUDGE, SURFACE};
use crate::doc::{DocStore, Element, ElementId, MediaAsset, PartialElement, PlaybackFlags, StylePatch};
use crate::error::CanvasResult;
use crate::gesture;
use crate::hit::{self, HitPart};
use crate::input::{Button, GestureMode, InputState, Key, Modifiers, UiState};
use crate::render::{self, ProjectedElement};
use crate::snap::Snap;
use crate::surface::{BoxScale, Point, Rect, Size};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new element exists; persist it.
    ElementCreated(Element),
    /// Persist these fields of an element.
    ElementUpdated { id: ElementId, fields: PartialElement },
    ElementDeleted { id: ElementId },
    SelectionChanged(Option<ElementId>),
    SetCursor(String),
    RenderNeeded,
}

/// The position/size readout for the selected element, in canonical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    pub id: ElementId,
    pub rect: Rect,
    pub locked: bool,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub doc: DocStore,
    pub ui: UiState,
    pub input: InputState,
    pub config: EditorConfig,
    /// Physical rectangle of the preview box, in the same coordinate space as
    /// pointer events.
    pub preview_box: Rect,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            doc: DocStore::new(),
            ui: UiState::default(),
            input: InputState::default(),
            config: EditorConfig::default(),
            preview_box: Rect::default(),
            dpr: 1.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Load the elements of the slide to edit. Ends any gesture and clears
    /// the selection.
    pub fn load_slide(&mut self, elements: Vec<Element>) {
        self.doc.load(elements);
        self.input = InputState::Idle;
        self.ui.selected_id = None;
    }

    /// Elements in paint order, for persisting the slide.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Element> {
        self.doc.snapshot()
    }

    /// Replace the grid settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CanvasError::InvalidGridStep`] and keeps the
    /// previous config when `config.grid_step` is zero.
    pub fn set_config(&mut self, config: EditorConfig) -> CanvasResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Update the preview box rectangle and device pixel ratio. A gesture in
    /// flight keeps the scale it captured at pointer-down.
    pub fn set_preview_box(&mut self, rect: Rect, dpr: f64) {
        self.preview_box = rect;
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    }

    // --- Commands ---

    /// Place an uploaded asset as a new element centred on the slide, on top
    /// of the stack, and select it.
    pub fn add_media(&mut self, asset: &MediaAsset) -> Vec<Action> {
        let x = (SURFACE.width - DEFAULT_ELEMENT_SIZE.width) / 2.0;
        let y = (SURFACE.height - DEFAULT_ELEMENT_SIZE.height) / 2.0;
        let snap = self.config.snap();
        let rect = Rect::new(snap.apply(x), snap.apply(y), DEFAULT_ELEMENT_SIZE.width, DEFAULT_ELEMENT_SIZE.height);
        let id = self.doc.add(Element::new(asset.kind, asset.url.clone(), rect));
        let mut actions = Vec::new();
        if let Some(el) = self.doc.get(&id) {
            actions.push(Action::ElementCreated(el.clone()));
        }
        actions.extend(self.select(Some(id)));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Delete an element. Clears the selection if it was selected.
    pub fn remove(&mut self, id: &ElementId) -> Vec<Action> {
        if self.doc.remove(id).is_none() {
            return Vec::new();
        }
        let mut actions = vec![Action::ElementDeleted { id: *id }];
        if self.ui.selected_id.as_ref() == Some(id) {
            actions.extend(self.select(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Duplicate an element and select the copy.
    pub fn duplicate(&mut self, id: &ElementId) -> Vec<Action> {
        let Some(copy_id) = self.doc.duplicate(id) else {
            return Vec::new();
        };
        let mut actions = Vec::new();
        if let Some(copy) = self.doc.get(&copy_id) {
            actions.push(Action::ElementCreated(copy.clone()));
        }
        actions.extend(self.select(Some(copy_id)));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn bring_to_front(&mut self, id: &ElementId) -> Vec<Action> {
        let before = self.doc.get(id).map(|el| el.z_index);
        let after = self.doc.bring_to_front(id);
        Self::z_actions(*id, before, after)
    }

    pub fn send_to_back(&mut self, id: &ElementId) -> Vec<Action> {
        let before = self.doc.get(id).map(|el| el.z_index);
        let after = self.doc.send_to_back(id);
        Self::z_actions(*id, before, after)
    }

    fn z_actions(id: ElementId, before: Option<i64>, after: Option<i64>) -> Vec<Action> {
        match after {
            None => Vec::new(),
            Some(z) if Some(z) == before => vec![Action::RenderNeeded],
            Some(z) => vec![
                Action::ElementUpdated { id, fields: PartialElement { z_index: Some(z), ..Default::default() } },
                Action::RenderNeeded,
            ],
        }
    }

    /// Toggle an element's lock. Lock controls are disabled while a gesture
    /// is in flight, so this is a no-op unless the engine is idle.
    pub fn set_locked(&mut self, id: &ElementId, locked: bool) -> Vec<Action> {
        if !self.input.is_idle() {
            log::debug!("lock change for {id} ignored during gesture");
            return Vec::new();
        }
        let partial = PartialElement { locked: Some(locked), ..Default::default() };
        self.commit(id, &partial, Snap::off())
    }

    /// Apply opacity/rotation/corner radius from the inspector. Allowed on
    /// locked elements.
    pub fn set_style(&mut self, id: &ElementId, style: StylePatch) -> Vec<Action> {
        self.commit(id, &PartialElement::from(style), Snap::off())
    }

    /// Replace a video element's playback flags.
    pub fn set_playback(&mut self, id: &ElementId, flags: PlaybackFlags) -> Vec<Action> {
        let partial = PartialElement { playback: Some(flags), ..Default::default() };
        self.commit(id, &partial, Snap::off())
    }

    fn commit(&mut self, id: &ElementId, partial: &PartialElement, snap: Snap) -> Vec<Action> {
        match self.doc.update(id, partial, snap) {
            Some(fields) if !fields.is_empty() => {
                vec![Action::ElementUpdated { id: *id, fields }, Action::RenderNeeded]
            }
            _ => Vec::new(),
        }
    }

    fn select(&mut self, id: Option<ElementId>) -> Vec<Action> {
        if self.ui.selected_id == id {
            return Vec::new();
        }
        self.ui.selected_id = id;
        vec![Action::SelectionChanged(id)]
    }

    // --- Input events ---

    /// Pointer pressed at physical `screen_pt`.
    ///
    /// Selects whatever is under the pointer (or clears the selection on empty
    /// canvas) and starts a drag or resize on unlocked elements. Ignored while
    /// another gesture is active.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_idle() || button != Button::Primary {
            return Vec::new();
        }
        let Some(scale) = BoxScale::capture(self.preview_box) else {
            return Vec::new();
        };

        let Some(hit) = hit::hit_test(screen_pt, &self.doc, &scale, self.ui.selected_id) else {
            let mut actions = self.select(None);
            if !actions.is_empty() {
                actions.push(Action::RenderNeeded);
            }
            return actions;
        };

        let mut actions = self.select(Some(hit.element_id));
        let Some(el) = self.doc.get(&hit.element_id) else {
            return actions;
        };
        if !el.locked {
            let start = el.rect();
            self.input = match hit.part {
                HitPart::Body => {
                    InputState::Dragging { id: el.id, start_pointer: screen_pt, start, scale }
                }
                HitPart::ResizeHandle(anchor) => {
                    InputState::Resizing { id: el.id, anchor, start_pointer: screen_pt, start, scale }
                }
            };
            log::debug!("gesture {:?} started on {}", self.input.mode(), hit.element_id);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Pointer moved to physical `screen_pt`.
    ///
    /// During a gesture this recomputes the target's geometry from the total
    /// displacement since pointer-down and commits it. While idle it reports
    /// the hover cursor.
    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if self.input.is_idle() {
            return self.hover(screen_pt);
        }
        let snap = self.config.snap();
        let (id, geometry, snap) = match &self.input {
            InputState::Idle => return Vec::new(),
            InputState::Dragging { id, start_pointer, start, scale } => {
                let delta = scale.delta_to_canonical(screen_pt.delta_from(*start_pointer));
                (*id, gesture::drag(*start, delta, snap), snap)
            }
            InputState::Resizing { id, anchor, start_pointer, start, scale } => {
                let delta = scale.delta_to_canonical(screen_pt.delta_from(*start_pointer));
                // The grid was already applied to the dragged edge.
                (*id, gesture::resize(*start, *anchor, delta, snap), Snap::off())
            }
        };

        if self.doc.update(&id, &PartialElement::geometry(geometry), snap).is_none() {
            log::debug!("gesture target {id} vanished; ending stale session");
            self.input = InputState::Idle;
            return Vec::new();
        }
        vec![Action::RenderNeeded]
    }

    /// Pointer released anywhere. Ends the gesture and reports the final
    /// geometry if it changed.
    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.finish_gesture()
    }

    /// The browser cancelled the pointer (focus loss, touch interrupted).
    /// Geometry stays at the last successfully computed value.
    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.finish_gesture()
    }

    fn finish_gesture(&mut self) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        let (Some(id), Some(start)) = (state.target(), state.start_rect()) else {
            return Vec::new();
        };
        log::debug!("gesture {:?} ended on {id}", state.mode());
        let Some(el) = self.doc.get(&id) else {
            return Vec::new();
        };
        let rect = el.rect();
        if rect == start {
            return vec![Action::RenderNeeded];
        }
        vec![Action::ElementUpdated { id, fields: PartialElement::geometry(rect) }, Action::RenderNeeded]
    }

    fn hover(&mut self, screen_pt: Point) -> Vec<Action> {
        let Some(scale) = BoxScale::capture(self.preview_box) else {
            return Vec::new();
        };
        let cursor = match hit::hit_test(screen_pt, &self.doc, &scale, self.ui.selected_id) {
            None => "default",
            Some(hit) => match (hit.part, self.doc.get(&hit.element_id).map(|el| el.locked)) {
                (_, Some(true)) => "not-allowed",
                (HitPart::ResizeHandle(anchor), _) => anchor.cursor(),
                (HitPart::Body, _) => "move",
            },
        };
        if self.ui.cursor == cursor {
            return Vec::new();
        }
        self.ui.cursor = cursor;
        vec![Action::SetCursor(cursor.to_string())]
    }

    /// Key pressed.
    ///
    /// Arrows nudge the selected unlocked element by one grid step (one unit
    /// with Shift, unsnapped). Delete/Backspace removes it, Ctrl/Cmd+D
    /// duplicates it, Escape cancels a gesture or clears the selection.
    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if key.0 == "Escape" {
            if !self.input.is_idle() {
                return self.finish_gesture();
            }
            let mut actions = self.select(None);
            if !actions.is_empty() {
                actions.push(Action::RenderNeeded);
            }
            return actions;
        }
        if !self.input.is_idle() {
            return Vec::new();
        }
        let Some(id) = self.ui.selected_id else {
            return Vec::new();
        };

        match key.0.as_str() {
            "ArrowLeft" => self.nudge(&id, -1.0, 0.0, modifiers),
            "ArrowRight" => self.nudge(&id, 1.0, 0.0, modifiers),
            "ArrowUp" => self.nudge(&id, 0.0, -1.0, modifiers),
            "ArrowDown" => self.nudge(&id, 0.0, 1.0, modifiers),
            "Delete" | "Backspace" => self.remove(&id),
            "d" | "D" if modifiers.command() => self.duplicate(&id),
            _ => Vec::new(),
        }
    }

    fn nudge(&mut self, id: &ElementId, dir_x: f64, dir_y: f64, modifiers: Modifiers) -> Vec<Action> {
        let Some(el) = self.doc.get(id) else {
            return Vec::new();
        };
        if el.locked {
            return Vec::new();
        }
        let (step, snap) = if modifiers.shift {
            (FINE_NUDGE, Snap::off())
        } else {
            (self.config.grid_step_units(), self.config.snap())
        };
        let start = el.rect();
        let moved = gesture::nudge(start, dir_x * step, dir_y * step, snap);
        if moved == start {
            return Vec::new();
        }
        self.commit(id, &PartialElement::position(moved.x, moved.y), snap)
    }

    // --- Queries ---

    /// The currently selected element, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.ui.selected_id
    }

    /// The current gesture mode.
    #[must_use]
    pub fn gesture_mode(&self) -> GestureMode {
        self.input.mode()
    }

    /// Look up an element by ID.
    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.doc.get(id)
    }

    /// Position/size readout for the selected element.
    #[must_use]
    pub fn readout(&self) -> Option<Readout> {
        let el = self.ui.selected_id.and_then(|id| self.doc.get(&id))?;
        Some(Readout { id: el.id, rect: el.rect(), locked: el.locked })
    }

    /// Elements projected into the preview box (box-relative), paint order.
    #[must_use]
    pub fn layout(&self) -> Vec<ProjectedElement> {
        render::preview_layout(&self.doc, self.preview_box.size())
    }
}

/// The full editor engine. Wraps `EngineCore` and owns the overlay canvas
/// the selection chrome is drawn on.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given overlay canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Viewport ---

    /// Update the preview box rectangle and device pixel ratio, and size the
    /// overlay backing store to match.
    pub fn set_preview_box(&mut self, rect: Rect, dpr: f64) {
        self.core.set_preview_box(rect, dpr);
        let backing = Size::new(rect.width * self.core.dpr, rect.height * self.core.dpr);
        if !backing.is_degenerate() {
            self.canvas.set_width(backing_px(backing.width));
            self.canvas.set_height(backing_px(backing.height));
        }
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers)
    }

    pub fn on_pointer_cancel(&mut self) -> Vec<Action> {
        self.core.on_pointer_cancel()
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the selection overlay.
    pub fn render(&self) {
        let ctx = match self.canvas.get_context("2d") {
            Ok(Some(obj)) => match obj.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => {
                    log::warn!("overlay canvas has no 2d context");
                    return;
                }
            },
            Ok(None) | Err(_) => {
                log::warn!("overlay canvas has no 2d context");
                return;
            }
        };
        if let Err(e) = render::draw_overlay(&ctx, &self.core.doc, &self.core.ui, self.core.preview_box.size(), self.core.dpr) {
            log::warn!("overlay render failed: {e:?}");
        }
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.core.selection()
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.core.element(id)
    }

    #[must_use]
    pub fn layout(&self) -> Vec<ProjectedElement> {
        self.core.layout()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn backing_px(px: f64) -> u32 {
    px.round().clamp(0.0, f64::from(u32::MAX)) as u32
}
