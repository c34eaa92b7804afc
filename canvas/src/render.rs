//! Rendering: editor preview projection and the selection overlay.
//!
//! Media elements are real `<img>`/`<video>` nodes positioned by the host, so
//! this module does not paint them. It produces their physical layout
//! ([`ProjectedElement`]) for the preview box and draws the selection chrome
//! (dashed box, eight handles, position/size readout) onto a transparent
//! overlay canvas.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::HANDLE_SIZE_PX;
use crate::doc::{DocStore, Element, ElementId, MediaKind, PlaybackFlags};
use crate::hit::ResizeAnchor;
use crate::input::UiState;
use crate::surface::{BoxScale, Rect, Size};

/// Selection dash segment length in physical pixels.
const SELECTION_DASH_PX: f64 = 4.0;

const SELECTION_COLOR: &str = "#1E90FF";
const LOCKED_COLOR: &str = "#9AA0A6";

/// Gap between the selection box and the readout label.
const READOUT_GAP_PX: f64 = 6.0;
const READOUT_FONT_PX: f64 = 11.0;

/// An element mapped into a physical surface, ready for the host to position
/// a media node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedElement {
    pub id: ElementId,
    pub kind: MediaKind,
    pub source_ref: String,
    /// Physical bounding box.
    pub rect: Rect,
    pub z_index: i64,
    pub opacity: f64,
    /// Degrees, unchanged by projection.
    pub rotation: f64,
    /// Horizontal corner radius in physical pixels.
    pub corner_radius_x: f64,
    /// Vertical corner radius in physical pixels. Equals `corner_radius_x`
    /// under a uniform scale.
    pub corner_radius_y: f64,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback: Option<PlaybackFlags>,
}

impl ProjectedElement {
    pub(crate) fn new(el: &Element, rect: Rect, corner_radius_x: f64, corner_radius_y: f64) -> Self {
        Self {
            id: el.id,
            kind: el.kind,
            source_ref: el.source_ref.clone(),
            rect,
            z_index: el.z_index,
            opacity: el.opacity,
            rotation: el.rotation,
            corner_radius_x,
            corner_radius_y,
            locked: el.locked,
            playback: el.playback,
        }
    }
}

/// Project one element into the editor preview box (per-axis fill scale).
#[must_use]
pub fn project_preview(el: &Element, scale: &BoxScale) -> ProjectedElement {
    let rect = scale.rect_to_physical(el.rect());
    ProjectedElement::new(el, rect, el.corner_radius * scale.scale_x(), el.corner_radius * scale.scale_y())
}

/// Project every element into a preview box of `box_size`, in paint order.
///
/// Coordinates are relative to the box's top-left corner. A degenerate box
/// yields an empty layout.
#[must_use]
pub fn preview_layout(doc: &DocStore, box_size: Size) -> Vec<ProjectedElement> {
    let Some(scale) = BoxScale::capture(Rect::new(0.0, 0.0, box_size.width, box_size.height)) else {
        return Vec::new();
    };
    doc.sorted_elements()
        .into_iter()
        .map(|el| project_preview(el, &scale))
        .collect()
}

/// Text for the position/size readout, in canonical units.
#[must_use]
pub fn readout_label(el: &Element) -> String {
    format!("{:.0}, {:.0}  {:.0} × {:.0}", el.x, el.y, el.width, el.height)
}

/// Draw the selection overlay for the preview box.
///
/// `box_size` is in CSS pixels; `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw_overlay(
    ctx: &CanvasRenderingContext2d,
    doc: &DocStore,
    ui: &UiState,
    box_size: Size,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, box_size.width, box_size.height);

    let Some(scale) = BoxScale::capture(Rect::new(0.0, 0.0, box_size.width, box_size.height)) else {
        return Ok(());
    };
    let Some(el) = ui.selected_id.and_then(|id| doc.get(&id)) else {
        return Ok(());
    };

    let rect = scale.rect_to_physical(el.rect());
    draw_selection_box(ctx, rect, el.locked)?;
    if !el.locked {
        draw_handles(ctx, rect);
    }
    draw_readout(ctx, rect, el)
}

fn draw_selection_box(ctx: &CanvasRenderingContext2d, rect: Rect, locked: bool) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(if locked { LOCKED_COLOR } else { SELECTION_COLOR });
    ctx.set_line_width(1.0);
    let dash_array = js_sys::Array::new();
    dash_array.push(&SELECTION_DASH_PX.into());
    dash_array.push(&SELECTION_DASH_PX.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

fn draw_handles(ctx: &CanvasRenderingContext2d, rect: Rect) {
    let half = HANDLE_SIZE_PX * 0.5;
    ctx.save();
    ctx.set_fill_style_str("#fff");
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(1.0);
    for anchor in ResizeAnchor::ALL {
        let pos = anchor.position(rect);
        ctx.fill_rect(pos.x - half, pos.y - half, HANDLE_SIZE_PX, HANDLE_SIZE_PX);
        ctx.stroke_rect(pos.x - half, pos.y - half, HANDLE_SIZE_PX, HANDLE_SIZE_PX);
    }
    ctx.restore();
}

fn draw_readout(ctx: &CanvasRenderingContext2d, rect: Rect, el: &Element) -> Result<(), JsValue> {
    let label = readout_label(el);
    ctx.save();
    ctx.set_font(&format!("{READOUT_FONT_PX:.0}px sans-serif"));
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");
    let width = ctx.measure_text(&label)?.width();
    let x = rect.x;
    let y = rect.bottom() + READOUT_GAP_PX;
    ctx.set_fill_style_str("rgba(31, 26, 23, 0.75)");
    ctx.fill_rect(x, y, width + 8.0, READOUT_FONT_PX + 6.0);
    ctx.set_fill_style_str("#fff");
    ctx.fill_text(&label, x + 4.0, y + 3.0)?;
    ctx.restore();
    Ok(())
}
