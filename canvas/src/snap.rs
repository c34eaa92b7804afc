//! Grid snapping.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

/// Quantize `value` to the nearest multiple of `grid_step` when `enabled`.
///
/// A non-positive or non-finite step disables snapping.
#[must_use]
pub fn snap(value: f64, grid_step: f64, enabled: bool) -> f64 {
    if !enabled || !grid_step.is_finite() || grid_step <= 0.0 {
        return value;
    }
    (value / grid_step).round() * grid_step
}

/// The grid policy in effect for one mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    pub step: f64,
    pub enabled: bool,
}

impl Snap {
    /// A policy that never changes its input.
    #[must_use]
    pub fn off() -> Self {
        Self { step: 1.0, enabled: false }
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        snap(value, self.step, self.enabled)
    }
}
