//! Editor configuration supplied by the host.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_GRID_STEP;
use crate::error::{CanvasError, CanvasResult};
use crate::snap::Snap;

/// Grid settings for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid spacing in canonical units. Must be positive.
    pub grid_step: u32,
    /// Whether positions (and dragged resize edges) snap to the grid.
    pub snap_enabled: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { grid_step: DEFAULT_GRID_STEP, snap_enabled: false }
    }
}

impl EditorConfig {
    /// Parse and validate a config from the host's JSON settings.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Decode`] for malformed JSON and
    /// [`CanvasError::InvalidGridStep`] for a zero grid step.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`CanvasError::InvalidGridStep`] when `grid_step` is zero.
    pub fn validate(&self) -> CanvasResult<()> {
        if self.grid_step == 0 {
            return Err(CanvasError::InvalidGridStep(self.grid_step));
        }
        Ok(())
    }

    /// The snap policy this config implies.
    #[must_use]
    pub fn snap(&self) -> Snap {
        Snap { step: f64::from(self.grid_step), enabled: self.snap_enabled }
    }

    /// Grid step as a canonical distance.
    #[must_use]
    pub fn grid_step_units(&self) -> f64 {
        f64::from(self.grid_step)
    }
}
