//! simulation settings, loaded from an optional JSON file.
//! every field has a default, so `{}` is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::circuit::wire::HIT_TOLERANCE;
use crate::error::CircuitError;
use crate::transforms::WSSize;

/// viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        ViewportSize {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl From<ViewportSize> for WSSize {
    fn from(v: ViewportSize) -> Self {
        WSSize::new(v.width, v.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// pin hover radius at scale 1.0
    pub pin_hover_radius: f32,
    /// slack for the approximate on-wire test
    pub wire_tolerance: f32,
    pub grid_size: f32,
    /// snap newly placed components to the grid
    pub snap_to_grid: bool,
    /// viewport the uniform component scale is measured against
    pub initial_viewport: ViewportSize,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            pin_hover_radius: 10.0,
            wire_tolerance: HIT_TOLERANCE,
            grid_size: 32.0,
            snap_to_grid: true,
            initial_viewport: ViewportSize::default(),
            min_zoom: 0.5,
            max_zoom: 2.0,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(s: &str) -> Result<Self, CircuitError> {
        let config: SimConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CircuitError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&s)?;
        tracing::info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CircuitError> {
        let positive = [
            ("pin_hover_radius", self.pin_hover_radius),
            ("wire_tolerance", self.wire_tolerance),
            ("grid_size", self.grid_size),
            ("initial_viewport.width", self.initial_viewport.width),
            ("initial_viewport.height", self.initial_viewport.height),
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(CircuitError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {v}"
                )));
            }
        }
        if self.min_zoom > self.max_zoom {
            return Err(CircuitError::InvalidConfig(format!(
                "min_zoom ({}) exceeds max_zoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SimConfig::from_json_str("{}").unwrap(), SimConfig::default());
    }

    #[test]
    fn partial_override() {
        let c = SimConfig::from_json_str(
            r#"{"grid_size": 16, "snap_to_grid": false, "initial_viewport": {"width": 1024, "height": 768}}"#,
        )
        .unwrap();
        assert_eq!(c.grid_size, 16.0);
        assert!(!c.snap_to_grid);
        assert_eq!(WSSize::from(c.initial_viewport), WSSize::new(1024.0, 768.0));
        assert_eq!(c.pin_hover_radius, 10.0);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            SimConfig::from_json_str(r#"{"grid_size": 0}"#),
            Err(CircuitError::InvalidConfig(_))
        ));
        assert!(matches!(
            SimConfig::from_json_str(r#"{"min_zoom": 3.0, "max_zoom": 2.0}"#),
            Err(CircuitError::InvalidConfig(_))
        ));
        assert!(matches!(
            SimConfig::from_json_str("not json"),
            Err(CircuitError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            SimConfig::load("/definitely/not/here.json"),
            Err(CircuitError::Io(_))
        ));
    }
}
