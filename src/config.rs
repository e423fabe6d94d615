//! Simulation configuration
//!
//! Host-tunable parameters, separate from the physics constants in
//! [`crate::consts`]. Parsed from JSON so the hosting tool can ship a config
//! file next to the binary.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Logical canvas width used for wall bounds, pixels
    pub width: f32,
    /// Logical canvas height used for wall bounds, pixels
    pub height: f32,
    /// Soft population cap; replenishment stops here, explicit adds stop at
    /// twice this
    pub max_bubbles: usize,
    /// Bubbles added per celebration trigger
    pub celebration_bubbles: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: consts::CANVAS_WIDTH,
            height: consts::CANVAS_HEIGHT,
            max_bubbles: consts::DEFAULT_MAX_BUBBLES,
            celebration_bubbles: consts::CELEBRATION_BUBBLES,
        }
    }
}

impl SimConfig {
    /// Parse a config from JSON; missing fields fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
