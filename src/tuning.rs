//! Data-driven simulation balance
//!
//! Every calibrated constant of the course loop lives here so builds can
//! rebalance without recompiling. Defaults reproduce the shipped feel;
//! a JSON file on disk overrides them, and a missing file is fine.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tunable simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward gravity, m/s² (Y-down world).
    pub gravity: f32,

    // === Motor & lean ===
    /// Torque bound on the rear-wheel drive motor.
    pub motor_max_torque: f32,
    /// Keyboard full-throttle target, used as `-full_speed`.
    pub full_motor_speed: f32,
    /// Weight-shift torque on the rider's torso.
    pub lean_torque_rider: f32,
    /// Weight-shift torque on the chassis.
    pub lean_torque_chassis: f32,

    // === Camera ===
    /// Zoom carried over per step (critically-damped decay).
    pub zoom_decay: f32,
    /// How strongly chassis speed pushes the zoom out.
    pub zoom_speed_coeff: f32,
    /// Constant zoom restoring term.
    pub zoom_bias: f32,
    pub zoom_min: f32,
    pub zoom_max: f32,
    /// Screen position the framing point is pinned to, pixels.
    pub view_offset: Vec2,

    // === Audio feedback ===
    /// Chassis angular speed → motor pitch, scale.
    pub motor_pitch_scale: f32,
    /// Chassis angular speed → motor pitch, bias.
    pub motor_pitch_bias: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 5.0,

            motor_max_torque: 2.0,
            full_motor_speed: 30.0,
            lean_torque_rider: 5.0,
            lean_torque_chassis: 50.0,

            zoom_decay: 0.96,
            zoom_speed_coeff: 0.003333,
            zoom_bias: 0.056,
            zoom_min: 0.4,
            zoom_max: 1.4,
            view_offset: Vec2::new(300.0, 350.0),

            motor_pitch_scale: 0.05,
            motor_pitch_bias: -1.0,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load tuning overrides from disk, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("loaded tuning overrides from {path:?}");
                    tuning
                }
                Err(e) => {
                    log::warn!("bad tuning file {path:?} ({e}), using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
