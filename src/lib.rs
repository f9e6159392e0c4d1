//! Moto Trial - a motorcycle trial course simulation core
//!
//! Core modules:
//! - `physics`: Rapier2D world wrapper (bodies, joints, contact events, tags)
//! - `rig`: the articulated motorcycle + rider and its lifecycle
//! - `contact`: contact-pair classification into game outcomes
//! - `obstacle`: placeable course elements (ground, ramp, spikes, finish)
//! - `course`: the colon-delimited course file format
//! - `controller`: the fixed-timestep course loop
//! - `camera`: speed-coupled zoom and the world→screen transform
//! - `control`: tilt-device / keyboard input contract
//! - `tuning`: data-driven simulation balance

pub mod camera;
pub mod contact;
pub mod control;
pub mod controller;
pub mod course;
pub mod obstacle;
pub mod physics;
pub mod rig;
pub mod tuning;

pub use camera::CameraState;
pub use contact::{ContactClassifier, Outcome, RigPhase};
pub use control::{ControlInput, ControlSignal, KeyState};
pub use controller::CourseController;
pub use course::{CourseDef, CourseError};
pub use obstacle::{Obstacle, ObstacleKind};
pub use physics::{BodyKind, BodyTag, PhysicsError, PhysicsWorld};
pub use rig::{ArticulatedRig, LeanDirection, RigState, RigTelemetry};
pub use tuning::Tuning;

use glam::Vec2;

/// Simulation constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Screen pixels per physics meter
    pub const PIXELS_PER_METER: f32 = 85.33;

    /// Default rig spawn origin when a course defines none
    pub const DEFAULT_ORIGIN: Vec2 = Vec2::new(250.0, 80.0);
}

/// Convert screen pixels to physics meters
#[inline]
pub fn px_to_meters(px: f32) -> f32 {
    px / consts::PIXELS_PER_METER
}

/// Convert physics meters to screen pixels
#[inline]
pub fn meters_to_px(m: f32) -> f32 {
    m * consts::PIXELS_PER_METER
}

/// Pixel-space vector to meters
#[inline]
pub fn vec_to_meters(v: Vec2) -> Vec2 {
    v / consts::PIXELS_PER_METER
}
