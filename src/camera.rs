//! Speed-coupled camera
//!
//! The camera tracks the rig's framing point and breathes with speed: the
//! faster the bike moves, the further the view zooms out. Zoom follows a
//! damped update each step and settles inside a configured band.

use glam::{Affine2, Vec2};

use crate::tuning::Tuning;

/// Derived camera state: world-space framing position (pixels) and the
/// current zoom factor.
#[derive(Debug, Clone, Copy)]
pub struct CameraState {
    pub position: Vec2,
    pub zoom: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl CameraState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the zoom one step toward its speed-dependent equilibrium and
    /// retarget the framing point.
    pub fn update(&mut self, framing: Vec2, speed: f32, tuning: &Tuning) {
        let next =
            tuning.zoom_decay * self.zoom - speed * tuning.zoom_speed_coeff + tuning.zoom_bias;
        self.zoom = next.clamp(tuning.zoom_min, tuning.zoom_max);
        self.position = framing;
    }

    /// Force a zoom level (editor / zoom-toggle collaborators).
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    /// World→screen transform: uniform zoom scale, then a translation that
    /// pins the framing point at the configured view offset.
    pub fn transform(&self, tuning: &Tuning) -> Affine2 {
        Affine2::from_scale_angle_translation(
            Vec2::splat(self.zoom),
            0.0,
            -self.position * self.zoom + tuning.view_offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_settles_high_when_standing_still() {
        let tuning = Tuning::default();
        let mut cam = CameraState::new();
        for _ in 0..400 {
            cam.update(Vec2::ZERO, 0.0, &tuning);
        }
        assert!((cam.zoom - tuning.zoom_max).abs() < 1e-3, "zoom {}", cam.zoom);
    }

    #[test]
    fn zoom_backs_off_with_speed_and_stays_in_band() {
        let tuning = Tuning::default();
        let mut slow = CameraState::new();
        let mut fast = CameraState::new();
        for _ in 0..400 {
            slow.update(Vec2::ZERO, 2.0, &tuning);
            fast.update(Vec2::ZERO, 12.0, &tuning);
        }
        assert!(fast.zoom < slow.zoom);
        for cam in [slow, fast] {
            assert!(cam.zoom >= tuning.zoom_min && cam.zoom <= tuning.zoom_max);
        }
    }

    #[test]
    fn transform_pins_framing_point_to_view_offset() {
        let tuning = Tuning::default();
        let mut cam = CameraState::new();
        cam.update(Vec2::new(500.0, 280.0), 0.0, &tuning);

        let t = cam.transform(&tuning);
        let on_screen = t.transform_point2(Vec2::new(500.0, 280.0));
        assert!((on_screen - tuning.view_offset).length() < 1e-3);
    }

    #[test]
    fn transform_scales_by_zoom() {
        let tuning = Tuning::default();
        let mut cam = CameraState::new();
        cam.set_zoom(0.5);

        let t = cam.transform(&tuning);
        let a = t.transform_point2(Vec2::new(0.0, 0.0));
        let b = t.transform_point2(Vec2::new(100.0, 0.0));
        assert!(((b - a).length() - 50.0).abs() < 1e-3);
    }
}
