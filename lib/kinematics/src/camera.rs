use glam::{EulerRot, Quat, Vec2};
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;

/// Wrap once into [-360, 360] then clamp
pub fn clamp_angle(mut angle: f32, min: f32, max: f32) -> f32 {
    if angle < -360. { angle += 360.; }
    if angle > 360. { angle -= 360.; }
    angle.clamp(min, max)
}

/// Yaw/pitch of the third person camera follow target, in degrees
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct CameraAim {
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraAim {
    pub fn new(yaw: f32) -> Self {
        Self { yaw, pitch: 0. }
    }

    /// Accumulate look input scaled by `dt`
    pub fn update(&mut self, look: Vec2, dt: f32, config: &CameraConfig) {
        if look.length_squared() >= config.look_threshold && !config.locked {
            self.yaw += look.x * dt;
            self.pitch += look.y * dt;
        }

        self.yaw = clamp_angle(self.yaw, f32::MIN, f32::MAX);
        self.pitch = clamp_angle(self.pitch, config.bottom_clamp, config.top_clamp);
    }

    /// Orientation for the follow target: (pitch + override, yaw, 0)
    pub fn rotation(&self, config: &CameraConfig) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw.to_radians(),
            (self.pitch + config.angle_override).to_radians(),
            0.,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_angle_wraps_then_clamps() {
        assert_eq!(clamp_angle(370., f32::MIN, f32::MAX), 10.);
        assert_eq!(clamp_angle(-370., f32::MIN, f32::MAX), -10.);
        assert_eq!(clamp_angle(100., -30., 70.), 70.);
        assert_eq!(clamp_angle(-50., -30., 70.), -30.);
    }

    #[test]
    fn test_small_look_ignored() {
        let config = CameraConfig::default();
        let mut aim = CameraAim::default();
        aim.update(Vec2::new(0.05, 0.05), 1., &config);
        assert_eq!(aim, CameraAim::default());
    }

    #[test]
    fn test_locked_camera_ignores_look() {
        let config = CameraConfig { locked: true, ..Default::default() };
        let mut aim = CameraAim::default();
        aim.update(Vec2::new(100., 100.), 1., &config);
        assert_eq!(aim, CameraAim::default());
    }

    #[test]
    fn test_pitch_clamped_yaw_free() {
        let config = CameraConfig::default();
        let mut aim = CameraAim::default();
        for _ in 0..10 {
            aim.update(Vec2::new(100., 100.), 0.5, &config);
        }
        assert_eq!(aim.pitch, config.top_clamp);
        assert!((-360. ..=360.).contains(&aim.yaw), "Yaw should stay wrapped, got {}", aim.yaw);
    }

    #[test]
    fn test_yaw_accumulates() {
        let config = CameraConfig::default();
        let mut aim = CameraAim::default();
        aim.update(Vec2::new(90., 0.), 0.5, &config);
        assert_eq!(aim.yaw, 45.);
    }

    #[test]
    fn test_rotation_applies_override() {
        let config = CameraConfig { angle_override: 10., ..Default::default() };
        let aim = CameraAim { yaw: 0., pitch: 20. };
        let (_, pitch, _) = aim.rotation(&config).to_euler(EulerRot::YXZ);
        assert!((pitch.to_degrees() - 30.).abs() < 1e-3);
    }
}
