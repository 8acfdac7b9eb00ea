use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collision::{ColliderShape, LayerMask};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tuning for a single locally controlled actor. Immutable once the actor is built.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// m/s
    pub move_speed: f32,
    /// m/s
    pub sprint_speed: f32,
    /// How long facing takes to catch up with the movement direction
    pub rotation_smooth_time: f32,
    /// Acceleration/deceleration rate, also drives every animation lerp
    pub speed_change_rate: f32,

    pub jump_height: f32,
    /// Must be negative
    pub gravity: f32,
    pub terminal_velocity: f32,
    /// Seconds on the ground before another jump is allowed
    pub jump_timeout: f32,
    /// Seconds airborne before entering free fall, lets stairs be walked down
    pub fall_timeout: f32,

    pub grounded_offset: f32,
    pub grounded_radius: f32,
    pub ground_layers: LayerMask,

    pub standing: ColliderShape,
    pub crouch_height: f32,
    pub crouch_center: Vec3,
    /// Skin kept between the stand-up check and nearby geometry
    pub contact_offset: f32,
    /// Layers that block standing up
    pub collision_layers: LayerMask,
    /// Camera follow point drop while crouched
    pub crouch_camera_drop: f32,

    pub vignette_intensity: f32,
    pub vignette_transition_duration: f32,

    pub camera: CameraConfig,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            sprint_speed: 5.335,
            rotation_smooth_time: 0.12,
            speed_change_rate: 10.0,
            jump_height: 1.2,
            gravity: -15.0,
            terminal_velocity: 53.0,
            jump_timeout: 0.5,
            fall_timeout: 0.15,
            grounded_offset: -0.14,
            grounded_radius: 0.28,
            ground_layers: LayerMask::ALL,
            standing: ColliderShape::default(),
            crouch_height: 1.05,
            crouch_center: Vec3::new(0., 0.54, 0.),
            contact_offset: 0.01,
            collision_layers: LayerMask::ALL,
            crouch_camera_drop: 0.6,
            vignette_intensity: 0.25,
            vignette_transition_duration: 0.5,
            camera: CameraConfig::default(),
        }
    }
}

impl LocomotionConfig {
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_ron(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity >= 0. {
            return Err(ConfigError::Invalid(format!("gravity must be negative, got {}", self.gravity)));
        }
        if self.jump_height < 0. {
            return Err(ConfigError::Invalid(format!("jump_height must not be negative, got {}", self.jump_height)));
        }
        for (name, value) in [
            ("rotation_smooth_time", self.rotation_smooth_time),
            ("speed_change_rate", self.speed_change_rate),
            ("jump_timeout", self.jump_timeout),
            ("fall_timeout", self.fall_timeout),
            ("vignette_transition_duration", self.vignette_transition_duration),
        ] {
            if value <= 0. {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.crouch_height > self.standing.height {
            return Err(ConfigError::Invalid(format!(
                "crouch_height {} exceeds standing height {}", self.crouch_height, self.standing.height)));
        }
        // both shapes are capsules, so neither may be shorter than its two end caps
        if self.crouch_height < self.standing.radius * 2. {
            return Err(ConfigError::Invalid(format!(
                "crouch_height {} is shorter than the collider's diameter {}", self.crouch_height, self.standing.radius * 2.)));
        }
        if self.contact_offset >= self.standing.radius {
            return Err(ConfigError::Invalid("contact_offset must be smaller than the collider radius".into()));
        }
        if self.camera.bottom_clamp > self.camera.top_clamp {
            return Err(ConfigError::Invalid(format!(
                "camera bottom_clamp {} above top_clamp {}", self.camera.bottom_clamp, self.camera.top_clamp)));
        }
        Ok(())
    }

    /// Collider for the given crouch value, keeping the standing radius
    pub fn collider(&self, crouched: bool) -> ColliderShape {
        if crouched {
            ColliderShape { height: self.crouch_height, center: self.crouch_center, ..self.standing }
        } else {
            self.standing
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Degrees the camera can look up
    pub top_clamp: f32,
    /// Degrees the camera can look down
    pub bottom_clamp: f32,
    /// Extra pitch, useful for fine tuning when locked
    pub angle_override: f32,
    pub locked: bool,
    /// Squared look magnitude below which input is ignored
    pub look_threshold: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            top_clamp: 70.,
            bottom_clamp: -30.,
            angle_override: 0.,
            locked: false,
            look_threshold: 0.01,
        }
    }
}
