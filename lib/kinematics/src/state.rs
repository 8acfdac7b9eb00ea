use serde::{Deserialize, Serialize};

use crate::{config::LocomotionConfig, smooth::SmoothDamped};

/// Mutable per-tick state of a locally controlled actor
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct KinematicState {
    pub grounded: bool,
    pub vertical_velocity: f32,
    /// Commanded horizontal speed this tick (m/s)
    pub current_speed: f32,
    pub anim_speed: f32,
    pub anim_speed_x: f32,
    pub anim_speed_z: f32,
    /// Actor yaw in degrees with its smoothing velocity
    pub facing: SmoothDamped,
    /// Last movement direction in degrees; movement continues along it with no input
    pub target_rotation: f32,
    /// Ready to jump once this reaches zero or below
    pub jump_timeout_remaining: f32,
    pub fall_timeout_remaining: f32,
    /// Set while the jump animation should play
    pub jumping: bool,
    /// Latched once per airborne episode when the fall timeout runs out
    pub free_fall: bool,
    pub aim_layer_weight: f32,
}

impl KinematicState {
    pub fn new(config: &LocomotionConfig) -> Self {
        Self {
            grounded: true,
            jump_timeout_remaining: config.jump_timeout,
            fall_timeout_remaining: config.fall_timeout,
            ..Default::default()
        }
    }

    pub fn facing_yaw(&self) -> f32 {
        self.facing.value
    }
}
