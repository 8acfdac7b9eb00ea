use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Polled player intent for one tick.
///
/// `jump` and `crouch` are edges: set by input when pressed, cleared by the
/// state machine that reads them.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ActorIntent {
    /// Camera relative, y = forward, x = left (toward increasing yaw)
    pub move_input: Vec2,
    pub look: Vec2,
    pub sprint: bool,
    pub aim: bool,
    pub jump: bool,
    pub crouch: bool,
    /// Report stick magnitude instead of full intensity
    pub analog_movement: bool,
}

impl ActorIntent {
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump)
    }

    pub fn take_crouch(&mut self) -> bool {
        std::mem::take(&mut self.crouch)
    }

    pub fn is_moving(&self) -> bool {
        self.move_input != Vec2::ZERO
    }

    /// Speed scale for the current move input, 1 unless analog
    pub fn input_magnitude(&self) -> f32 {
        if self.analog_movement { self.move_input.length() } else { 1. }
    }
}
