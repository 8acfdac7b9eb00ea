//! Jump, gravity and fall timing.
//!
//! Modelled with two countdown timers rather than explicit states: the jump
//! timer runs while grounded, the fall timer while airborne, and each is reset
//! by the other phase.

use crate::{config::LocomotionConfig, state::KinematicState};

/// Downward bias kept while resting so the ground check stays in contact
pub const GROUNDED_VELOCITY: f32 = -2.;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerticalTransition {
    Jumped,
    /// Fall timeout expired, fires once per airborne episode
    Fell,
}

/// Advance vertical motion by `dt` seconds using `state.grounded` from the
/// ground check this tick.
///
/// `jump` is the already consumed jump edge; it is discarded while airborne.
pub fn step(
    state: &mut KinematicState,
    jump: bool,
    dt: f32,
    config: &LocomotionConfig,
) -> Option<VerticalTransition> {
    let transition = if state.grounded {
        apply_ground_contact(state, jump, dt, config)
    } else {
        apply_airborne(state, dt, config)
    };
    apply_gravity(state, dt, config);
    transition
}

pub fn apply_ground_contact(
    state: &mut KinematicState,
    jump: bool,
    dt: f32,
    config: &LocomotionConfig,
) -> Option<VerticalTransition> {
    state.fall_timeout_remaining = config.fall_timeout;
    state.free_fall = false;
    state.jumping = false;

    if state.vertical_velocity < 0. {
        state.vertical_velocity = GROUNDED_VELOCITY;
    }

    if jump && state.jump_timeout_remaining <= 0. {
        // v = sqrt(h * -2g) reaches exactly jump_height under constant gravity
        state.vertical_velocity = (config.jump_height * -2. * config.gravity).sqrt();
        state.jumping = true;
        log::trace!("jump, vertical velocity {}", state.vertical_velocity);
        return Some(VerticalTransition::Jumped);
    }

    if state.jump_timeout_remaining >= 0. {
        state.jump_timeout_remaining -= dt;
    }
    None
}

pub fn apply_airborne(
    state: &mut KinematicState,
    dt: f32,
    config: &LocomotionConfig,
) -> Option<VerticalTransition> {
    state.jump_timeout_remaining = config.jump_timeout;

    if state.free_fall { return None; }

    state.fall_timeout_remaining -= dt;
    if state.fall_timeout_remaining <= 0. {
        state.free_fall = true;
        log::trace!("free fall");
        return Some(VerticalTransition::Fell);
    }
    None
}

/// Explicit Euler step, never pushing velocity past terminal
pub fn apply_gravity(state: &mut KinematicState, dt: f32, config: &LocomotionConfig) {
    if state.vertical_velocity < config.terminal_velocity {
        state.vertical_velocity += config.gravity * dt;
    }
    state.vertical_velocity = state.vertical_velocity.min(config.terminal_velocity);
}
