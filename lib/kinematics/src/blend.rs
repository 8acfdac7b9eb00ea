//! Horizontal speed, facing and animation drive values.
//!
//! The physical speed may snap inside the deadband; the animation values
//! never do, they are always lerped.

use glam::{Quat, Vec3};

use crate::{
    config::LocomotionConfig,
    intent::ActorIntent,
    smooth::{lerp, round3},
    state::KinematicState,
};

/// Tolerance between measured and target speed inside which speed snaps
pub const SPEED_OFFSET: f32 = 0.1;

/// Speed the actor is trying to reach, before analog scaling
pub fn target_speed(intent: &ActorIntent, sprint_allowed: bool, config: &LocomotionConfig) -> f32 {
    if !intent.is_moving() { return 0.; }
    if intent.sprint && !intent.aim && sprint_allowed { config.sprint_speed } else { config.move_speed }
}

/// Horizontal speed for this tick given the measured horizontal speed
pub fn blend_speed(
    measured: f32,
    target: f32,
    input_magnitude: f32,
    dt: f32,
    config: &LocomotionConfig,
) -> f32 {
    if measured < target - SPEED_OFFSET || measured > target + SPEED_OFFSET {
        // curved rather than linear change, rounded so the animator isn't fed float noise
        round3(lerp(measured, target * input_magnitude, dt * config.speed_change_rate))
    } else {
        target
    }
}

/// Unit direction on the ground plane for a yaw in degrees, 0 = +Z
pub fn yaw_direction(yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw.to_radians()) * Vec3::Z
}

/// Advance speed, facing and animation values, returning this tick's
/// displacement before collision.
///
/// `velocity` is the actor's measured velocity from the previous move.
pub fn step(
    state: &mut KinematicState,
    intent: &ActorIntent,
    sprint_allowed: bool,
    velocity: Vec3,
    camera_yaw: f32,
    dt: f32,
    config: &LocomotionConfig,
) -> Vec3 {
    let target = target_speed(intent, sprint_allowed, config);
    let measured = Vec3::new(velocity.x, 0., velocity.z).length();
    let rate = dt * config.speed_change_rate;

    state.current_speed = blend_speed(measured, target, intent.input_magnitude(), dt, config);
    state.anim_speed = lerp(state.anim_speed, target, rate);
    state.anim_speed_x = lerp(state.anim_speed_x, target * intent.move_input.x, rate);
    state.anim_speed_z = lerp(state.anim_speed_z, target * intent.move_input.y, rate);

    if intent.is_moving() {
        let input = intent.move_input.normalize();
        state.target_rotation = input.x.atan2(input.y).to_degrees() + camera_yaw;
        // facing belongs to the aim logic while aiming
        if !intent.aim {
            let yaw = state.facing.damp_angle_toward(state.target_rotation, config.rotation_smooth_time, dt);
            state.facing.value = yaw.rem_euclid(360.);
        }
    }

    yaw_direction(state.target_rotation) * (state.current_speed * dt)
        + Vec3::Y * (state.vertical_velocity * dt)
}

/// Aim animation layer weight, eased toward fully on or off
pub fn step_aim_layer(state: &mut KinematicState, aim: bool, dt: f32, config: &LocomotionConfig) {
    let target = if aim { 1. } else { 0. };
    state.aim_layer_weight = lerp(state.aim_layer_weight, target, dt * config.speed_change_rate);
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    const DT: f32 = 1. / 60.;

    fn moving(x: f32, y: f32) -> ActorIntent {
        ActorIntent { move_input: Vec2::new(x, y), ..Default::default() }
    }

    #[test]
    fn test_no_input_targets_zero() {
        let config = LocomotionConfig { move_speed: 7., sprint_speed: 11., ..Default::default() };
        assert_eq!(target_speed(&ActorIntent::default(), true, &config), 0.);
        let sprinting = ActorIntent { sprint: true, ..Default::default() };
        assert_eq!(target_speed(&sprinting, true, &config), 0.);
    }

    #[test]
    fn test_sprint_target() {
        let config = LocomotionConfig::default();
        let mut intent = moving(0., 1.);
        assert_eq!(target_speed(&intent, true, &config), config.move_speed);
        intent.sprint = true;
        assert_eq!(target_speed(&intent, true, &config), config.sprint_speed);
        intent.aim = true;
        assert_eq!(target_speed(&intent, true, &config), config.move_speed, "No sprinting while aiming");
        intent.aim = false;
        assert_eq!(target_speed(&intent, false, &config), config.move_speed, "No sprinting without room to stand");
    }

    #[test]
    fn test_speed_snaps_inside_deadband() {
        let config = LocomotionConfig::default();
        assert_eq!(blend_speed(2.0, 2.05, 1., DT, &config), 2.05);
    }

    #[test]
    fn test_speed_lerps_outside_deadband() {
        let config = LocomotionConfig::default();
        let speed = blend_speed(0., 2., 1., DT, &config);
        assert!(speed > 0. && speed < 2., "Should accelerate gradually, got {speed}");
        assert_eq!(speed, round3(speed), "Speed should be rounded to 3 decimals");
    }

    #[test]
    fn test_speed_scaled_by_analog_magnitude() {
        let config = LocomotionConfig::default();
        let full = blend_speed(0., 2., 1., 0.05, &config);
        let half = blend_speed(0., 2., 0.5, 0.05, &config);
        assert!((half - full / 2.).abs() <= 0.001);
    }

    #[test]
    fn test_animation_values_always_lerp() {
        let config = LocomotionConfig::default();
        let mut state = KinematicState::default();
        // already moving at target speed so physical speed snaps
        let velocity = Vec3::new(0., 0., 2.);
        step(&mut state, &moving(0., 1.), true, velocity, 0., DT, &config);

        assert_eq!(state.current_speed, 2.);
        assert!(state.anim_speed > 0. && state.anim_speed < 2., "Anim speed should ease in, got {}", state.anim_speed);
        assert_eq!(state.anim_speed_x, 0.);
        assert!(state.anim_speed_z > 0.);
    }

    #[test]
    fn test_facing_relative_to_camera() {
        let config = LocomotionConfig::default();
        let mut state = KinematicState::default();
        for _ in 0..120 {
            step(&mut state, &moving(1., 0.), true, Vec3::ZERO, 90., DT, &config);
        }
        assert!((state.target_rotation - 180.).abs() < 1e-4);
        assert!((state.facing_yaw() - 180.).abs() < 0.5, "Facing should settle on 180, got {}", state.facing_yaw());
    }

    #[test]
    fn test_aiming_suppresses_facing() {
        let config = LocomotionConfig::default();
        let mut state = KinematicState::default();
        let intent = ActorIntent { aim: true, ..moving(1., 0.) };
        step(&mut state, &intent, true, Vec3::ZERO, 0., DT, &config);
        assert_eq!(state.facing, Default::default());
        assert!((state.target_rotation - 90.).abs() < 1e-4, "Movement direction still follows input");
    }

    #[test]
    fn test_displacement_combines_horizontal_and_vertical() {
        let config = LocomotionConfig::default();
        let mut state = KinematicState { vertical_velocity: -2., ..Default::default() };
        let displacement = step(&mut state, &moving(0., 1.), true, Vec3::new(0., 0., 2.), 0., 0.5, &config);
        assert!((displacement - Vec3::new(0., -1., 1.)).length() < 1e-5, "Got {displacement}");
    }

    #[test]
    fn test_keeps_last_direction_without_input() {
        let config = LocomotionConfig::default();
        let mut state = KinematicState::default();
        step(&mut state, &moving(-1., 0.), true, Vec3::ZERO, 0., DT, &config);
        let rotation = state.target_rotation;
        step(&mut state, &ActorIntent::default(), true, Vec3::new(-1., 0., 0.), 0., DT, &config);
        assert_eq!(state.target_rotation, rotation);
    }

    #[test]
    fn test_aim_layer_eases() {
        let config = LocomotionConfig::default();
        let mut state = KinematicState::default();
        step_aim_layer(&mut state, true, 0.05, &config);
        assert!((state.aim_layer_weight - 0.5).abs() < 1e-6);
        step_aim_layer(&mut state, false, 1., &config);
        assert_eq!(state.aim_layer_weight, 0.);
    }
}
