//! Per-tick driver for a locally controlled actor.
//!
//! Runs the pieces in a fixed order: ground check, vertical motion, crouch,
//! then speed/facing blending. Moving the actor through the world, flushing
//! replication and the camera are left to the host, which runs them after
//! [`Locomotion::tick`] in that order.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    blend,
    collision::{self, ColliderShape, CollisionQuery},
    config::LocomotionConfig,
    crouch::{self, CrouchOutcome},
    effect::TransientEffect,
    intent::ActorIntent,
    replicated::Replicated,
    state::KinematicState,
    vertical::{self, VerticalTransition},
};

/// Named parameters for the animation sink
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct AnimationParams {
    pub speed: f32,
    pub speed_x: f32,
    pub speed_z: f32,
    pub motion_speed: f32,
    pub grounded: bool,
    pub jump: bool,
    pub free_fall: bool,
    pub crouched: bool,
    pub aim_layer_weight: f32,
}

pub struct TickContext<'a, W> {
    pub world: &'a W,
    /// Feet position before this tick's move
    pub position: Vec3,
    /// Measured velocity of the previous move
    pub velocity: Vec3,
    pub camera_yaw: f32,
    pub dt: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutput {
    /// Desired move before collision
    pub displacement: Vec3,
    pub facing_yaw: f32,
    /// Collider from the local prediction
    pub collider: ColliderShape,
    pub vertical: Option<VerticalTransition>,
    pub crouch: Option<CrouchOutcome>,
    pub animation: AnimationParams,
}

#[derive(Clone, Debug)]
pub struct Locomotion {
    pub config: LocomotionConfig,
    pub state: KinematicState,
}

impl Locomotion {
    pub fn new(config: LocomotionConfig) -> Self {
        let state = KinematicState::new(&config);
        Self { config, state }
    }

    /// Advance one tick.
    ///
    /// The crouch record and vignette belong to the actor, not to this
    /// driver; they are handed in so that remote replicas and tests can own
    /// them independently.
    pub fn tick<W: CollisionQuery>(
        &mut self,
        intent: &mut ActorIntent,
        crouched: &mut Replicated<bool>,
        vignette: &mut TransientEffect,
        ctx: TickContext<W>,
    ) -> TickOutput {
        let config = &self.config;
        let state = &mut self.state;
        let can_stand_up = || collision::can_stand_up(
            ctx.world, ctx.position, config.standing, config.contact_offset, config.collision_layers);

        state.grounded = collision::is_grounded(
            ctx.world, ctx.position, config.grounded_radius, config.grounded_offset, config.ground_layers);

        let vertical = vertical::step(state, intent.take_jump(), ctx.dt, config);
        if vertical.is_some() {
            crouch::reset_player_state(crouched, vignette);
        }

        // a jump this tick leaves the ground even though the ground check still touches it
        let grounded = state.grounded && vertical != Some(VerticalTransition::Jumped);
        let crouch = intent.take_crouch()
            .then(|| crouch::toggle(crouched, vignette, grounded, can_stand_up, config));

        let sprint_allowed = crouch::sprint_allowed(*crouched.local(), can_stand_up);
        if intent.sprint && !intent.aim && sprint_allowed && *crouched.local() {
            crouch::reset_player_state(crouched, vignette);
        }

        blend::step_aim_layer(state, intent.aim, ctx.dt, config);
        let displacement = blend::step(state, intent, sprint_allowed, ctx.velocity, ctx.camera_yaw, ctx.dt, config);

        TickOutput {
            displacement,
            facing_yaw: state.facing_yaw(),
            collider: crouch::predicted_collider(crouched, config),
            vertical,
            crouch,
            animation: AnimationParams {
                speed: state.anim_speed,
                speed_x: state.anim_speed_x,
                speed_z: state.anim_speed_z,
                motion_speed: intent.input_magnitude(),
                grounded: state.grounded,
                jump: state.jumping,
                free_fall: state.free_fall,
                crouched: *crouched.local(),
                aim_layer_weight: state.aim_layer_weight,
            },
        }
    }
}
