//! Per-frame locomotion of the controlled actor.
//!
//! The state machine lives in the `kinematics` crate; these systems feed it
//! from ECS components and apply what it produces. Order within a frame:
//! `tick` (ground check, vertical, crouch, blend, collide) in Update, then `flush`
//! in PostUpdate before the proposals are written to the wire.

use bevy::prelude::*;
use kinematics::{CrouchOutcome, FieldId, ReplicationChannel, TickContext, VerticalTransition};

use crate::{
    client::{components::*, resources::*},
    common::{
        components::Pose,
        message::{Component, Event, *},
    },
};

#[allow(clippy::type_complexity)]
pub fn tick(
    time: Res<Time>,
    geometry: Res<Geometry>,
    camera: Query<&CameraTarget>,
    mut query: Query<(
        &mut Kinematics,
        &mut Intent,
        &mut Crouch,
        &mut Vignette,
        &mut Velocity,
        &mut Collider,
        &mut Animation,
        &mut Transform,
    ), With<Controlled>>,
) {
    let dt = time.delta_secs();
    let camera_yaw = camera.single().map(|target| target.aim.yaw).unwrap_or_default();

    for (mut kinematics, mut intent, mut crouch, mut vignette, mut velocity, mut collider, mut animation, mut transform) in &mut query {
        let crouched = *crouch.local();
        let position = transform.translation;
        let out = kinematics.tick(&mut intent, &mut crouch, &mut vignette, TickContext {
            world: &*geometry,
            position,
            velocity: **velocity,
            camera_yaw,
            dt,
        });

        match out.vertical {
            Some(VerticalTransition::Jumped) => debug!("jumped"),
            Some(VerticalTransition::Fell) => debug!("free fall"),
            None => {}
        }
        if let Some(CrouchOutcome::Rejected(reason)) = out.crouch {
            debug!("crouch toggle rejected: {reason:?}");
        }

        // optimistic: the predicted shape applies as soon as the prediction changes
        if *crouch.local() != crouched {
            **collider = out.collider;
        }

        let mask = kinematics.config.collision_layers;
        transform.translation = geometry.move_and_collide(position, out.displacement, &collider, mask);
        transform.rotation = Quat::from_rotation_y(out.facing_yaw.to_radians());
        if dt > 0. {
            **velocity = (transform.translation - position) / dt;
        }
        **animation = out.animation;
    }
}

/// Outbound replication channel for one actor, turned into `Try` messages
struct Outbox<'a, 'w> {
    ent: Entity,
    writer: &'a mut EventWriter<'w, Try>,
}

impl Outbox<'_, '_> {
    fn write(&mut self, component: Component) {
        self.writer.write(Try { event: Event::Incremental { ent: self.ent, component } });
    }
}

impl ReplicationChannel<bool> for Outbox<'_, '_> {
    fn send(&mut self, field: FieldId, value: bool) {
        match field {
            FieldId::Crouched => self.write(Component::Crouched(value)),
            _ => warn!("{field:?} is not a bool field"),
        }
    }
}

impl ReplicationChannel<String> for Outbox<'_, '_> {
    fn send(&mut self, field: FieldId, value: String) {
        match field {
            FieldId::Name => self.write(Component::Name(value)),
            _ => warn!("{field:?} is not a string field"),
        }
    }
}

/// Hand pending proposals to the network
pub fn flush(
    mut writer: EventWriter<Try>,
    mut query: Query<(Entity, &mut Crouch, &mut PlayerName), With<Controlled>>,
) {
    for (ent, mut crouch, mut name) in &mut query {
        let mut outbox = Outbox { ent, writer: &mut writer };
        crouch.flush(&mut outbox);
        name.flush(&mut outbox);
    }
}

/// Relay the controlled actor's pose whenever it moves
pub fn try_pose(
    mut writer: EventWriter<Try>,
    mut last: Local<Option<Pose>>,
    query: Query<(Entity, &Transform), With<Controlled>>,
) {
    let Ok((ent, transform)) = query.single() else { return };
    let pose = Pose::from(transform);
    if last.is_some_and(|last| !last.moved(&pose)) { return; }
    *last = Some(pose);
    writer.write(Try { event: Event::Incremental { ent, component: Component::Pose(pose) } });
}
