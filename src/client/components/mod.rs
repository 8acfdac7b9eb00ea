use bevy::prelude::*;
use kinematics::{
    ActorIntent, AnimationParams, CameraAim, ColliderShape, FieldId, Locomotion, Replicated, TransientEffect,
};

/// The one actor this process drives
#[derive(Clone, Component, Copy, Default)]
pub struct Controlled;

#[derive(Clone, Component, Debug, Deref, DerefMut)]
pub struct Kinematics(pub Locomotion);

#[derive(Clone, Component, Copy, Debug, Default, Deref, DerefMut)]
pub struct Intent(pub ActorIntent);

/// Measured velocity of the last collision-resolved move
#[derive(Clone, Component, Copy, Debug, Default, Deref, DerefMut)]
pub struct Velocity(pub Vec3);

/// Collider geometry currently applied to the actor
#[derive(Clone, Component, Copy, Debug, Default, Deref, DerefMut)]
pub struct Collider(pub ColliderShape);

#[derive(Clone, Component, Debug, Deref, DerefMut)]
pub struct Crouch(pub Replicated<bool>);

impl Default for Crouch {
    fn default() -> Self {
        Self(Replicated::new(FieldId::Crouched, false))
    }
}

#[derive(Clone, Component, Debug, Deref, DerefMut)]
pub struct PlayerName(pub Replicated<String>);

impl Default for PlayerName {
    fn default() -> Self {
        Self(Replicated::new(FieldId::Name, String::new()))
    }
}

/// Crouch vignette channel, owned by the local actor
#[derive(Clone, Component, Copy, Debug, Default, Deref, DerefMut)]
pub struct Vignette(pub TransientEffect);

/// Named parameters handed to the animation sink
#[derive(Clone, Component, Copy, Debug, Default, Deref, DerefMut)]
pub struct Animation(pub AnimationParams);

/// Follow target the camera orbits
#[derive(Clone, Component, Copy, Debug, Default)]
pub struct CameraTarget {
    pub aim: CameraAim,
    /// Current downward offset of the follow point
    pub drop: f32,
}

/// Visual body of an actor, scaled to its collider
#[derive(Clone, Component, Copy, Deref)]
pub struct Body(pub Entity);

/// Screen-space label carrying an actor's name
#[derive(Clone, Component, Copy, Deref)]
pub struct Label(pub Entity);
