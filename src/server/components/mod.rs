use bevy::prelude::*;

/// Stored crouch value, last write wins
#[derive(Clone, Component, Copy, Debug, Default, Deref, DerefMut, PartialEq)]
pub struct Crouched(pub bool);

#[derive(Clone, Component, Debug, Default, Deref, DerefMut, PartialEq)]
pub struct DisplayName(pub String);
