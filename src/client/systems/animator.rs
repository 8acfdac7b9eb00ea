use bevy::prelude::*;

use crate::{
    client::components::*,
    common::components::Actor,
};

/// Remote actors have no local state machine; drive what their sink needs
/// from replicated state.
pub fn update_remote(
    mut query: Query<(&Crouch, &mut Animation), (With<Actor>, Without<Controlled>)>,
) {
    for (crouch, mut animation) in &mut query {
        let crouched = *crouch.confirmed();
        if animation.crouched != crouched || !animation.grounded {
            animation.crouched = crouched;
            animation.grounded = true;
        }
    }
}
