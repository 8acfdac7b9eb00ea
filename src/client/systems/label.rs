use bevy::prelude::*;

use crate::{
    client::components::{*, Label},
    common::components::Actor,
};

/// Gap between the top of an actor's collider and its name
const LABEL_CLEARANCE: f32 = 0.3;

/// Pin each actor's name above its head in screen space.
///
/// The controlled actor's own label stays hidden, as does any label whose
/// name has not been confirmed yet or whose actor is off screen.
#[allow(clippy::type_complexity)]
pub fn update(
    camera: Query<(&Camera, &GlobalTransform), With<CameraTarget>>,
    actors: Query<(&GlobalTransform, &Collider, &PlayerName, &Label, Has<Controlled>), With<Actor>>,
    mut labels: Query<(&mut Text, &mut Node, &mut Visibility)>,
) {
    let Ok((camera, c_transform)) = camera.single() else { return };
    for (a_transform, collider, name, label, controlled) in &actors {
        let Ok((mut text, mut node, mut visibility)) = labels.get_mut(**label) else { continue };
        let head = a_transform.translation() + Vec3::Y * (collider.height + LABEL_CLEARANCE);
        let screen = camera.world_to_viewport(c_transform, head).ok()
            .filter(|_| !controlled && !name.confirmed().is_empty());
        let Some(screen) = screen else {
            visibility.set_if_neq(Visibility::Hidden);
            continue;
        };

        if text.0 != *name.confirmed() { text.0 = name.confirmed().clone(); }
        node.left = Val::Px(screen.x);
        node.top = Val::Px(screen.y);
        visibility.set_if_neq(Visibility::Inherited);
    }
}
