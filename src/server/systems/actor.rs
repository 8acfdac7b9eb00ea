use bevy::prelude::*;

use crate::{
    common::{
        components::Pose,
        message::{Component, Event, *},
    },
    server::components::*,
};

/// Store proposed values and confirm them to everyone, at most once per change
pub fn try_incremental(
    mut reader: EventReader<Try>,
    mut writer: EventWriter<Do>,
    mut query: Query<(&mut Crouched, &mut DisplayName, &mut Pose)>,
) {
    for message in reader.read() {
        let Try { event: Event::Incremental { ent, component } } = message else { continue };
        let Ok((mut crouched, mut name, mut pose)) = query.get_mut(*ent) else { continue };
        let changed = match component {
            &Component::Crouched(value) => {
                let changed = **crouched != value;
                **crouched = value;
                changed
            }
            Component::Name(value) => {
                let changed = **name != *value;
                if changed {
                    debug!("{ent} is now {value}");
                    **name = value.clone();
                }
                changed
            }
            // poses are relayed as they come, the owner is trusted
            &Component::Pose(value) => {
                *pose = value;
                true
            }
        };
        if changed {
            writer.write(Do { event: Event::Incremental { ent: *ent, component: component.clone() }});
        }
    }
}
