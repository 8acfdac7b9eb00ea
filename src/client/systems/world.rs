use bevy::prelude::*;

use crate::client::resources::*;

pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    geometry: Res<Geometry>,
) {
    commands.spawn((
        DirectionalLight { shadows_enabled: true, ..default() },
        Transform::from_xyz(4., 10., 2.).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let material = materials.add(Color::srgb(0.45, 0.5, 0.45));
    for block in geometry.blocks.iter().filter(|block| !block.trigger) {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(block.size()))),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(block.center()),
        ));
    }
}
