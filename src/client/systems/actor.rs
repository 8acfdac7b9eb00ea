use bevy::prelude::*;
use kinematics::{Locomotion, TransientEffect};
use rand::Rng;

use crate::{
    client::components::{*, Label},
    common::{
        components::{Actor, Pose},
        message::{Component, Event, *},
        resources::*,
    },
};

#[derive(Resource)]
pub struct ActorAssets {
    pub body: Handle<Mesh>,
    pub local: Handle<StandardMaterial>,
    pub remote: Handle<StandardMaterial>,
}

pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
) {
    let standing = settings.standing;
    commands.insert_resource(ActorAssets {
        body: meshes.add(Capsule3d::new(standing.radius, standing.height - standing.radius * 2.)),
        local: materials.add(Color::srgb(0.3, 0.5, 0.9)),
        remote: materials.add(Color::srgb(0.9, 0.5, 0.3)),
    });
}

pub fn random_name() -> String {
    format!("Player{}", rand::rng().random_range(100..1000))
}

/// Components every actor carries, local or remote
fn actor_bundle(settings: &Settings, pose: Pose) -> impl Bundle {
    (
        Actor,
        Crouch::default(),
        PlayerName::default(),
        Collider(settings.standing),
        Animation::default(),
        pose,
        Transform::from_translation(pose.translation).with_rotation(pose.rotation()),
        Visibility::default(),
    )
}

fn spawn_body(commands: &mut Commands, ent: Entity, assets: &ActorAssets, material: &Handle<StandardMaterial>) {
    let body = commands.spawn((
        Mesh3d(assets.body.clone()),
        MeshMaterial3d(material.clone()),
        Transform::default(),
    )).id();
    let label = commands.spawn((
        Text::default(),
        TextFont { font_size: 14., ..default() },
        Node { position_type: PositionType::Absolute, ..default() },
        Visibility::Hidden,
    )).id();
    commands.entity(ent).add_child(body).insert((Body(body), Label(label)));
}

/// The server handed us our actor: make it controllable and name it
pub fn do_init(
    mut commands: Commands,
    mut reader: EventReader<Do>,
    settings: Res<Settings>,
    assets: Res<ActorAssets>,
) {
    for message in reader.read() {
        let &Do { event: Event::Init { ent } } = message else { continue };
        let config = settings.0.clone();
        let vignette = Vignette(TransientEffect::new(0., config.vignette_transition_duration));
        let mut name = PlayerName::default();
        name.propose(random_name());
        info!("playing as {}", name.local());

        commands.entity(ent).insert(actor_bundle(&settings, Pose::default())).insert((
            name,
            Controlled,
            Kinematics(Locomotion::new(config)),
            Intent::default(),
            Velocity::default(),
            vignette,
        ));
        spawn_body(&mut commands, ent, &assets, &assets.local);
    }
}

pub fn do_spawn(
    mut commands: Commands,
    mut reader: EventReader<Do>,
    settings: Res<Settings>,
    assets: Res<ActorAssets>,
    query: Query<(), With<Controlled>>,
) {
    for message in reader.read() {
        let &Do { event: Event::Spawn { ent, pose } } = message else { continue };
        if query.contains(ent) { continue; }
        debug!("spawn remote actor {ent} at {}", pose.translation);
        commands.entity(ent).insert(actor_bundle(&settings, pose));
        spawn_body(&mut commands, ent, &assets, &assets.remote);
    }
}

/// Apply change notifications from the server to every replica, ours included
#[allow(clippy::type_complexity)]
pub fn do_incremental(
    mut reader: EventReader<Do>,
    settings: Res<Settings>,
    mut query: Query<(&mut Crouch, &mut PlayerName, &mut Collider, &mut Pose, Has<Controlled>)>,
) {
    for message in reader.read() {
        let Do { event: Event::Incremental { ent, component } } = message else { continue };
        let Ok((mut crouch, mut name, mut collider, mut pose, controlled)) = query.get_mut(*ent) else { continue };
        if let Some(field) = component.field() {
            debug!("confirmed {field:?} for {ent}: {component:?}");
        }
        match component {
            &Component::Crouched(new) => {
                let old = *crouch.confirmed();
                // the collider follows the authority even if our prediction has moved on
                if crouch.confirm(old, new) {
                    **collider = settings.collider(new);
                }
            }
            Component::Name(new) => {
                let old = name.confirmed().clone();
                name.confirm(old, new.clone());
            }
            &Component::Pose(new) => {
                if !controlled { *pose = new; }
            }
        }
    }
}

pub fn do_despawn(
    mut commands: Commands,
    mut reader: EventReader<Do>,
    query: Query<&Label>,
) {
    for message in reader.read() {
        let &Do { event: Event::Despawn { ent } } = message else { continue };
        if let Ok(label) = query.get(ent) {
            commands.entity(**label).despawn();
        }
        commands.entity(ent).despawn();
    }
}

/// Ease remote actors toward their last relayed pose
pub fn update_remote(
    time: Res<Time>,
    mut query: Query<(&Pose, &mut Transform), (With<Actor>, Without<Controlled>)>,
) {
    let t = 1. - 0.001_f32.powf(time.delta_secs());
    for (pose, mut transform) in &mut query {
        if transform.translation.distance_squared(pose.translation) > 25. {
            transform.translation = pose.translation;
        } else {
            transform.translation = transform.translation.lerp(pose.translation, t);
        }
        transform.rotation = transform.rotation.slerp(pose.rotation(), t);
    }
}

/// Keep each actor's visible body matched to its applied collider
pub fn apply_collider(
    settings: Res<Settings>,
    query: Query<(&Collider, &Body), Changed<Collider>>,
    mut bodies: Query<&mut Transform, Without<Actor>>,
) {
    for (collider, &body) in &query {
        let Ok(mut transform) = bodies.get_mut(*body) else { continue };
        transform.translation = Vec3::Y * collider.height / 2.;
        transform.scale = Vec3::new(1., collider.height / settings.standing.height, 1.);
    }
}

#[cfg(test)]
mod tests {
    use kinematics::LocomotionConfig;

    use super::*;

    fn setup_test_app() -> App {
        let mut app = App::new();
        app.add_event::<Do>();
        app.init_resource::<Settings>();
        app.add_systems(Update, do_incremental);
        app
    }

    fn spawn_replica(app: &mut App) -> Entity {
        let settings = Settings::default();
        app.world_mut().spawn(actor_bundle(&settings, Pose::default())).id()
    }

    fn send(app: &mut App, ent: Entity, component: Component) {
        app.world_mut().send_event(Do { event: Event::Incremental { ent, component } });
        app.update();
    }

    #[test]
    fn test_random_name_format() {
        for _ in 0..100 {
            let name = random_name();
            let number: u32 = name.strip_prefix("Player").unwrap().parse().unwrap();
            assert!((100..1000).contains(&number), "Got {name}");
        }
    }

    #[test]
    fn test_confirmation_applies_collider_once() {
        let mut app = setup_test_app();
        let ent = spawn_replica(&mut app);
        let config = LocomotionConfig::default();

        send(&mut app, ent, Component::Crouched(true));
        assert_eq!(**app.world().get::<Collider>(ent).unwrap(), config.collider(true));
        assert!(*app.world().get::<Crouch>(ent).unwrap().confirmed());

        // a duplicate must not touch the applied geometry again
        app.world_mut().get_mut::<Collider>(ent).unwrap().height = 1.23;
        send(&mut app, ent, Component::Crouched(true));
        assert_eq!(app.world().get::<Collider>(ent).unwrap().height, 1.23);
    }

    #[test]
    fn test_confirmation_overrides_prediction() {
        let mut app = setup_test_app();
        let ent = spawn_replica(&mut app);
        app.world_mut().entity_mut(ent).insert(Controlled);
        let config = LocomotionConfig::default();

        // crouch went out, then we predicted standing back up before it landed
        app.world_mut().get_mut::<Crouch>(ent).unwrap().propose(true);
        app.world_mut().get_mut::<Crouch>(ent).unwrap().propose(false);
        send(&mut app, ent, Component::Crouched(true));
        assert!(!*app.world().get::<Crouch>(ent).unwrap().local(), "Confirmation leaves the prediction alone");
        assert_eq!(**app.world().get::<Collider>(ent).unwrap(), config.collider(true));

        send(&mut app, ent, Component::Crouched(false));
        assert_eq!(**app.world().get::<Collider>(ent).unwrap(), config.standing);
    }

    #[test]
    fn test_name_and_pose_replicated() {
        let mut app = setup_test_app();
        let ent = spawn_replica(&mut app);
        let pose = Pose { translation: Vec3::X, yaw: 90. };

        send(&mut app, ent, Component::Name("Player777".into()));
        send(&mut app, ent, Component::Pose(pose));

        assert_eq!(app.world().get::<PlayerName>(ent).unwrap().confirmed(), "Player777");
        assert_eq!(*app.world().get::<Pose>(ent).unwrap(), pose);
    }

    #[test]
    fn test_own_pose_echo_ignored() {
        let mut app = setup_test_app();
        let ent = spawn_replica(&mut app);
        app.world_mut().entity_mut(ent).insert(Controlled);

        send(&mut app, ent, Component::Pose(Pose { translation: Vec3::X, yaw: 0. }));
        assert_eq!(*app.world().get::<Pose>(ent).unwrap(), Pose::default());
    }
}
