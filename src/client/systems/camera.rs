use bevy::prelude::*;
use kinematics::smooth::lerp;

use crate::{
    client::{components::*, plugins::vignette::VignetteSettings},
    common::resources::*,
};

/// Camera distance behind the follow point
const CAMERA_DISTANCE: f32 = 4.0;
/// Follow point height above the feet while standing
const FOLLOW_HEIGHT: f32 = 1.375;

pub fn setup(
    mut commands: Commands,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0., FOLLOW_HEIGHT, -CAMERA_DISTANCE).looking_at(Vec3::Y * FOLLOW_HEIGHT, Vec3::Y),
        CameraTarget::default(),
        VignetteSettings::default(),
    ));
}

/// Late update: aim from look input, then frame the controlled actor
pub fn update(
    time: Res<Time>,
    settings: Res<Settings>,
    mut camera: Query<(&mut CameraTarget, &mut Transform), Without<Controlled>>,
    actor: Query<(&Transform, &Intent, &Crouch), With<Controlled>>,
) {
    let Ok((a_transform, intent, crouch)) = actor.single() else { return };
    let Ok((mut target, mut c_transform)) = camera.single_mut() else { return };

    target.aim.update(intent.look, time.delta_secs(), &settings.camera);

    let drop = if *crouch.local() { settings.crouch_camera_drop } else { 0. };
    target.drop = lerp(target.drop, drop, time.delta_secs() * settings.speed_change_rate);

    let follow = a_transform.translation + Vec3::Y * (FOLLOW_HEIGHT - target.drop);
    let rotation = target.aim.rotation(&settings.camera);
    c_transform.translation = follow - rotation * Vec3::Z * CAMERA_DISTANCE;
    c_transform.look_at(follow, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn setup_test_app() -> App {
        let mut app = App::new();
        app.init_resource::<Time>();
        app.init_resource::<Settings>();
        app.add_systems(Startup, setup);
        app.add_systems(Update, update);
        app
    }

    fn camera(app: &mut App) -> (CameraTarget, Transform) {
        let mut query = app.world_mut().query::<(&CameraTarget, &Transform)>();
        let (&target, &transform) = query.single(app.world()).unwrap();
        (target, transform)
    }

    #[test]
    fn test_camera_sits_behind_actor() {
        let mut app = setup_test_app();
        app.world_mut().spawn((Controlled, Transform::default(), Intent::default(), Crouch::default()));
        app.update();

        let (_, transform) = camera(&mut app);
        assert!((transform.translation - Vec3::new(0., FOLLOW_HEIGHT, -CAMERA_DISTANCE)).length() < 1e-4,
            "Got {}", transform.translation);
        assert!(transform.forward().z > 0.99, "Should look along +Z, the actor's forward");
    }

    #[test]
    fn test_look_input_turns_and_clamps() {
        let mut app = setup_test_app();
        let intent = Intent(kinematics::ActorIntent { look: Vec2::new(60., 1000.), ..default() });
        app.world_mut().spawn((Controlled, Transform::default(), intent, Crouch::default()));
        app.world_mut().resource_mut::<Time>().advance_by(Duration::from_millis(500));
        app.update();

        let (target, _) = camera(&mut app);
        let config = Settings::default().camera;
        assert_eq!(target.aim.yaw, 30., "Look is a rate, scaled by frame time");
        assert_eq!(target.aim.pitch, config.top_clamp);
    }

    #[test]
    fn test_no_turn_without_elapsed_time() {
        let mut app = setup_test_app();
        let intent = Intent(kinematics::ActorIntent { look: Vec2::new(60., 10.), ..default() });
        app.world_mut().spawn((Controlled, Transform::default(), intent, Crouch::default()));
        app.update();

        let (target, _) = camera(&mut app);
        assert_eq!((target.aim.yaw, target.aim.pitch), (0., 0.));
    }

    #[test]
    fn test_follow_point_drops_while_crouched() {
        let mut app = setup_test_app();
        let mut crouch = Crouch::default();
        crouch.propose(true);
        app.world_mut().spawn((Controlled, Transform::default(), Intent::default(), crouch));
        for _ in 0..30 {
            app.world_mut().resource_mut::<Time>().advance_by(Duration::from_millis(50));
            app.update();
        }

        let (target, _) = camera(&mut app);
        let expected = Settings::default().crouch_camera_drop;
        assert!((target.drop - expected).abs() < 1e-3, "Drop should settle at {expected}, got {}", target.drop);
    }
}
