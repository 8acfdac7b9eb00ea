use bevy::{input::mouse::AccumulatedMouseMotion, prelude::*};

use crate::client::components::*;

pub const KEYCODES_FORWARD: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ArrowUp];
pub const KEYCODES_BACK: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ArrowDown];
pub const KEYCODES_LEFT: [KeyCode; 2] = [KeyCode::KeyA, KeyCode::ArrowLeft];
pub const KEYCODES_RIGHT: [KeyCode; 2] = [KeyCode::KeyD, KeyCode::ArrowRight];
pub const KEYCODES_JUMP: [KeyCode; 1] = [KeyCode::Space];
pub const KEYCODES_CROUCH: [KeyCode; 2] = [KeyCode::KeyC, KeyCode::ControlLeft];
pub const KEYCODES_SPRINT: [KeyCode; 1] = [KeyCode::ShiftLeft];

/// Look rate per pixel of mouse motion, scaled by frame time in the camera (0.15°/px at 60 fps)
pub const MOUSE_SENSITIVITY: f32 = 9.0;

fn axis(keyboard: &ButtonInput<KeyCode>, positive: [KeyCode; 2], negative: [KeyCode; 2]) -> f32 {
    keyboard.any_pressed(positive) as i8 as f32 - keyboard.any_pressed(negative) as i8 as f32
}

/// Poll devices into the controlled actor's intent.
///
/// Edges are OR-ed in so that a press is not lost when several frames pass
/// before the locomotion tick consumes it.
pub fn update(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    mut query: Query<&mut Intent, With<Controlled>>,
) {
    keyboard.get_just_pressed().for_each(|key| { trace!("key pressed: {:?}", key) });
    let Ok(mut intent) = query.single_mut() else { return };

    intent.move_input = Vec2::new(
        axis(&keyboard, KEYCODES_LEFT, KEYCODES_RIGHT),
        axis(&keyboard, KEYCODES_FORWARD, KEYCODES_BACK),
    );
    // right-handed: turning right is decreasing yaw
    intent.look = Vec2::new(-motion.delta.x, motion.delta.y) * MOUSE_SENSITIVITY;
    intent.sprint = keyboard.any_pressed(KEYCODES_SPRINT);
    intent.aim = mouse.pressed(MouseButton::Right);
    intent.jump |= keyboard.any_just_pressed(KEYCODES_JUMP);
    intent.crouch |= keyboard.any_just_pressed(KEYCODES_CROUCH);
}
