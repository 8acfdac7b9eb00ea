//! Crouch vignette
//!
//! The controlled actor owns the transition (`Vignette`); this plugin ticks it
//! and hands the value to the camera's `VignetteSettings`, which a screen
//! overlay renders as a darkened frame.

use bevy::prelude::*;

use crate::client::components::{Controlled, Vignette};

/// Plugin that drives and draws the vignette effect
pub struct VignettePlugin;

impl Plugin for VignettePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_overlay);
        app.add_systems(Update, (update_vignette_intensity, draw_overlay).chain());
    }
}

/// Settings for vignette effect (attached to camera)
#[derive(Component, Clone, Copy, Default)]
pub struct VignetteSettings {
    /// Intensity of the vignette effect (0.0 = none, 1.0 = full)
    pub intensity: f32,
    /// Seconds since startup when last written
    pub time: f32,
}

#[derive(Component)]
struct VignetteOverlay;

fn setup_overlay(mut commands: Commands) {
    commands.spawn((
        Node {
            width: Val::Percent(100.),
            height: Val::Percent(100.),
            position_type: PositionType::Absolute,
            border: UiRect::all(Val::VMin(14.)),
            ..default()
        },
        BorderColor(Color::NONE),
        VignetteOverlay,
    ));
}

/// Advance the controlled actor's vignette transition and publish it
fn update_vignette_intensity(
    mut vignette_query: Query<&mut VignetteSettings>,
    mut player_query: Query<&mut Vignette, With<Controlled>>,
    time: Res<Time>,
) {
    let Ok(mut effect) = player_query.single_mut() else {
        return;
    };

    let intensity = effect.tick(time.delta_secs());
    for mut settings in &mut vignette_query {
        settings.intensity = intensity;
        settings.time = time.elapsed_secs();
    }
}

fn draw_overlay(
    settings: Query<&VignetteSettings, Changed<VignetteSettings>>,
    mut overlay: Query<&mut BorderColor, With<VignetteOverlay>>,
) {
    let Ok(settings) = settings.single() else { return };
    for mut color in &mut overlay {
        color.0 = Color::BLACK.with_alpha((settings.intensity * 2.).min(1.));
    }
}
