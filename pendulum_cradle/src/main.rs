mod components;
mod error;
mod impulse;
mod pendulum;
mod resources;
mod state;
mod ui;

use pendulum::*;
use resources::*;
use state::*;
use ui::*;

use bevy::prelude::*;
use bevy_inspector_egui::quick::ResourceInspectorPlugin;
use bevy_prototype_debug_lines::DebugLinesPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Pendulum".to_string(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::rgb(0.05, 0.05, 0.1)))
        .add_plugin(StatePlugin)
        .add_plugin(PendulumPlugin)
        .add_plugin(UiPlugin)
        .add_plugin(ResourceInspectorPlugin::<PendulumSettings>::default())
        .add_plugin(ResourceInspectorPlugin::<SimulationConfig>::default())
        .add_plugin(DebugLinesPlugin::default())
        .add_startup_system(setup)
        .run();
}

fn setup(mut commands: Commands, settings: Res<PendulumSettings>) {
    let target = settings.origin - Vec3::Y * settings.string_length * 0.5;
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(target + Vec3::new(0.0, 0.15, 1.4))
                .looking_at(target, Vec3::Y),
            ..default()
        },
        Name::new("Camera"),
    ));

    // light
    commands.spawn((
        DirectionalLightBundle {
            transform: Transform::from_xyz(2.0, 4.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
            directional_light: DirectionalLight {
                shadows_enabled: true,
                ..default()
            },
            ..default()
        },
        Name::new("Light"),
    ));

    info!("Press 'Start' or 'I' to swing the first pendulum");
    info!("Press 'R' to reset");
    info!("Press 'Space' to pause");
    info!("Press 'F1' to toggle joint lines");
}
