use bevy::prelude::*;

use crate::{
    impulse::{impulse_key_listen, ApplyImpulse},
    resources::{PendulumSettings, Pendulums},
};

const NORMAL_BUTTON: Color = Color::rgb(0.15, 0.15, 0.15);
const HOVERED_BUTTON: Color = Color::rgb(0.25, 0.25, 0.25);
const PRESSED_BUTTON: Color = Color::rgb(0.35, 0.75, 0.35);

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FontAssets>()
            .add_startup_system(setup)
            .add_system(impulse_button)
            .add_system(impulse_key_listen);
    }
}

#[derive(Resource)]
pub struct FontAssets {
    pub ui_font: Handle<Font>,
}

impl FromWorld for FontAssets {
    fn from_world(world: &mut World) -> Self {
        let asset_server = world.resource::<AssetServer>();
        let ui_font = asset_server.load("fonts/FiraSans-Bold.ttf");
        Self { ui_font }
    }
}

#[derive(Component)]
pub struct ImpulseButton;

fn setup(mut commands: Commands, fonts: Res<FontAssets>) {
    commands
        .spawn((
            NodeBundle {
                style: Style {
                    size: Size::new(Val::Percent(100.0), Val::Auto),
                    position_type: PositionType::Absolute,
                    position: UiRect {
                        bottom: Val::Px(20.0),
                        ..default()
                    },
                    justify_content: JustifyContent::Center,
                    ..default()
                },
                ..default()
            },
            Name::new("ui Bottom Bar"),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    ButtonBundle {
                        style: Style {
                            size: Size::new(Val::Px(150.0), Val::Px(50.0)),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        background_color: NORMAL_BUTTON.into(),
                        ..default()
                    },
                    ImpulseButton,
                    Name::new("ui Start Button"),
                ))
                .with_children(|parent| {
                    parent.spawn(TextBundle::from_section(
                        "Start",
                        TextStyle {
                            font: fonts.ui_font.clone(),
                            font_size: 30.0,
                            color: Color::rgb(0.9, 0.9, 0.9),
                        },
                    ));
                });
        });
}

fn impulse_button(
    mut interactions: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<ImpulseButton>),
    >,
    pendulums: Res<Pendulums>,
    settings: Res<PendulumSettings>,
    mut events: EventWriter<ApplyImpulse>,
) {
    for (interaction, mut color) in interactions.iter_mut() {
        *color = match *interaction {
            Interaction::Clicked => {
                match ApplyImpulse::first_pendulum(&pendulums, &settings) {
                    Some(impulse) => events.send(impulse),
                    None => warn!("No pendulum to start"),
                }
                PRESSED_BUTTON.into()
            }
            Interaction::Hovered => HOVERED_BUTTON.into(),
            Interaction::None => NORMAL_BUTTON.into(),
        };
    }
}
