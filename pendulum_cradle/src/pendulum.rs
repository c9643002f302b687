use bevy::prelude::*;
use bevy_prototype_debug_lines::DebugLines;

use crate::{
    components::*,
    impulse::{apply_impulses, ApplyImpulse},
    resources::*,
    state::{AppState, DebugState},
};

/// Hinge axis of every pendulum, balls swing in the XY plane.
pub const HINGE_AXIS: Vec3 = Vec3::Z;

pub struct PendulumPlugin;

impl Plugin for PendulumPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendulumSettings>()
            .init_resource::<SimulationConfig>()
            .init_resource::<Pendulums>()
            .add_event::<ApplyImpulse>()
            .add_system(spawn_pendulums.in_schedule(OnEnter(AppState::Playing)))
            .add_system(apply_impulses.before(simulate))
            .add_system(simulate.in_set(OnUpdate(AppState::Playing)))
            .add_system(update_strings.after(simulate))
            .add_system(draw_joints.in_set(OnUpdate(DebugState::On)))
            .register_type::<PendulumSettings>()
            .register_type::<SimulationConfig>()
            .register_type::<Pendulums>()
            .register_type::<PendulumBall>()
            .register_type::<HingeJoint>()
            .register_type::<PendulumString>()
            .register_type::<Attachment>();
    }
}

pub fn spawn_pendulums(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<PendulumSettings>,
    mut pendulums: ResMut<Pendulums>,
) {
    // coming back from pause keeps the running row
    if !pendulums.list.is_empty() {
        return;
    }
    if let Err(e) = settings.validate() {
        error!("Not spawning pendulums: {}", e);
        return;
    }

    let attachment_mesh = meshes.add(Mesh::from(shape::Box::new(
        settings.attachment_size.x,
        settings.attachment_size.y,
        settings.attachment_size.z,
    )));
    let attachment_material = materials.add(StandardMaterial {
        base_color: settings.attachment_color,
        ..default()
    });
    let string_mesh = meshes.add(Mesh::from(shape::Capsule {
        radius: settings.string_radius,
        depth: settings.string_length,
        ..default()
    }));
    let string_material = materials.add(StandardMaterial {
        base_color: settings.string_color,
        ..default()
    });
    let ball_mesh = meshes.add(Mesh::from(shape::UVSphere {
        radius: settings.ball_radius,
        sectors: 32,
        stacks: 16,
    }));
    let ball_material = materials.add(StandardMaterial {
        base_color: settings.ball_color,
        metallic: 1.0,
        perceptual_roughness: 0.2,
        ..default()
    });

    for index in 0..settings.pendulum_count {
        let pivot = settings.pivot(index);
        let ball_pos = settings.ball_rest_position(index);

        let attachment = commands
            .spawn((
                PbrBundle {
                    mesh: attachment_mesh.clone(),
                    material: attachment_material.clone(),
                    transform: Transform::from_translation(
                        pivot + Vec3::Y * settings.attachment_size.y * 0.5,
                    ),
                    ..default()
                },
                Attachment,
                Name::new(format!("Attachment {}", index)),
            ))
            .id();

        let mut ball = commands.spawn((
            PbrBundle {
                mesh: ball_mesh.clone(),
                material: ball_material.clone(),
                transform: Transform::from_translation(ball_pos),
                ..default()
            },
            PendulumBall::new(settings.ball_radius, settings.ball_mass, ball_pos),
            Name::new(format!("Ball {}", index)),
        ));
        match HingeJoint::new(attachment, pivot, ball_pos, HINGE_AXIS) {
            Ok(joint) => {
                ball.insert(joint);
            }
            Err(e) => warn!("Pendulum {} has no joint: {}", index, e),
        }
        let ball = ball.id();

        let string_info = PendulumString {
            ball,
            pivot,
            mesh_length: settings.string_length,
        };
        let string = commands
            .spawn((
                PbrBundle {
                    mesh: string_mesh.clone(),
                    material: string_material.clone(),
                    transform: string_info.span(ball_pos),
                    ..default()
                },
                string_info,
                Name::new(format!("String {}", index)),
            ))
            .id();

        pendulums.list.push(PendulumEntities {
            attachment,
            string,
            ball,
        });
    }
    info!("Spawned {} pendulums", pendulums.list.len());
}

pub fn simulate(
    mut balls: Query<(&mut PendulumBall, &mut Transform, Option<&HingeJoint>)>,
    settings: Res<PendulumSettings>,
    config: Res<SimulationConfig>,
    time: Res<Time>,
) {
    let dt = time.delta_seconds() * settings.pendulum_speed;

    // zero time blows up
    if dt <= 0.0 {
        return;
    }

    let sub_steps = config.sub_steps.max(1);
    let sdt = dt / sub_steps as f32;

    for _ in 0..sub_steps {
        for (mut ball, mut transform, joint) in balls.iter_mut() {
            ball.start_step(&mut transform, sdt, &config);
            if let Some(joint) = joint {
                joint.solve(&mut transform);
            }
            ball.end_step(&transform, sdt);
        }

        let mut combinations = balls.iter_combinations_mut();
        while let Some([(mut ball_a, mut trans_a, _), (mut ball_b, mut trans_b, _)]) =
            combinations.fetch_next()
        {
            handle_ball_collision(
                &mut ball_a,
                &mut trans_a,
                &mut ball_b,
                &mut trans_b,
                config.restitution,
            );
        }
    }
}

pub fn update_strings(
    mut strings: Query<(&PendulumString, &mut Transform), Without<PendulumBall>>,
    balls: Query<&Transform, With<PendulumBall>>,
) {
    for (string, mut transform) in strings.iter_mut() {
        if let Ok(ball) = balls.get(string.ball) {
            *transform = string.span(ball.translation);
        }
    }
}

fn draw_joints(
    mut lines: ResMut<DebugLines>,
    balls: Query<(&Transform, &HingeJoint)>,
    attachments: Query<&Transform, With<Attachment>>,
    pendulums: Res<Pendulums>,
    mut last_pos: Local<Option<Vec3>>,
) {
    for (transform, joint) in balls.iter() {
        if let Ok(anchor) = attachments.get(joint.anchor) {
            lines.line_colored(anchor.translation, joint.pivot, 0.0, Color::GREEN);
        }
        lines.line_colored(joint.pivot, transform.translation, 0.0, Color::YELLOW);
        lines.line_colored(
            joint.pivot - joint.axis * 0.05,
            joint.pivot + joint.axis * 0.05,
            0.0,
            Color::BLUE,
        );
    }

    // trail of the first ball
    let Some(first) = pendulums.list.first() else {
        return;
    };
    if let Ok((transform, _)) = balls.get(first.ball) {
        if let Some(pos) = *last_pos {
            lines.line_colored(pos, transform.translation, 1.5, Color::RED);
        }
        *last_pos = Some(transform.translation);
    }
}
