use bevy::prelude::*;

use crate::{error::JointError, resources::SimulationConfig};

/// Static body the string hangs from.
#[derive(Reflect, Component, Default)]
#[reflect(Component)]
pub struct Attachment;

/// Visual string, stretched every frame between `pivot` and `ball`.
#[derive(Reflect, Component)]
#[reflect(Component)]
pub struct PendulumString {
    pub ball: Entity,
    pub pivot: Vec3,
    /// Length of the mesh the string was built with.
    pub mesh_length: f32,
}

impl Default for PendulumString {
    fn default() -> Self {
        Self {
            ball: Entity::from_raw(u32::MAX),
            pivot: Vec3::ZERO,
            mesh_length: 1.0,
        }
    }
}

impl PendulumString {
    /// Transform of the Y-aligned string mesh stretched from the pivot to `ball_pos`.
    pub fn span(&self, ball_pos: Vec3) -> Transform {
        let arm = ball_pos - self.pivot;
        let length = arm.length();
        let rotation = match arm.try_normalize() {
            Some(dir) => Quat::from_rotation_arc(Vec3::NEG_Y, dir),
            None => Quat::IDENTITY,
        };
        let stretch = if self.mesh_length > 0.0 {
            length / self.mesh_length
        } else {
            1.0
        };
        Transform {
            translation: self.pivot + arm * 0.5,
            rotation,
            scale: Vec3::new(1.0, stretch, 1.0),
        }
    }
}

#[derive(Reflect, Component, Default, Clone, Debug)]
#[reflect(Component)]
pub struct PendulumBall {
    pub radius: f32,
    pub mass: f32,
    pub prev_pos: Vec3,
    pub velocity: Vec3,
}

impl PendulumBall {
    pub fn new(radius: f32, mass: f32, position: Vec3) -> Self {
        Self {
            radius,
            mass,
            prev_pos: position,
            velocity: Vec3::ZERO,
        }
    }

    pub fn inverse_mass(&self) -> f32 {
        if self.mass > 0.0 {
            1.0 / self.mass
        } else {
            0.0
        }
    }

    pub fn start_step(&mut self, transform: &mut Transform, dt: f32, config: &SimulationConfig) {
        self.velocity += config.gravity * dt;
        self.velocity *= 1.0 / (1.0 + config.linear_damping * dt);
        self.prev_pos = transform.translation;
        transform.translation += self.velocity * dt;
    }

    pub fn end_step(&mut self, transform: &Transform, dt: f32) {
        if dt > 0.0 {
            self.velocity = (transform.translation - self.prev_pos) / dt;
        }
    }

    /// Instant change of linear momentum.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * self.inverse_mass();
    }
}

/// Revolute joint between a static attachment and a ball. Only rotation about `axis`
/// through `pivot` is allowed.
#[derive(Reflect, Component, Clone, Debug)]
#[reflect(Component)]
pub struct HingeJoint {
    pub anchor: Entity,
    pub pivot: Vec3,
    pub axis: Vec3,
    pub length: f32,
}

impl Default for HingeJoint {
    fn default() -> Self {
        Self {
            anchor: Entity::from_raw(u32::MAX),
            pivot: Vec3::ZERO,
            axis: Vec3::Z,
            length: 0.0,
        }
    }
}

impl HingeJoint {
    const EPSILON: f32 = 1e-5;

    pub fn new(
        anchor: Entity,
        pivot: Vec3,
        ball_position: Vec3,
        axis: Vec3,
    ) -> Result<Self, JointError> {
        let axis_n = axis.try_normalize().ok_or(JointError::DegenerateAxis(axis))?;
        let arm = ball_position - pivot;
        let length = arm.length();
        if length < Self::EPSILON {
            return Err(JointError::ZeroLength(ball_position));
        }
        if arm.dot(axis_n).abs() > Self::EPSILON * length.max(1.0) {
            return Err(JointError::OffAxis { arm, axis });
        }

        Ok(Self {
            anchor,
            pivot,
            axis: axis_n,
            length,
        })
    }

    /// Moves the ball back onto the swing circle. The anchor is static so it takes
    /// none of the correction.
    pub fn solve(&self, transform: &mut Transform) {
        let mut arm = transform.translation - self.pivot;
        arm -= self.axis * arm.dot(self.axis);

        let d = arm.length();
        if d < Self::EPSILON {
            return;
        }
        transform.translation = self.pivot + arm * (self.length / d);
    }
}

/// Separates two overlapping balls and exchanges their normal velocities.
pub fn handle_ball_collision(
    ball_a: &mut PendulumBall,
    trans_a: &mut Transform,
    ball_b: &mut PendulumBall,
    trans_b: &mut Transform,
    restitution: f32,
) -> bool {
    let mut dir = trans_b.translation - trans_a.translation;
    let d = dir.length();
    if d == 0.0 || d > ball_a.radius + ball_b.radius {
        return false;
    }

    dir /= d;
    let corr = (ball_a.radius + ball_b.radius - d) * 0.5;
    trans_a.translation -= dir * corr;
    trans_b.translation += dir * corr;

    let v1 = ball_a.velocity.dot(dir);
    let v2 = ball_b.velocity.dot(dir);

    // only resolve approaching contacts, resting neighbours stay put
    if v1 - v2 <= 0.0 {
        return true;
    }

    let m1 = ball_a.mass;
    let m2 = ball_b.mass;

    let new_v1 = (m1 * v1 + m2 * v2 - m2 * (v1 - v2) * restitution) / (m1 + m2);
    let new_v2 = (m1 * v1 + m2 * v2 - m1 * (v2 - v1) * restitution) / (m1 + m2);

    ball_a.velocity += dir * (new_v1 - v1);
    ball_b.velocity += dir * (new_v2 - v2);
    true
}
