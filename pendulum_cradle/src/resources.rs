use bevy::prelude::*;
use bevy_inspector_egui::{prelude::ReflectInspectorOptions, InspectorOptions};

use crate::error::SettingsError;

/// The settings for a pendulum setup, including the number of pendulums to create,
/// and the size of each component.
#[derive(Reflect, Resource, InspectorOptions, Clone, Debug)]
#[reflect(Resource, InspectorOptions)]
pub struct PendulumSettings {
    /// The radius of the ball in the pendulum.
    #[inspector(min = 0.005, max = 0.5)]
    pub ball_radius: f32,
    /// The mass of the ball in the pendulum.
    #[inspector(min = 0.1, max = 100.0)]
    pub ball_mass: f32,
    pub ball_color: Color,
    /// Distance from the pivot to the centre of the ball.
    #[inspector(min = 0.05, max = 2.0)]
    pub string_length: f32,
    pub string_radius: f32,
    pub string_color: Color,
    pub attachment_size: Vec3,
    pub attachment_color: Color,
    #[inspector(min = 1, max = 20)]
    pub pendulum_count: u32,
    /// The speed of the simulation. Use a value between `0.5` and `1.5`.
    #[inspector(min = 0.5, max = 1.5)]
    pub pendulum_speed: f32,
    /// Pivot of the centre of the row.
    pub origin: Vec3,
}

impl Default for PendulumSettings {
    fn default() -> Self {
        Self {
            ball_radius: 0.04,
            ball_mass: 20.0,
            ball_color: Color::WHITE,
            string_length: 0.65,
            string_radius: 0.001,
            string_color: Color::rgba(0.2, 0.2, 0.2, 1.0),
            attachment_size: Vec3::new(0.2, 0.025, 0.2),
            attachment_color: Color::rgba(0.75, 0.88, 0.75, 1.0),
            pendulum_count: 5,
            pendulum_speed: 0.5,
            origin: Vec3::new(0.0, 0.8, 0.0),
        }
    }
}

impl PendulumSettings {
    /// The impulse to apply to a ball, based on the simulation speed.
    pub fn impulse_power(&self) -> Vec3 {
        debug_assert!(self.pendulum_speed > 0.0);
        Vec3::new(-2.0 / self.pendulum_speed.powi(4), 0.0, 0.0)
    }

    /// Pendulums hang side by side along +X, one ball diameter apart, centred on `origin`.
    pub fn pivot(&self, index: u32) -> Vec3 {
        let spacing = self.ball_radius * 2.0;
        let centre = (self.pendulum_count.max(1) - 1) as f32 * 0.5;
        self.origin + Vec3::X * (index as f32 - centre) * spacing
    }

    pub fn ball_rest_position(&self, index: u32) -> Vec3 {
        self.pivot(index) - Vec3::Y * self.string_length
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("ball radius", self.ball_radius),
            ("ball mass", self.ball_mass),
            ("string length", self.string_length),
            ("pendulum speed", self.pendulum_speed),
        ] {
            if !(value > 0.0) {
                return Err(SettingsError::NotPositive { name, value });
            }
        }
        if self.pendulum_count == 0 {
            return Err(SettingsError::NoPendulums);
        }
        Ok(())
    }
}

#[derive(Reflect, Resource, InspectorOptions, Clone, Debug)]
#[reflect(Resource, InspectorOptions)]
pub struct SimulationConfig {
    #[inspector(min = 1, max = 500)]
    pub sub_steps: u32,
    pub gravity: Vec3,
    #[inspector(min = 0.0, max = 5.0)]
    pub linear_damping: f32,
    #[inspector(min = 0.0, max = 1.0)]
    pub restitution: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sub_steps: 40,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            linear_damping: 0.02,
            restitution: 0.98,
        }
    }
}

/// One entry per spawned pendulum, in row order.
#[derive(Reflect, Resource, Default)]
#[reflect(Resource)]
pub struct Pendulums {
    pub list: Vec<PendulumEntities>,
}

#[derive(Reflect, FromReflect, Clone, Copy, Debug, PartialEq)]
pub struct PendulumEntities {
    pub attachment: Entity,
    pub string: Entity,
    pub ball: Entity,
}
