use thiserror::Error;

/// Reasons a hinge joint cannot be created between an attachment and a ball.
#[derive(Debug, Error, PartialEq)]
pub enum JointError {
    /// The hinge axis has no direction.
    #[error("hinge axis {0:?} has zero length")]
    DegenerateAxis(bevy::math::Vec3),

    /// The ball sits on the pivot, so there is no arm to swing.
    #[error("ball at {0:?} coincides with the pivot")]
    ZeroLength(bevy::math::Vec3),

    /// The arm from pivot to ball is not perpendicular to the hinge axis.
    #[error("arm {arm:?} is not perpendicular to hinge axis {axis:?}")]
    OffAxis {
        arm: bevy::math::Vec3,
        axis: bevy::math::Vec3,
    },
}

/// Settings that cannot produce a working pendulum row.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("pendulum count must be at least one")]
    NoPendulums,
}
