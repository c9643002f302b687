use bevy::prelude::*;

use crate::{
    components::PendulumBall,
    resources::{PendulumSettings, Pendulums},
};

/// One-shot change of linear momentum for a ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplyImpulse {
    pub target: Entity,
    pub impulse: Vec3,
}

impl ApplyImpulse {
    /// Impulse that starts the first pendulum of the row, if there is one.
    pub fn first_pendulum(pendulums: &Pendulums, settings: &PendulumSettings) -> Option<Self> {
        pendulums.list.first().map(|p| Self {
            target: p.ball,
            impulse: settings.impulse_power(),
        })
    }
}

pub fn apply_impulses(
    mut events: EventReader<ApplyImpulse>,
    mut balls: Query<&mut PendulumBall>,
) {
    for event in events.iter() {
        match balls.get_mut(event.target) {
            Ok(mut ball) => {
                ball.apply_impulse(event.impulse);
                info!("Impulse {:?} applied to {:?}", event.impulse, event.target);
            }
            Err(e) => warn!("Dropping impulse for {:?}: {}", event.target, e),
        }
    }
}

pub fn impulse_key_listen(
    keys: Res<Input<KeyCode>>,
    pendulums: Res<Pendulums>,
    settings: Res<PendulumSettings>,
    mut events: EventWriter<ApplyImpulse>,
) {
    if keys.just_pressed(KeyCode::I) {
        if let Some(impulse) = ApplyImpulse::first_pendulum(&pendulums, &settings) {
            events.send(impulse);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::PendulumEntities;

    fn app() -> App {
        let mut app = App::new();
        app.add_event::<ApplyImpulse>().add_system(apply_impulses);
        app
    }

    #[test]
    fn impulse_reaches_target_ball() {
        let mut app = app();
        let ball = app
            .world
            .spawn(PendulumBall::new(0.04, 20.0, Vec3::ZERO))
            .id();
        let bystander = app
            .world
            .spawn(PendulumBall::new(0.04, 20.0, Vec3::ZERO))
            .id();

        app.world.resource_mut::<Events<ApplyImpulse>>().send(ApplyImpulse {
            target: ball,
            impulse: Vec3::new(-2.0, 0.0, 0.0),
        });
        app.update();

        let velocity = app.world.get::<PendulumBall>(ball).unwrap().velocity;
        assert!((velocity.x + 0.1).abs() < 1e-6);
        assert_eq!(
            app.world.get::<PendulumBall>(bystander).unwrap().velocity,
            Vec3::ZERO
        );
    }

    #[test]
    fn impulse_for_missing_entity_is_dropped() {
        let mut app = app();
        let survivor = app
            .world
            .spawn(PendulumBall::new(0.04, 20.0, Vec3::ZERO))
            .id();
        let gone = app.world.spawn(PendulumBall::default()).id();
        app.world.despawn(gone);

        app.world.resource_mut::<Events<ApplyImpulse>>().send(ApplyImpulse {
            target: gone,
            impulse: Vec3::X,
        });
        app.update();

        assert!(app.world.get_entity(gone).is_none());
        assert_eq!(
            app.world.get::<PendulumBall>(survivor).unwrap().velocity,
            Vec3::ZERO
        );
    }

    #[test]
    fn i_key_starts_first_pendulum() {
        let settings = PendulumSettings::default();
        let first = Entity::from_raw(3);
        let mut keys = Input::<KeyCode>::default();
        keys.press(KeyCode::I);

        let mut app = App::new();
        app.add_event::<ApplyImpulse>()
            .insert_resource(keys)
            .insert_resource(settings.clone())
            .insert_resource(Pendulums {
                list: vec![
                    PendulumEntities {
                        attachment: Entity::from_raw(1),
                        string: Entity::from_raw(2),
                        ball: first,
                    },
                    PendulumEntities {
                        attachment: Entity::from_raw(4),
                        string: Entity::from_raw(5),
                        ball: Entity::from_raw(6),
                    },
                ],
            })
            .add_system(impulse_key_listen);
        app.update();

        let events = app.world.resource::<Events<ApplyImpulse>>();
        let sent: Vec<ApplyImpulse> = events.get_reader().iter(events).copied().collect();
        assert_eq!(
            sent,
            vec![ApplyImpulse {
                target: first,
                impulse: settings.impulse_power(),
            }]
        );
    }

    #[test]
    fn first_pendulum_uses_settings_power() {
        let settings = PendulumSettings::default();
        assert_eq!(
            ApplyImpulse::first_pendulum(&Pendulums::default(), &settings),
            None
        );

        let e = Entity::from_raw(7);
        let pendulums = Pendulums {
            list: vec![PendulumEntities {
                attachment: Entity::from_raw(5),
                string: Entity::from_raw(6),
                ball: e,
            }],
        };
        let impulse = ApplyImpulse::first_pendulum(&pendulums, &settings).unwrap();
        assert_eq!(impulse.target, e);
        assert_eq!(impulse.impulse, settings.impulse_power());
    }
}
