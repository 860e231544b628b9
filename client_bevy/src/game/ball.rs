use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;
use bevy_rapier2d::prelude::*;
use polybounce_shared::controls::jump_velocity;

use crate::constants::{color_from_hex, BALL_OUTLINE_WIDTH, Z_BALL};
use crate::coord::to_world;

use super::core::{GameSession, Settings};
use super::input::InputState;
use super::ring::{Ring, RingSegment};
use super::UpdateSet;

pub struct BallPlugin;

#[derive(Component)]
pub(crate) struct Ball {
    /// Current fill; takes the ring's color on every wall contact.
    pub(crate) color: u32,
    /// Ring segments currently touching the ball. Neighbouring capsules
    /// overlap at each vertex, so one contact can span two of them.
    touching: u32,
}

impl Ball {
    pub(crate) fn new(color: u32) -> Self {
        Self { color, touching: 0 }
    }
}

impl Plugin for BallPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_ball).add_systems(
            Update,
            (drive_ball_system, wall_contact_system)
                .chain()
                .in_set(UpdateSet::Logic),
        );
    }
}

fn spawn_ball(mut commands: Commands, settings: Res<Settings>) {
    let ball = &settings.config.ball;
    let radius = ball.radius as f32;
    let color = settings.palette.text();

    commands.spawn((
        // Physics
        RigidBody::Dynamic,
        Collider::ball(radius),
        Restitution::coefficient(ball.restitution as f32),
        Friction::coefficient(ball.friction as f32),
        ActiveEvents::COLLISION_EVENTS,
        Ccd::enabled(),
        Velocity::zero(),
        ReadMassProperties::default(),
        ExternalForce::default(),
        ExternalImpulse::default(),
        // Transform (shared by physics + visual)
        Transform::from_xyz(0.0, 0.0, Z_BALL),
        // Visual
        ShapeBuilder::with(&shapes::Circle {
            radius,
            center: Vec2::ZERO,
        })
        .fill(color_from_hex(color))
        .stroke((color_from_hex(settings.palette.panel()), BALL_OUTLINE_WIDTH))
        .build(),
        Ball::new(color),
        Name::new("ball"),
    ));
}

/// Held movement keys push the ball with a constant force; the jump key adds
/// a one-off upward velocity change. Both scale with mass.
fn drive_ball_system(
    input: Res<InputState>,
    settings: Res<Settings>,
    mut q_ball: Query<(&ReadMassProperties, &mut ExternalForce, &mut ExternalImpulse), With<Ball>>,
) {
    let cfg = &settings.config.ball;
    let acceleration = to_world(input.held.acceleration(cfg));

    for (mass_props, mut force, mut impulse) in &mut q_ball {
        let mass = mass_props.mass.max(0.0001);
        force.force = acceleration * mass;
        if input.jump_requested {
            impulse.impulse += to_world(jump_velocity(cfg)) * mass;
        }
    }
}

/// One point per contact: only the transition from touching no ring segment
/// to touching one scores and recolors the ball.
fn wall_contact_system(
    mut collision_events: MessageReader<CollisionEvent>,
    q_segments: Query<&RingSegment>,
    q_rings: Query<&Ring>,
    mut q_ball: Query<(&mut Ball, &mut Shape)>,
    mut session: ResMut<GameSession>,
) {
    for event in collision_events.read() {
        let (a, b, started) = match event {
            CollisionEvent::Started(a, b, _) => (*a, *b, true),
            CollisionEvent::Stopped(a, b, _) => (*a, *b, false),
        };
        let (ball_entity, other) = if q_ball.contains(a) {
            (a, b)
        } else if q_ball.contains(b) {
            (b, a)
        } else {
            continue;
        };
        let Ok(segment) = q_segments.get(other) else {
            continue;
        };
        let Ok((mut ball, mut shape)) = q_ball.get_mut(ball_entity) else {
            continue;
        };

        if !started {
            ball.touching = ball.touching.saturating_sub(1);
            continue;
        }
        ball.touching += 1;
        if ball.touching > 1 {
            continue;
        }

        let Ok(ring) = q_rings.get(segment.ring) else {
            continue;
        };
        ball.color = ring.color;
        if let Some(fill) = shape.fill.as_mut() {
            fill.color = color_from_hex(ring.color);
        }
        session.record_wall_contact();
        debug!(score = session.score(), "wall contact");
    }
}

#[cfg(test)]
mod tests {
    use bevy_rapier2d::rapier::geometry::CollisionEventFlags;
    use polybounce_shared::ring::RingGeometry;
    use polybounce_shared::vec2::Vec2 as SimVec2;

    use super::*;
    use crate::game::core::tests::test_settings;

    const RING_COLOR: u32 = 0x123456;

    fn make_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(test_settings());
        app.init_resource::<InputState>();
        app.init_resource::<GameSession>();
        app.add_message::<CollisionEvent>();
        app.add_plugins(BallPlugin);
        app.world_mut().resource_mut::<GameSession>().start();
        app.update();
        app
    }

    fn spawn_ring_with_segment(app: &mut App) -> Entity {
        let geometry = RingGeometry::new(SimVec2::ZERO, 350.0, 50.0, 4).unwrap();
        let world = app.world_mut();
        let ring = world.spawn(Ring::new(geometry, RING_COLOR)).id();
        world.spawn(RingSegment { ring }).id()
    }

    fn spawn_ring_corner(app: &mut App) -> (Entity, Entity) {
        let geometry = RingGeometry::new(SimVec2::ZERO, 350.0, 50.0, 4).unwrap();
        let world = app.world_mut();
        let ring = world.spawn(Ring::new(geometry, RING_COLOR)).id();
        let first = world.spawn(RingSegment { ring }).id();
        let second = world.spawn(RingSegment { ring }).id();
        (first, second)
    }

    fn contact(app: &mut App, ball: Entity, segment: Entity, started: bool) {
        let event = if started {
            CollisionEvent::Started(ball, segment, CollisionEventFlags::empty())
        } else {
            CollisionEvent::Stopped(ball, segment, CollisionEventFlags::empty())
        };
        app.world_mut().write_message(event);
    }

    fn score(app: &App) -> u32 {
        app.world().resource::<GameSession>().score()
    }

    fn ball_entity(app: &mut App) -> Entity {
        let world = app.world_mut();
        world
            .query_filtered::<Entity, With<Ball>>()
            .single(world)
            .unwrap()
    }

    #[test]
    fn ball_starts_with_text_color() {
        let mut app = make_test_app();
        let ball = ball_entity(&mut app);
        let settings = test_settings();
        assert_eq!(
            app.world().get::<Ball>(ball).unwrap().color,
            settings.palette.text()
        );
    }

    #[test]
    fn ring_contact_recolors_ball_and_scores() {
        let mut app = make_test_app();
        let segment = spawn_ring_with_segment(&mut app);
        let ball = ball_entity(&mut app);

        app.world_mut().write_message(CollisionEvent::Started(
            segment,
            ball,
            CollisionEventFlags::empty(),
        ));
        app.update();

        assert_eq!(app.world().get::<Ball>(ball).unwrap().color, RING_COLOR);
        let shape = app.world().get::<Shape>(ball).unwrap();
        assert_eq!(
            shape.fill.as_ref().unwrap().color.to_srgba(),
            color_from_hex(RING_COLOR).to_srgba()
        );
        assert_eq!(app.world().resource::<GameSession>().score(), 1);
    }

    #[test]
    fn non_ring_contacts_are_ignored() {
        let mut app = make_test_app();
        let ball = ball_entity(&mut app);
        let stranger = app.world_mut().spawn_empty().id();

        app.world_mut().write_message(CollisionEvent::Started(
            ball,
            stranger,
            CollisionEventFlags::empty(),
        ));
        let segment = spawn_ring_with_segment(&mut app);
        app.world_mut().write_message(CollisionEvent::Stopped(
            ball,
            segment,
            CollisionEventFlags::empty(),
        ));
        app.update();

        assert_eq!(app.world().resource::<GameSession>().score(), 0);
        assert_ne!(app.world().get::<Ball>(ball).unwrap().color, RING_COLOR);
    }

    #[test]
    fn held_keys_set_force_and_jump_adds_impulse() {
        use polybounce_shared::controls::BallAction;

        let mut app = make_test_app();
        let ball = ball_entity(&mut app);
        {
            let mut input = app.world_mut().resource_mut::<InputState>();
            input.held.press(BallAction::Right);
            input.jump_requested = true;
        }
        app.update();

        let force = app.world().get::<ExternalForce>(ball).unwrap();
        assert!(force.force.x > 0.0);
        assert_eq!(force.force.y, 0.0);
        let impulse = app.world().get::<ExternalImpulse>(ball).unwrap();
        assert!(impulse.impulse.y > 0.0);
    }

    #[test]
    fn corner_hit_on_two_segments_scores_once() {
        let mut app = make_test_app();
        let (first, second) = spawn_ring_corner(&mut app);
        let ball = ball_entity(&mut app);

        contact(&mut app, ball, first, true);
        contact(&mut app, second, ball, true);
        app.update();

        assert_eq!(score(&app), 1);
        assert_eq!(app.world().get::<Ball>(ball).unwrap().color, RING_COLOR);
    }

    #[test]
    fn resting_in_a_corner_does_not_keep_scoring() {
        let mut app = make_test_app();
        let (first, second) = spawn_ring_corner(&mut app);
        let ball = ball_entity(&mut app);

        contact(&mut app, ball, first, true);
        contact(&mut app, ball, second, true);
        app.update();

        // Contact with one capsule flickers while the other holds.
        for _ in 0..10 {
            contact(&mut app, ball, first, false);
            app.update();
            contact(&mut app, ball, first, true);
            app.update();
        }
        assert_eq!(score(&app), 1);
    }

    #[test]
    fn leaving_the_wall_rearms_scoring() {
        let mut app = make_test_app();
        let (first, second) = spawn_ring_corner(&mut app);
        let ball = ball_entity(&mut app);

        contact(&mut app, ball, first, true);
        contact(&mut app, ball, second, true);
        app.update();
        contact(&mut app, ball, first, false);
        contact(&mut app, ball, second, false);
        app.update();
        assert_eq!(score(&app), 1);

        contact(&mut app, ball, second, true);
        app.update();
        assert_eq!(score(&app), 2);
    }
}
