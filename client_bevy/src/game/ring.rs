use bevy::prelude::*;
use bevy_prototype_lyon::prelude::*;
use bevy_rapier2d::prelude::*;
use polybounce_shared::ring::RingGeometry;
use polybounce_shared::vec2::Vec2 as SimVec2;
use polybounce_shared::GeometryError;

use crate::constants::{color_from_hex, Z_RING_INNER, Z_RING_OUTER};
use crate::coord::to_world_points;

use super::core::Settings;
use super::input::InputState;
use super::walls::spawn_boundary;
use super::UpdateSet;

pub struct RingPlugin;

/// The rotating polygon. `geometry.tilt()` is authoritative; the body's
/// rotation is derived from it every frame.
#[derive(Component)]
pub(crate) struct Ring {
    pub(crate) geometry: RingGeometry,
    pub(crate) color: u32,
    /// Tilt the colliders and visuals were built at.
    initial_tilt: f64,
}

impl Ring {
    pub(crate) fn new(geometry: RingGeometry, color: u32) -> Self {
        let initial_tilt = geometry.tilt();
        Self {
            geometry,
            color,
            initial_tilt,
        }
    }

    pub(crate) fn body_angle(&self) -> f32 {
        (self.geometry.tilt() - self.initial_tilt) as f32
    }
}

#[derive(Component)]
pub(crate) struct RingSegment {
    pub(crate) ring: Entity,
}

impl Plugin for RingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_ring_system)
            .add_systems(Update, rotate_ring_system.in_set(UpdateSet::Logic));
    }
}

fn spawn_ring_system(mut commands: Commands, settings: Res<Settings>) {
    let color = settings.palette.random_ring_color(&mut rand::thread_rng());
    if let Err(err) = spawn_ring(&mut commands, &settings, color) {
        error!("ring not spawned: {err}");
    }
}

/// Kinematic body at the origin carrying the inner boundary loop plus the
/// outer/inner fills.
pub(crate) fn spawn_ring(
    commands: &mut Commands,
    settings: &Settings,
    color: u32,
) -> Result<Entity, GeometryError> {
    let cfg = &settings.config;
    let geometry = cfg.ring.build(SimVec2::ZERO)?;
    let tilt = geometry.tilt();
    let outer = geometry.local_vertices(geometry.radius(), tilt);
    let inner = geometry.local_vertices(geometry.inner_radius(), tilt);

    let (body, colliders) = spawn_boundary(
        commands,
        &inner,
        RigidBody::KinematicPositionBased,
        cfg.walls,
    )?;
    for collider in colliders {
        commands.entity(collider).insert(RingSegment { ring: body });
    }

    let outer_fill = commands
        .spawn((
            ShapeBuilder::with(&shapes::Polygon {
                points: to_world_points(&outer),
                closed: true,
            })
            .fill(color_from_hex(color))
            .build(),
            Transform::from_xyz(0.0, 0.0, Z_RING_OUTER),
        ))
        .id();
    let inner_fill = commands
        .spawn((
            ShapeBuilder::with(&shapes::Polygon {
                points: to_world_points(&inner),
                closed: true,
            })
            .fill(color_from_hex(settings.palette.background()))
            .build(),
            Transform::from_xyz(0.0, 0.0, Z_RING_INNER),
        ))
        .id();

    info!(
        sides = geometry.sides(),
        radius = geometry.radius(),
        inner_radius = geometry.inner_radius(),
        "ring spawned"
    );

    commands
        .entity(body)
        .insert((Ring::new(geometry, color), Visibility::default(), Name::new("ring")))
        .add_children(&[outer_fill, inner_fill]);
    Ok(body)
}

fn rotate_ring_system(
    input: Res<InputState>,
    time: Res<Time>,
    mut q_ring: Query<(&mut Ring, &mut Transform)>,
) {
    let dt = time.delta_secs_f64();
    for (mut ring, mut transform) in &mut q_ring {
        if let Some(direction) = input.rotation {
            ring.geometry.rotate(direction, dt);
        }
        transform.rotation = Quat::from_rotation_z(ring.body_angle());
    }
}
