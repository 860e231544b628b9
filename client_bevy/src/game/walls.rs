use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use polybounce_shared::boundary::{attach_segments, BoundarySegment, SegmentMaterial, Simulation};
use polybounce_shared::vec2::Vec2 as SimVec2;
use polybounce_shared::GeometryError;

use crate::coord::{canvas_corners, to_world};

use super::core::Settings;

pub struct WallsPlugin;

/// Position of a segment collider in its closed boundary loop.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SegmentLinks {
    pub(crate) index: usize,
    pub(crate) prev: usize,
    pub(crate) next: usize,
}

#[derive(Component)]
pub(crate) struct ScreenBox;

impl Plugin for WallsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_screen_box);
    }
}

/// Registers boundary bodies and segment colliders as ECS entities for Rapier.
pub(crate) struct CommandsSimulation<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    body_kind: RigidBody,
}

impl<'a, 'w, 's> CommandsSimulation<'a, 'w, 's> {
    pub(crate) fn new(commands: &'a mut Commands<'w, 's>, body_kind: RigidBody) -> Self {
        Self {
            commands,
            body_kind,
        }
    }
}

impl Simulation for CommandsSimulation<'_, '_, '_> {
    type Body = Entity;
    type Collider = Entity;

    fn add_body(&mut self, body: Entity) {
        self.commands.entity(body).insert(self.body_kind);
    }

    fn add_segment(&mut self, body: Entity, segment: &BoundarySegment) -> Entity {
        let m = segment.material;
        let child = self
            .commands
            .spawn((
                Collider::capsule(to_world(segment.a), to_world(segment.b), m.radius as f32),
                ColliderMassProperties::Density(m.density as f32),
                Restitution::coefficient(m.elasticity as f32),
                Friction::coefficient(m.friction as f32),
                SegmentLinks {
                    index: segment.index,
                    prev: segment.prev_neighbor,
                    next: segment.next_neighbor,
                },
                Transform::default(),
                GlobalTransform::default(),
            ))
            .id();
        self.commands.entity(body).add_child(child);
        child
    }
}

/// Spawns a body at the origin and closes `vertices` into a segment loop on it.
pub(crate) fn spawn_boundary(
    commands: &mut Commands,
    vertices: &[SimVec2],
    body_kind: RigidBody,
    material: SegmentMaterial,
) -> Result<(Entity, Vec<Entity>), GeometryError> {
    if vertices.len() < 3 {
        return Err(GeometryError::DegeneratePolygon {
            count: vertices.len(),
        });
    }
    let body = commands
        .spawn((Transform::default(), GlobalTransform::default()))
        .id();
    let mut sim = CommandsSimulation::new(commands, body_kind);
    let colliders = attach_segments(vertices, body, material, &mut sim)?;
    Ok((body, colliders))
}

fn spawn_screen_box(mut commands: Commands, settings: Res<Settings>) {
    let cfg = &settings.config;
    let corners = canvas_corners(cfg.canvas_width, cfg.canvas_height);
    match spawn_boundary(&mut commands, &corners, RigidBody::Fixed, cfg.walls) {
        Ok((body, _)) => {
            commands.entity(body).insert((ScreenBox, Name::new("screen_box")));
        }
        Err(err) => error!("screen box not attached: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::game::core::tests::test_settings;

    #[test]
    fn screen_box_is_a_closed_loop_of_four() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(test_settings());
        app.add_plugins(WallsPlugin);
        app.update();

        let world = app.world_mut();
        let mut q_box = world.query_filtered::<(&RigidBody, &Children), With<ScreenBox>>();
        let (kind, children) = q_box.single(world).unwrap();
        assert_eq!(*kind, RigidBody::Fixed);
        assert_eq!(children.len(), 4);

        let mut links: Vec<SegmentLinks> = world
            .query::<&SegmentLinks>()
            .iter(world)
            .copied()
            .collect();
        links.sort_by_key(|l| l.index);
        assert_eq!(
            links,
            vec![
                SegmentLinks { index: 0, prev: 3, next: 1 },
                SegmentLinks { index: 1, prev: 0, next: 2 },
                SegmentLinks { index: 2, prev: 1, next: 3 },
                SegmentLinks { index: 3, prev: 2, next: 0 },
            ]
        );
    }

    #[test]
    fn short_vertex_list_spawns_nothing() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        let before = app.world().entities().len();

        let result = app
            .world_mut()
            .run_system_once(|mut commands: Commands| {
                spawn_boundary(
                    &mut commands,
                    &[SimVec2::ZERO, SimVec2::new(1.0, 0.0)],
                    RigidBody::Fixed,
                    SegmentMaterial::default(),
                )
                .map(|(_, colliders)| colliders.len())
            })
            .unwrap();

        assert_eq!(result, Err(GeometryError::DegeneratePolygon { count: 2 }));
        assert_eq!(app.world().entities().len(), before);
    }
}
