use bevy::prelude::*;
use polybounce_shared::ring::Edge;

use crate::constants::{color_from_hex, EDGE_HIGHLIGHT_WIDTH, GUIDE_ALPHA};
use crate::coord::{from_world, to_world, to_world_points};

use super::ball::Ball;
use super::core::Settings;
use super::ring::Ring;
use super::UpdateSet;

pub struct DebugGuidesPlugin;

const TOGGLE_KEY: KeyCode = KeyCode::F2;
const NORMAL_LENGTH: f32 = 30.0;

#[derive(Resource)]
pub(crate) struct DebugGuides {
    pub(crate) enabled: bool,
}

impl Default for DebugGuides {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Plugin for DebugGuidesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugGuides>()
            .add_systems(Update, toggle_guides.in_set(UpdateSet::Input))
            .add_systems(Update, draw_guides.in_set(UpdateSet::Visuals));
    }
}

fn toggle_guides(keys: Res<ButtonInput<KeyCode>>, mut guides: ResMut<DebugGuides>) {
    if keys.just_pressed(TOGGLE_KEY) {
        guides.enabled = !guides.enabled;
    }
}

/// Ring edge closest to `ball`, in world space at the ring's current tilt.
pub(crate) fn nearest_ring_edge(ring: &Ring, ball: Vec2) -> Edge {
    ring.geometry.nearest_edge(from_world(ball))
}

/// Closed outer outline of the ring at its current tilt.
pub(crate) fn ring_outline(ring: &Ring) -> Vec<Vec2> {
    let mut points = to_world_points(&ring.geometry.outer_vertices());
    if let Some(first) = points.first().copied() {
        points.push(first);
    }
    points
}

fn draw_guides(
    guides: Res<DebugGuides>,
    settings: Res<Settings>,
    q_ball: Query<(&Transform, &Ball)>,
    q_ring: Query<&Ring>,
    mut gizmos: Gizmos,
) {
    if !guides.enabled {
        return;
    }
    let half_w = settings.config.canvas_width * 0.5;
    let half_h = settings.config.canvas_height * 0.5;
    let guide = color_from_hex(settings.palette.text()).with_alpha(GUIDE_ALPHA);

    for (transform, ball) in &q_ball {
        let p = transform.translation.truncate();
        gizmos.line_2d(Vec2::new(-half_w, p.y), Vec2::new(half_w, p.y), guide);
        gizmos.line_2d(Vec2::new(p.x, -half_h), Vec2::new(p.x, half_h), guide);

        for ring in &q_ring {
            // Outline from the geometry alone; it should sit on the rotated fill.
            let outline = ring_outline(ring);
            gizmos.linestrip_2d(outline, guide);

            let edge = nearest_ring_edge(ring, p);
            let a = to_world(edge.a);
            let b = to_world(edge.b);
            let highlight = color_from_hex(ball.color);
            // Gizmo lines are one pixel wide; offset copies fake the thickness.
            let normal = to_world(edge.inward_normal(ring.geometry.center()));
            let steps = EDGE_HIGHLIGHT_WIDTH as i32;
            for i in 0..steps {
                let off = normal * i as f32;
                gizmos.line_2d(a + off, b + off, highlight);
            }
            let mid = to_world(edge.midpoint());
            gizmos.arrow_2d(mid, mid + normal * NORMAL_LENGTH, highlight);
        }
    }
}
