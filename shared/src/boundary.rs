use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::vec2::Vec2;

/// Physical properties shared by every segment of a boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SegmentMaterial {
    /// Half-thickness of the segment collider.
    pub radius: f64,
    pub density: f64,
    pub elasticity: f64,
    pub friction: f64,
}

impl Default for SegmentMaterial {
    fn default() -> Self {
        Self {
            radius: 2.0,
            density: 100.0,
            elasticity: 0.98,
            friction: 0.65,
        }
    }
}

impl SegmentMaterial {
    pub fn validate(&self) -> Result<(), String> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err("segment radius must be finite and > 0".to_string());
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err("segment density must be finite and > 0".to_string());
        }
        if !self.elasticity.is_finite() || self.elasticity < 0.0 {
            return Err("segment elasticity must be finite and >= 0".to_string());
        }
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err("segment friction must be finite and >= 0".to_string());
        }
        Ok(())
    }
}

/// One edge of a closed boundary, vertex[index] -> vertex[(index + 1) % n].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundarySegment {
    pub index: usize,
    pub a: Vec2,
    pub b: Vec2,
    /// Segment that ends at `a`.
    pub prev_neighbor: usize,
    /// Segment that starts at `b`.
    pub next_neighbor: usize,
    pub material: SegmentMaterial,
}

/// The physics collaborator that owns bodies and colliders.
///
/// Implementations register a body once and then hang segment colliders off
/// it. Stepping and gravity stay with the physics engine itself.
pub trait Simulation {
    type Body: Copy;
    type Collider;

    fn add_body(&mut self, body: Self::Body);
    fn add_segment(&mut self, body: Self::Body, segment: &BoundarySegment) -> Self::Collider;
}

/// Closed loop of segments through `vertices`, each linked to the segments
/// sharing its endpoints.
pub fn boundary_segments(
    vertices: &[Vec2],
    material: SegmentMaterial,
) -> Result<Vec<BoundarySegment>, GeometryError> {
    let n = vertices.len();
    if n < 3 {
        return Err(GeometryError::DegeneratePolygon { count: n });
    }

    Ok((0..n)
        .map(|i| BoundarySegment {
            index: i,
            a: vertices[i],
            b: vertices[(i + 1) % n],
            prev_neighbor: (i + n - 1) % n,
            next_neighbor: (i + 1) % n,
            material,
        })
        .collect())
}

/// Register `body` with `sim` and attach one segment collider per polygon
/// edge. Nothing is registered when the polygon is degenerate.
pub fn attach_segments<S: Simulation>(
    vertices: &[Vec2],
    body: S::Body,
    material: SegmentMaterial,
    sim: &mut S,
) -> Result<Vec<S::Collider>, GeometryError> {
    let segments = boundary_segments(vertices, material)?;

    sim.add_body(body);
    let colliders = segments
        .iter()
        .map(|segment| sim.add_segment(body, segment))
        .collect();

    tracing::debug!(segments = segments.len(), "boundary attached");
    Ok(colliders)
}
