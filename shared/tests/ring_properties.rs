//! Black-box checks of ring geometry and boundary attachment.

use std::collections::HashMap;
use std::f64::consts::{PI, TAU};

use polybounce_shared::boundary::{attach_segments, BoundarySegment, SegmentMaterial, Simulation};
use polybounce_shared::ring::RingGeometry;
use polybounce_shared::vec2::{angle_of, distance, midpoint, sub, vec2, wrap_angle, Vec2};
use polybounce_shared::GeometryError;

const EPS: f64 = 1e-6;

fn ring(sides: usize) -> RingGeometry {
    RingGeometry::new(vec2(600.0, 450.0), 350.0, 50.0, sides).unwrap()
}

fn angular_gap(a: f64, b: f64) -> f64 {
    wrap_angle(b - a)
}

#[test]
fn vertices_lie_on_circle_with_even_spacing() {
    for sides in 3..=12 {
        for radius in [1.0, 42.5, 350.0] {
            for tilt in [0.0, 1.5 * PI, -0.7, 9.0] {
                let r = ring(sides);
                let verts = r.vertices(radius, Vec2::ZERO, tilt);
                assert_eq!(verts.len(), sides);

                for v in &verts {
                    assert!((distance(*v, r.center()) - radius).abs() < EPS);
                }

                let step = TAU / sides as f64;
                for i in 0..sides {
                    let a = angle_of(sub(verts[i], r.center()));
                    let b = angle_of(sub(verts[(i + 1) % sides], r.center()));
                    let gap = angular_gap(a, b);
                    assert!(
                        (gap - step).abs() < EPS,
                        "sides={sides} tilt={tilt} gap={gap} step={step}"
                    );
                }
            }
        }
    }
}

#[test]
fn outer_and_inner_share_angles() {
    for sides in 3..=9 {
        let r = ring(sides).with_tilt(0.37);
        let outer = r.outer_vertices();
        let inner = r.inner_vertices();
        assert_eq!(outer.len(), inner.len());
        for (o, i) in outer.iter().zip(&inner) {
            let ao = angle_of(sub(*o, r.center()));
            let ai = angle_of(sub(*i, r.center()));
            let diff = angular_gap(ao, ai);
            assert!(diff < EPS || TAU - diff < EPS);
        }
    }
}

#[test]
fn nearest_edge_of_midpoint_is_that_edge() {
    for sides in 3..=7 {
        let r = ring(sides).with_tilt(0.2);
        let inner = r.inner_vertices();
        for i in 0..sides {
            let j = (i + 1) % sides;
            let edge = r.nearest_edge(midpoint(inner[i], inner[j]));
            let expected = if i < j { (i, j) } else { (j, i) };
            assert_eq!(edge.sorted_indices(), expected, "sides={sides} edge={i}");
        }
    }
}

#[test]
fn vertices_is_pure() {
    let r = ring(5);
    let first = r.vertices(123.0, vec2(4.0, -2.0), 0.9);
    let second = r.vertices(123.0, vec2(4.0, -2.0), 0.9);
    assert_eq!(first, second);
}

#[test]
fn square_ring_first_vertex_is_on_positive_x() {
    let r = RingGeometry::new(Vec2::ZERO, 350.0, 50.0, 4)
        .unwrap()
        .with_tilt(1.5 * PI);
    let v = r.vertices(350.0, Vec2::ZERO, 1.5 * PI)[0];
    let expected = vec2(
        350.0 * (1.5 * PI + PI / 2.0).cos(),
        350.0 * (1.5 * PI + PI / 2.0).sin(),
    );
    assert!((v.x - expected.x).abs() < EPS && (v.y - expected.y).abs() < EPS);
    assert!((v.x - 350.0).abs() < EPS && v.y.abs() < EPS);
}

#[test]
fn two_sided_ring_is_degenerate() {
    assert_eq!(
        RingGeometry::new(Vec2::ZERO, 350.0, 50.0, 2),
        Err(GeometryError::DegeneratePolygon { count: 2 })
    );
}

#[derive(Default)]
struct CountingSim {
    bodies: usize,
    segments: Vec<BoundarySegment>,
}

impl Simulation for CountingSim {
    type Body = ();
    type Collider = ();

    fn add_body(&mut self, _body: ()) {
        self.bodies += 1;
    }

    fn add_segment(&mut self, _body: (), segment: &BoundarySegment) {
        self.segments.push(*segment);
    }
}

#[test]
fn triangle_boundary_is_a_closed_loop() {
    let r = ring(3);
    let verts = r.local_vertices(r.inner_radius(), r.tilt());
    let mut sim = CountingSim::default();
    let colliders = attach_segments(&verts, (), SegmentMaterial::default(), &mut sim).unwrap();

    assert_eq!(colliders.len(), 3);
    assert_eq!(sim.bodies, 1);
    assert_eq!(sim.segments.len(), 3);

    // Every segment shares an endpoint with exactly two others.
    for (i, seg) in sim.segments.iter().enumerate() {
        let sharing = sim
            .segments
            .iter()
            .enumerate()
            .filter(|(j, other)| {
                *j != i && [other.a, other.b].iter().any(|p| *p == seg.a || *p == seg.b)
            })
            .count();
        assert_eq!(sharing, 2);
    }

    // Each vertex is the endpoint of exactly two segments.
    let mut uses: HashMap<usize, usize> = HashMap::new();
    for seg in &sim.segments {
        for p in [seg.a, seg.b] {
            let idx = verts.iter().position(|v| *v == p).unwrap();
            *uses.entry(idx).or_default() += 1;
        }
    }
    assert!(uses.values().all(|&n| n == 2));
}
