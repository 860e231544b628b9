use std::f64::consts::{PI, TAU};

use crate::error::GeometryError;
use crate::vec2::{add, distance, dot, midpoint, normalize, perp, scale, sub, wrap_angle, Vec2};

/// Starting orientation of a freshly built ring.
pub const DEFAULT_TILT: f64 = 1.5 * PI;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// Sign applied to the tilt. Counterclockwise is positive in Y-up space.
    pub fn sign(self) -> f64 {
        match self {
            RotationDirection::Clockwise => -1.0,
            RotationDirection::CounterClockwise => 1.0,
        }
    }

    /// Resolve the two rotation keys. Holding both cancels out.
    pub fn from_held(counter_clockwise: bool, clockwise: bool) -> Option<Self> {
        match (counter_clockwise, clockwise) {
            (true, false) => Some(RotationDirection::CounterClockwise),
            (false, true) => Some(RotationDirection::Clockwise),
            _ => None,
        }
    }
}

/// Two inner vertices bounding the wall closest to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Index of the closest vertex.
    pub a_index: usize,
    /// Index of the second-closest vertex.
    pub b_index: usize,
    pub a: Vec2,
    pub b: Vec2,
}

impl Edge {
    /// Unit vector along the edge, from `a` towards `b`.
    pub fn direction(&self) -> Vec2 {
        normalize(sub(self.b, self.a))
    }

    /// Unit normal of the edge pointing towards `center`.
    pub fn inward_normal(&self, center: Vec2) -> Vec2 {
        let n = perp(self.direction());
        if dot(n, sub(center, midpoint(self.a, self.b))) >= 0.0 {
            n
        } else {
            scale(n, -1.0)
        }
    }

    pub fn midpoint(&self) -> Vec2 {
        midpoint(self.a, self.b)
    }

    /// Endpoint indices in ascending order, independent of which was closer.
    pub fn sorted_indices(&self) -> (usize, usize) {
        if self.a_index <= self.b_index {
            (self.a_index, self.b_index)
        } else {
            (self.b_index, self.a_index)
        }
    }
}

/// Geometry of a rotating polygonal ring.
///
/// The ring is an N-sided regular polygon with a wall of fixed thickness.
/// Outer and inner outlines share the same angular step and tilt, so every
/// inner edge is parallel to its outer edge. Only the tilt ever changes after
/// construction; vertex lists are recomputed from it on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct RingGeometry {
    center: Vec2,
    radius: f64,
    wall_thickness: f64,
    sides: usize,
    tilt: f64,
    angular_speed: f64,
}

impl RingGeometry {
    pub fn new(
        center: Vec2,
        radius: f64,
        wall_thickness: f64,
        sides: usize,
    ) -> Result<Self, GeometryError> {
        if sides < 3 {
            return Err(GeometryError::DegeneratePolygon { count: sides });
        }
        let inner = radius - wall_thickness;
        if !radius.is_finite() || !inner.is_finite() || radius <= 0.0 || inner <= 0.0 {
            return Err(GeometryError::InvalidRadius {
                outer: radius,
                inner,
            });
        }

        tracing::debug!(sides, radius, wall_thickness, "ring geometry created");

        Ok(Self {
            center,
            radius,
            wall_thickness,
            sides,
            tilt: DEFAULT_TILT,
            angular_speed: 0.0,
        })
    }

    pub fn with_tilt(mut self, tilt: f64) -> Self {
        self.tilt = wrap_angle(tilt);
        self
    }

    /// Radians per second applied by [`RingGeometry::rotate`].
    pub fn with_angular_speed(mut self, angular_speed: f64) -> Self {
        self.angular_speed = angular_speed;
        self
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn inner_radius(&self) -> f64 {
        self.radius - self.wall_thickness
    }

    pub fn wall_thickness(&self) -> f64 {
        self.wall_thickness
    }

    pub fn sides(&self) -> usize {
        self.sides
    }

    /// Angular step between consecutive vertices.
    pub fn theta(&self) -> f64 {
        TAU / self.sides as f64
    }

    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    pub fn angular_speed(&self) -> f64 {
        self.angular_speed
    }

    /// N points on a circle of `radius` around the ring center, translated by
    /// `offset`. Point i (1-based) sits at angle `tilt + theta * i`.
    pub fn vertices(&self, radius: f64, offset: Vec2, tilt: f64) -> Vec<Vec2> {
        let theta = self.theta();
        let origin = add(self.center, offset);
        (1..=self.sides)
            .map(|i| {
                let angle = tilt + theta * i as f64;
                add(origin, scale(Vec2::from_angle(angle), radius))
            })
            .collect()
    }

    /// Outer outline in world space at the current tilt.
    pub fn outer_vertices(&self) -> Vec<Vec2> {
        self.vertices(self.radius, Vec2::ZERO, self.tilt)
    }

    /// Inner outline in world space at the current tilt.
    pub fn inner_vertices(&self) -> Vec<Vec2> {
        self.vertices(self.inner_radius(), Vec2::ZERO, self.tilt)
    }

    /// Outline of `radius` relative to the ring center, for attaching to a
    /// body positioned at the center.
    pub fn local_vertices(&self, radius: f64, tilt: f64) -> Vec<Vec2> {
        self.vertices(radius, scale(self.center, -1.0), tilt)
    }

    /// The inner wall closest to `point`.
    ///
    /// Picks the two inner vertices nearest to `point`; see [`nearest_pair`]
    /// for the tie-break.
    pub fn nearest_edge(&self, point: Vec2) -> Edge {
        let inner = self.inner_vertices();
        // sides >= 3 is guaranteed by the constructor
        let (a_index, b_index) = nearest_pair(point, &inner).unwrap_or((0, 1));
        Edge {
            a_index,
            b_index,
            a: inner[a_index],
            b: inner[b_index],
        }
    }

    /// Advance the tilt by `angular_speed * dt` in `direction`.
    pub fn rotate(&mut self, direction: RotationDirection, dt: f64) {
        self.tilt = wrap_angle(self.tilt + direction.sign() * self.angular_speed * dt);
    }
}

/// Indices of the two vertices closest to `point`.
///
/// Vertices are ranked by (distance, index), so equal distances resolve to
/// the lower index. Returns `None` for fewer than two vertices.
pub fn nearest_pair(point: Vec2, vertices: &[Vec2]) -> Option<(usize, usize)> {
    let mut ranked: Vec<(f64, usize)> = vertices
        .iter()
        .enumerate()
        .map(|(i, v)| (distance(point, *v), i))
        .collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    match ranked.as_slice() {
        [first, second, ..] => Some((first.1, second.1)),
        _ => None,
    }
}
