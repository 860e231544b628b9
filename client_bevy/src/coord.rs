use bevy::prelude::Vec2;
use polybounce_shared::vec2::Vec2 as SimVec2;

/// Shared geometry (f64) to Bevy world coordinates. Both are Y-up with the
/// origin at the canvas center, so only the precision changes.
pub fn to_world(v: SimVec2) -> Vec2 {
    Vec2::new(v.x as f32, v.y as f32)
}

pub fn from_world(v: Vec2) -> SimVec2 {
    SimVec2::new(v.x as f64, v.y as f64)
}

/// Corners of the canvas, counterclockwise from bottom-left.
pub fn canvas_corners(width: f32, height: f32) -> [SimVec2; 4] {
    let hw = width as f64 * 0.5;
    let hh = height as f64 * 0.5;
    [
        SimVec2::new(-hw, -hh),
        SimVec2::new(hw, -hh),
        SimVec2::new(hw, hh),
        SimVec2::new(-hw, hh),
    ]
}

pub fn to_world_points(points: &[SimVec2]) -> Vec<Vec2> {
    points.iter().copied().map(to_world).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_roundtrip() {
        for (x, y) in [(0.0, 0.0), (600.0, -450.0), (-12.5, 3.25)] {
            let world = to_world(SimVec2::new(x, y));
            let back = from_world(world);
            assert!((back.x - x).abs() < 1e-6);
            assert!((back.y - y).abs() < 1e-6);
        }
    }

    #[test]
    fn corners_wind_counterclockwise() {
        let c = canvas_corners(1200.0, 900.0);
        let mut twice_area = 0.0;
        for i in 0..c.len() {
            let a = c[i];
            let b = c[(i + 1) % c.len()];
            twice_area += a.x * b.y - b.x * a.y;
        }
        assert!(twice_area > 0.0);
        assert_eq!(c[2], SimVec2::new(600.0, 450.0));
    }
}
