/// Rapier pixels_per_meter scaling factor. Everything on the client side is
/// expressed in pixels; Rapier divides internally by this.
pub const PPM: f32 = 100.0;

/// Upper bound on a single physics step (variable timestep).
pub const MAX_PHYSICS_DT: f32 = 1.0 / 30.0;

pub const Z_RING_OUTER: f32 = 1.0;
pub const Z_RING_INNER: f32 = 1.5;
pub const Z_BALL: f32 = 4.0;

/// Stroke width of the ball outline.
pub const BALL_OUTLINE_WIDTH: f32 = 2.0;

pub const GUIDE_ALPHA: f32 = 0.35;
pub const EDGE_HIGHLIGHT_WIDTH: f32 = 4.0;

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}
