use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::boundary::SegmentMaterial;
use crate::error::{ConfigError, GeometryError};
use crate::ring::{RingGeometry, DEFAULT_TILT};
use crate::vec2::Vec2;

/// Upper bound on polygon sides; past this the ring is visually a circle.
pub const MAX_RING_SIDES: usize = 64;

/// Ring configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RingConfig {
    pub radius: f64,
    pub sides: usize,
    pub wall_thickness: f64,
    /// Initial tilt (radians)
    pub tilt: f64,
    /// Rotation speed while a rotate key is held (rad/s)
    pub angular_speed: f64,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            radius: 350.0,
            sides: 4,
            wall_thickness: 50.0,
            tilt: DEFAULT_TILT,
            angular_speed: 1.5, // ~4.2s per full turn
        }
    }
}

impl RingConfig {
    pub fn build(&self, center: Vec2) -> Result<RingGeometry, GeometryError> {
        Ok(
            RingGeometry::new(center, self.radius, self.wall_thickness, self.sides)?
                .with_tilt(self.tilt)
                .with_angular_speed(self.angular_speed),
        )
    }
}

/// Player ball configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct BallConfig {
    pub radius: f64,
    pub restitution: f64,
    pub friction: f64,
    /// Acceleration while a direction key is held (units/s^2)
    pub move_acceleration: f64,
    /// Acceleration multiplier while boost is held
    pub boost_multiplier: f64,
    /// Upward velocity change applied once per jump press (units/s)
    pub jump_speed: f64,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            restitution: 0.9,
            friction: 0.3,
            move_acceleration: 300.0,
            boost_multiplier: 2.0,
            jump_speed: 250.0,
        }
    }
}

/// Top-level game configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub window_title: String,
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Gravity in world units (Y-up)
    pub gravity: [f64; 2],
    pub palette_path: String,
    pub ring: RingConfig,
    pub ball: BallConfig,
    pub walls: SegmentMaterial,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "PolyBounce".to_string(),
            canvas_width: 1200.0,
            canvas_height: 900.0,
            gravity: [0.0, -50.0],
            palette_path: "assets/palette.json".to_string(),
            ring: RingConfig::default(),
            ball: BallConfig::default(),
            walls: SegmentMaterial::default(),
        }
    }
}

impl GameConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "game config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_inner().map_err(ConfigError::Invalid)
    }

    fn validate_inner(&self) -> Result<(), String> {
        if !self.canvas_width.is_finite() || self.canvas_width <= 0.0 {
            return Err("canvas_width must be finite and > 0".to_string());
        }
        if !self.canvas_height.is_finite() || self.canvas_height <= 0.0 {
            return Err("canvas_height must be finite and > 0".to_string());
        }
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err("gravity must be finite".to_string());
        }
        if self.palette_path.trim().is_empty() {
            return Err("palette_path must not be empty".to_string());
        }

        let ring = &self.ring;
        if !(3..=MAX_RING_SIDES).contains(&ring.sides) {
            return Err(format!("ring.sides must be in [3, {MAX_RING_SIDES}]"));
        }
        if !ring.radius.is_finite() || ring.radius <= 0.0 {
            return Err("ring.radius must be finite and > 0".to_string());
        }
        if !ring.wall_thickness.is_finite()
            || ring.wall_thickness <= 0.0
            || ring.wall_thickness >= ring.radius
        {
            return Err("ring.wall_thickness must be in (0, radius)".to_string());
        }
        if !ring.tilt.is_finite() {
            return Err("ring.tilt must be finite".to_string());
        }
        if !ring.angular_speed.is_finite() || ring.angular_speed < 0.0 {
            return Err("ring.angular_speed must be finite and >= 0".to_string());
        }
        if f64::from(self.canvas_width.min(self.canvas_height)) < ring.radius * 2.0 {
            return Err("ring must fit inside the canvas".to_string());
        }

        let ball = &self.ball;
        if !ball.radius.is_finite() || ball.radius <= 0.0 {
            return Err("ball.radius must be finite and > 0".to_string());
        }
        if ball.radius * 2.0 >= ring.radius - ring.wall_thickness {
            return Err("ball must fit inside the ring".to_string());
        }
        if !ball.restitution.is_finite() || ball.restitution < 0.0 {
            return Err("ball.restitution must be finite and >= 0".to_string());
        }
        if !ball.friction.is_finite() || ball.friction < 0.0 {
            return Err("ball.friction must be finite and >= 0".to_string());
        }
        if !ball.move_acceleration.is_finite() || ball.move_acceleration < 0.0 {
            return Err("ball.move_acceleration must be finite and >= 0".to_string());
        }
        if !ball.boost_multiplier.is_finite() || ball.boost_multiplier < 1.0 {
            return Err("ball.boost_multiplier must be finite and >= 1".to_string());
        }
        if !ball.jump_speed.is_finite() || ball.jump_speed < 0.0 {
            return Err("ball.jump_speed must be finite and >= 0".to_string());
        }

        self.walls.validate()
    }
}
