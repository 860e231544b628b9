//! Engine-independent core of PolyBounce.
//!
//! Ring geometry, boundary attachment, palette and configuration loading,
//! session state and HUD layout. Nothing here depends on the renderer or the
//! physics engine; the client plugs those in through [`boundary::Simulation`].

pub mod boundary;
pub mod config;
pub mod controls;
pub mod error;
pub mod hud;
pub mod palette;
pub mod ring;
pub mod session;
pub mod vec2;

pub use error::{ConfigError, GeometryError};
