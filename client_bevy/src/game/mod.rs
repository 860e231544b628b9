mod ball;
mod core;
mod debug_guides;
mod hud;
mod input;
mod ring;
mod walls;

pub use ball::BallPlugin;
pub use core::CorePlugin;
pub(crate) use core::UpdateSet;
pub use debug_guides::DebugGuidesPlugin;
pub use hud::HudPlugin;
pub use input::InputPlugin;
pub use ring::RingPlugin;
pub use walls::WallsPlugin;
