use crate::config::BallConfig;
use crate::vec2::{add, normalize, scale, Vec2};

/// Ball actions bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BallAction {
    Up,
    Down,
    Left,
    Right,
    Boost,
    Jump,
}

impl BallAction {
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of actions whose keys are currently held down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys(u8);

impl HeldKeys {
    pub fn press(&mut self, action: BallAction) {
        self.0 |= action.bit();
    }

    pub fn release(&mut self, action: BallAction) {
        self.0 &= !action.bit();
    }

    pub fn contains(&self, action: BallAction) -> bool {
        self.0 & action.bit() != 0
    }

    /// Unit direction from the held movement keys (Y-up). Opposite keys cancel.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        for (action, step) in [
            (BallAction::Up, Vec2::new(0.0, 1.0)),
            (BallAction::Down, Vec2::new(0.0, -1.0)),
            (BallAction::Left, Vec2::new(-1.0, 0.0)),
            (BallAction::Right, Vec2::new(1.0, 0.0)),
        ] {
            if self.contains(action) {
                dir = add(dir, step);
            }
        }
        if dir == Vec2::ZERO {
            return dir;
        }
        normalize(dir)
    }

    /// Acceleration requested by the held keys.
    pub fn acceleration(&self, ball: &BallConfig) -> Vec2 {
        let boost = if self.contains(BallAction::Boost) {
            ball.boost_multiplier
        } else {
            1.0
        };
        scale(self.direction(), ball.move_acceleration * boost)
    }
}

/// Velocity change for a single jump.
pub fn jump_velocity(ball: &BallConfig) -> Vec2 {
    Vec2::new(0.0, ball.jump_speed)
}
