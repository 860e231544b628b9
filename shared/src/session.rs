/// Lifecycle of one run of the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    Stopped,
}

/// Walls hit per level.
pub const CONTACTS_PER_LEVEL: u32 = 3;

/// Run state: phase, clock and score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    phase: Phase,
    elapsed: f64,
    score: u32,
}

/// Values the HUD reads each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HudSnapshot {
    pub level: u32,
    pub level_clock: f64,
    pub score: u32,
}

impl Session {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// NotStarted -> Running. Returns false if the session already left
    /// NotStarted.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::NotStarted {
            tracing::warn!(phase = ?self.phase, "start ignored");
            return false;
        }
        self.phase = Phase::Running;
        true
    }

    /// Any phase -> Stopped. Returns true on the first call only.
    pub fn request_exit(&mut self) -> bool {
        if self.phase == Phase::Stopped {
            return false;
        }
        self.phase = Phase::Stopped;
        true
    }

    /// Advance the level clock. Time only counts while running.
    pub fn advance(&mut self, dt: f64) {
        if self.is_running() && dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    /// One point per wall contact while running.
    pub fn record_wall_contact(&mut self) {
        if self.is_running() {
            self.score += 1;
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.score / CONTACTS_PER_LEVEL
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            level: self.level(),
            level_clock: self.elapsed,
            score: self.score,
        }
    }
}
