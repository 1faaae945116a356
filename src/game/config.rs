//! Gameplay constants, the trash catalogue and per-variant configuration.

/// Points awarded per trash object collected.
pub const POINTS_PER_HIT: u32 = 10;

/// Lives at the start of every run.
pub const STARTING_LIVES: u32 = 5;

/// Vertical spawn position, above the visible canvas.
pub const SPAWN_Y: f64 = -60.0;

/// Horizontal spawn margin so objects never appear clipped by the right edge.
pub const SPAWN_MARGIN: f64 = 40.0;

/// The four kinds of trash. Each carries a fixed sprite size (used for both
/// drawing and hit-testing) and a fill colour for the pixel-art body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrashKind {
    Bottle,
    Can,
    Bag,
    Paper,
}

impl TrashKind {
    pub const ALL: [TrashKind; 4] = [
        TrashKind::Bottle,
        TrashKind::Can,
        TrashKind::Bag,
        TrashKind::Paper,
    ];

    /// Bounding-box size in canvas pixels (width, height).
    pub fn size(self) -> (f64, f64) {
        match self {
            TrashKind::Bottle => (24.0, 48.0),
            TrashKind::Can => (30.0, 36.0),
            TrashKind::Bag => (36.0, 30.0),
            TrashKind::Paper => (27.0, 27.0),
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            TrashKind::Bottle => "#4ade80",
            TrashKind::Can => "#f59e0b",
            TrashKind::Bag => "#374151",
            TrashKind::Paper => "#e5e7eb",
        }
    }
}

/// Per-variant gameplay configuration. Two presets exist (full-screen page and
/// the smaller embeddable widget); they share all pacing constants.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    /// Canvas backing-store width in pixels.
    pub width: f64,
    /// Canvas backing-store height in pixels.
    pub height: f64,
    /// Spawn interval at difficulty 1.0, in milliseconds.
    pub base_spawn_ms: f64,
    /// Hard floor for the spawn interval, in milliseconds.
    pub min_spawn_ms: f64,
    /// Fall speed at difficulty 1.0, in pixels per tick.
    pub base_speed: f64,
    /// Cap for the difficulty multiplier. 1.0 disables the ramp entirely.
    pub max_multiplier: f64,
    /// Seconds of play over which the multiplier climbs from 1.0 to the cap.
    pub ramp_secs: f64,
}

impl GameConfig {
    pub fn fullscreen() -> Self {
        Self {
            width: 400.0,
            height: 600.0,
            ..Self::base()
        }
    }

    pub fn embedded() -> Self {
        Self {
            width: 320.0,
            height: 480.0,
            ..Self::base()
        }
    }

    fn base() -> Self {
        Self {
            width: 400.0,
            height: 600.0,
            base_spawn_ms: 1500.0,
            min_spawn_ms: 400.0,
            base_speed: 1.0,
            max_multiplier: 3.0,
            ramp_secs: 120.0,
        }
    }

    /// Difficulty multiplier after `elapsed_secs` of play: 1.0 at the start,
    /// climbing linearly and clamping at `max_multiplier`.
    pub fn difficulty_multiplier(&self, elapsed_secs: f64) -> f64 {
        let t = elapsed_secs.max(0.0);
        (1.0 + (t / self.ramp_secs) * (self.max_multiplier - 1.0)).min(self.max_multiplier)
    }

    /// Spawn interval in milliseconds for a given multiplier, floored at
    /// `min_spawn_ms`.
    pub fn spawn_interval(&self, multiplier: f64) -> f64 {
        (self.base_spawn_ms / multiplier).max(self.min_spawn_ms)
    }
}
