//! Pure game-session logic: spawn scheduling, per-tick motion, hit testing and
//! the Ready -> Playing -> GameOver state machine.
//!
//! Nothing in this module touches the browser. Timestamps are caller-supplied
//! milliseconds (the glue passes `performance.now()` / the rAF timestamp) and
//! randomness comes from an injected [`SpawnRng`], so the whole session can be
//! driven step by step from native tests.

use crate::game::config::{
    GameConfig, TrashKind, POINTS_PER_HIT, SPAWN_MARGIN, SPAWN_Y, STARTING_LIVES,
};
use crate::game::rng::SpawnRng;

/// One falling piece of trash.
#[derive(Clone, Debug)]
pub struct TrashObject {
    /// Monotonic per-run id; never reused while the run lasts.
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub kind: TrashKind,
    /// Pixels per tick, already scaled by the difficulty multiplier at spawn.
    pub speed: f64,
}

impl TrashObject {
    /// Axis-aligned bounding-box test against a canvas-space point. Bounds are
    /// inclusive on all four edges.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let (w, h) = self.kind.size();
        px >= self.x && px <= self.x + w && py >= self.y && py <= self.y + h
    }
}

/// Session lifecycle. `Ready` and `GameOver` are fully paused: ticks and
/// pointer events are no-ops. There is no direct Ready -> GameOver edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Playing,
    GameOver,
}

/// All mutable game state. Owned by the caller; every mutation funnels through
/// [`GameSession::start`], [`GameSession::reset`], [`GameSession::tick`] and
/// [`GameSession::handle_pointer`].
pub struct GameSession {
    config: GameConfig,
    rng: SpawnRng,
    phase: Phase,
    score: u32,
    lives: u32,
    objects: Vec<TrashObject>,
    next_id: u64,
    started_at_ms: f64,
    last_spawn_ms: f64,
}

impl GameSession {
    pub fn new(config: GameConfig, rng: SpawnRng) -> Self {
        Self {
            config,
            rng,
            phase: Phase::Ready,
            score: 0,
            lives: STARTING_LIVES,
            objects: Vec::new(),
            next_id: 1,
            started_at_ms: 0.0,
            last_spawn_ms: 0.0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Objects currently falling, in spawn order.
    pub fn objects(&self) -> &[TrashObject] {
        &self.objects
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Begin a run. Clears any leftover state from a previous run and records
    /// `now_ms` as both the session start and the spawn-timer origin, so the
    /// first object appears only after the base interval has elapsed.
    pub fn start(&mut self, now_ms: f64) {
        self.phase = Phase::Playing;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.objects.clear();
        self.next_id = 1;
        self.started_at_ms = now_ms;
        self.last_spawn_ms = now_ms;
    }

    /// Back to the ready screen, clearing all per-run state. The RNG is kept;
    /// reseeding is the caller's choice.
    pub fn reset(&mut self) {
        self.phase = Phase::Ready;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.objects.clear();
        self.next_id = 1;
    }

    /// Current difficulty multiplier given the wall-clock timestamp.
    pub fn difficulty_multiplier(&self, now_ms: f64) -> f64 {
        self.config
            .difficulty_multiplier((now_ms - self.started_at_ms) / 1000.0)
    }

    /// One frame of game logic: spawn decision, motion, then exit handling.
    /// Outside `Playing` this is a no-op.
    pub fn tick(&mut self, now_ms: f64) {
        if self.phase != Phase::Playing {
            return;
        }

        let multiplier = self.difficulty_multiplier(now_ms);
        // Strict comparison: at exactly `interval` elapsed no spawn happens yet.
        if now_ms - self.last_spawn_ms > self.config.spawn_interval(multiplier) {
            self.spawn(multiplier);
            self.last_spawn_ms = now_ms;
        }

        for obj in &mut self.objects {
            obj.y += obj.speed;
        }

        // Objects that crossed the bottom edge this tick cost one life each.
        let height = self.config.height;
        let mut missed = 0u32;
        self.objects.retain(|obj| {
            if obj.y > height {
                missed += 1;
                false
            } else {
                true
            }
        });
        if missed > 0 {
            self.lives = self.lives.saturating_sub(missed);
            if self.lives == 0 {
                self.phase = Phase::GameOver;
            }
        }
    }

    fn spawn(&mut self, multiplier: f64) {
        let kind = TrashKind::ALL[self.rng.next_index(TrashKind::ALL.len())];
        let x = self.rng.next_f64() * (self.config.width - SPAWN_MARGIN);
        let speed = (self.config.base_speed + self.rng.next_f64()) * multiplier;
        let id = self.next_id;
        self.next_id += 1;
        self.objects.push(TrashObject {
            id,
            x,
            y: SPAWN_Y,
            kind,
            speed,
        });
    }

    /// Remove every object whose bounding box contains the canvas-space point
    /// and award points for each; overlapping objects are all collected by one
    /// tap. Returns the number of objects removed. No-op outside `Playing`.
    pub fn handle_pointer(&mut self, x: f64, y: f64) -> usize {
        if self.phase != Phase::Playing {
            return 0;
        }
        let before = self.objects.len();
        self.objects.retain(|obj| !obj.contains(x, y));
        let hits = before - self.objects.len();
        self.score += hits as u32 * POINTS_PER_HIT;
        hits
    }
}
