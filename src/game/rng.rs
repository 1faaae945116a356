//! Spawn randomness.
//!
//! A tiny seedable LCG keeps spawn behaviour deterministic under a fixed seed,
//! which the native tests rely on. In the browser the glue seeds it from
//! `performance.now()` (or OS entropy when the `rng` feature is enabled).

/// Linear congruential generator driving trash kind, position and speed rolls.
#[derive(Clone, Debug)]
pub struct SpawnRng {
    state: u64,
}

impl SpawnRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        // Simple linear transform; not crypto secure and does not need to be.
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.state >> 16) as u32
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Uniform index in `[0, len)`. Returns 0 for an empty range.
    pub fn next_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.next_u32() as usize % len
    }
}
