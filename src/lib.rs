//! Trash Dash core crate.
//!
//! A small canvas arcade game: trash objects spawn above the top edge and fall
//! toward the ground; the player clicks or taps them before they land. Missed
//! objects cost lives, and difficulty ramps up with elapsed play time.
//!
//! The session logic in [`game::session`] is pure Rust (caller-supplied
//! timestamps, injectable RNG) so it runs natively under `cargo test`; only
//! the thin glue in [`game`] touches the browser.

use wasm_bindgen::prelude::*;

mod game;

pub use game::config::{GameConfig, TrashKind, POINTS_PER_HIT, STARTING_LIVES};
pub use game::rng::SpawnRng;
pub use game::session::{GameSession, Phase, TrashObject};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

// -----------------------------------------------------------------------------
// Unified entrypoints
// -----------------------------------------------------------------------------

/// Mount the full-screen variant (400x600 canvas). The ready screen is painted
/// immediately; the run starts on the first click or tap.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    game::mount(GameConfig::fullscreen())
}

/// Mount the embeddable variant (320x480 canvas) used inside iframes.
#[wasm_bindgen]
pub fn start_embedded_game() -> Result<(), JsValue> {
    game::mount(GameConfig::embedded())
}
