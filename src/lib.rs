//! Word Fall - a falling-word typing arcade game
//!
//! Core modules:
//! - `sim`: Game loop, input matching, words and particles (no rendering)
//! - `engine`: Lifecycle entry points and event dispatch around `sim`
//! - `tuning`: Data-driven game balance
//! - `library`: Word lists loaded from text files (a `WordSource`)
//! - `platform`: Keyboard layouts and key translation
//! - `renderer`: Canvas 2D presentation (wasm only)

pub mod engine;
pub mod error;
pub mod library;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod audio;

pub use engine::Engine;
pub use error::LoadError;
pub use library::{Library, WordList, WordRecord};
pub use platform::{KeyLayout, translate_key};
pub use sim::{CharacterSet, GameEvent, GamePhase, GameState, KeyInput, WordEntry, WordSource};
pub use tuning::{Scoring, Tuning};

/// Game configuration constants
pub mod consts {
    /// Default surface size when the host never calls `initialize`
    pub const DEFAULT_SURFACE_WIDTH: f32 = 800.0;
    pub const DEFAULT_SURFACE_HEIGHT: f32 = 600.0;

    /// Nominal frame interval in milliseconds (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Particles spawned by a word's own explosion
    pub const WORD_BURST: usize = 20;
    /// Particles spawned by the engine on a guess
    pub const GUESS_BURST: usize = 15;

    /// Particle lifespan in ticks
    pub const PARTICLE_LIFE: u32 = 30;
    /// Particle radius range (pixels)
    pub const PARTICLE_MIN_RADIUS: f32 = 2.0;
    pub const PARTICLE_MAX_RADIUS: f32 = 7.0;
    /// Maximum absolute particle velocity per axis (pixels/tick)
    pub const PARTICLE_MAX_SPEED: f32 = 2.0;
}
