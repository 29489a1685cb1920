//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Host timestamps come in through `tick`, nothing reads a clock
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod matcher;
pub mod particle;
pub mod source;
pub mod state;
pub mod tick;
pub mod word;

pub use matcher::{is_complete_match, is_partial_match, matched_prefix_len, normalize};
pub use particle::Particle;
pub use source::{CharacterSet, ImageRef, KeyInput, WordEntry, WordSource};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{handle_key, tick};
pub use word::FallingWord;
