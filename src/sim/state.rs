//! Game state and core simulation types
//!
//! Everything the engine owns lives in [`GameState`]. The presentation layer
//! only ever reads it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particle::Particle;
use super::word::FallingWord;
use crate::consts::*;
use crate::tuning::Tuning;

/// Lifecycle phase of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started, or stopped
    #[default]
    Idle,
    /// Ticking and accepting keys
    Active,
    /// Frozen; resumes exactly where it left off
    Paused,
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    Resumed,
    Paused,
    /// Game stopped and state reset; the surface should be cleared
    Stopped,
    /// The word source switched category and the board was cleared
    CategoryChanged { category: Option<String> },
    WordSpawned { text: String },
    WordGuessed { text: String, points: u64 },
    /// A word left the screen unguessed
    WordMissed { text: String, penalty: u64 },
    /// The input buffer changed (typed, cleared, or consumed by a guess)
    InputChanged { input: String },
    /// A keystroke did not match and the buffer was discarded
    KeyRejected { key: char },
    ScoreChanged { score: u64 },
    LevelUp { level: u32 },
}

fn seeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed for particle and layout randomness
    pub seed: u64,
    #[serde(skip, default = "seeded_rng")]
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Difficulty tier, starts at 1 and never decreases during a run
    pub level: u32,
    /// Fall speed for the current level (px/tick)
    pub fall_speed: f32,
    pub spawn_delay_ms: f64,
    /// Accumulated keystrokes for the active word
    pub input: String,
    /// Words on screen (at most one of them not exploding)
    pub words: Vec<FallingWord>,
    /// Engine-owned particles from guess bursts
    pub particles: Vec<Particle>,
    /// Game time in milliseconds; does not advance while paused
    pub clock_ms: f64,
    /// Host timestamp of the previous tick, `None` right after start/resume
    pub last_frame_ms: Option<f64>,
    /// Game time of the last spawn, `None` when a spawn is due immediately
    pub last_spawn_ms: Option<f64>,
    /// Drawing surface size (width, height)
    pub surface: Vec2,
    /// Word source category the board was filled from
    pub category: Option<String>,
    next_id: u32,
    /// Events raised since the last dispatch
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle game state with the given seed
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let surface = Vec2::new(DEFAULT_SURFACE_WIDTH, DEFAULT_SURFACE_HEIGHT);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            fall_speed: tuning.fall_speed(1, surface.y),
            spawn_delay_ms: tuning.spawn_delay_ms(1),
            input: String::new(),
            words: Vec::new(),
            particles: Vec::new(),
            clock_ms: 0.0,
            last_frame_ms: None,
            last_spawn_ms: None,
            surface,
            category: None,
            next_id: 1,
            events: Vec::new(),
        }
    }

    /// Back to level 1 with an empty board. Keeps the seed, RNG stream,
    /// surface and phase.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.level = 1;
        self.fall_speed = tuning.fall_speed(1, self.surface.y);
        self.spawn_delay_ms = tuning.spawn_delay_ms(1);
        self.clock_ms = 0.0;
        self.last_frame_ms = None;
        self.clear_board();
    }

    /// Drop all words, particles and typed input; the next spawn is due now
    pub fn clear_board(&mut self) {
        self.words.clear();
        self.particles.clear();
        self.input.clear();
        self.last_spawn_ms = None;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The word currently eligible for guessing
    pub fn active_word(&self) -> Option<&FallingWord> {
        self.words.iter().find(|w| w.is_falling())
    }

    /// Number of non-exploding words (0 or 1)
    pub fn falling_count(&self) -> usize {
        self.words.iter().filter(|w| w.is_falling()).count()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the queued events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
