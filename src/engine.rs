//! Game engine: lifecycle entry points around the simulation
//!
//! The engine owns the [`GameState`], the [`Tuning`] and the word source.
//! Hosts drive it with `tick` once per animation frame and forward filtered
//! keystrokes to `handle_key`. State changes are reported to subscribers as
//! [`GameEvent`]s after each entry point returns.

use crate::sim::{self, FallingWord, GameEvent, GamePhase, GameState, KeyInput, Particle, WordSource};
use crate::tuning::Tuning;

type Listener = Box<dyn FnMut(&GameEvent)>;

pub struct Engine<S: WordSource> {
    tuning: Tuning,
    state: GameState,
    source: S,
    listeners: Vec<Listener>,
}

impl<S: WordSource> Engine<S> {
    pub fn new(source: S, tuning: Tuning, seed: u64) -> Self {
        Self {
            state: GameState::new(seed, &tuning),
            tuning,
            source,
            listeners: Vec::new(),
        }
    }

    /// Set the drawing surface size before the first start
    pub fn initialize(&mut self, width: f32, height: f32) {
        sim::tick::resize(&mut self.state, &self.tuning, width, height);
        log::info!("Engine initialized at {}x{}", width, height);
    }

    /// Register a callback for state-change notifications
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Start a new game from Idle, or resume from Paused
    pub fn start(&mut self) {
        match self.state.phase {
            GamePhase::Idle => {
                self.state.reset(&self.tuning);
                self.state.category = self.source.category().map(str::to_string);
                self.state.phase = GamePhase::Active;
                log::info!("Game started");
                self.state.emit(GameEvent::Started);
            }
            GamePhase::Paused => self.resume(),
            GamePhase::Active => {}
        }
        self.dispatch();
    }

    /// Toggle between Active and Paused. Ignored while Idle.
    pub fn pause(&mut self) {
        match self.state.phase {
            GamePhase::Active => {
                self.state.phase = GamePhase::Paused;
                log::info!("Game paused");
                self.state.emit(GameEvent::Paused);
            }
            GamePhase::Paused => self.resume(),
            GamePhase::Idle => {}
        }
        self.dispatch();
    }

    /// End the run and reset everything. Ignored while Idle.
    pub fn stop(&mut self) {
        if self.state.phase == GamePhase::Idle {
            return;
        }
        self.state.phase = GamePhase::Idle;
        self.state.reset(&self.tuning);
        log::info!("Game stopped");
        self.state.emit(GameEvent::Stopped);
        self.dispatch();
    }

    /// Change the surface size; call between ticks
    pub fn resize(&mut self, width: f32, height: f32) {
        sim::tick::resize(&mut self.state, &self.tuning, width, height);
        self.dispatch();
    }

    /// Forward a keystroke that already passed the character filter
    pub fn handle_key(&mut self, key: KeyInput) {
        sim::handle_key(&mut self.state, &self.tuning, key);
        self.dispatch();
    }

    /// Advance one frame at host time `now_ms`
    pub fn tick(&mut self, now_ms: f64) {
        sim::tick(&mut self.state, &mut self.source, &self.tuning, now_ms);
        self.dispatch();
    }

    fn resume(&mut self) {
        self.state.phase = GamePhase::Active;
        // The next tick restarts the clock from its own timestamp
        self.state.last_frame_ms = None;
        log::info!("Game resumed");
        self.state.emit(GameEvent::Resumed);
    }

    fn dispatch(&mut self) {
        let events = self.state.take_events();
        for event in &events {
            for listener in &mut self.listeners {
                listener(event);
            }
        }
    }

    // === Read-only accessors ===

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn input(&self) -> &str {
        &self.state.input
    }

    pub fn active_word(&self) -> Option<&FallingWord> {
        self.state.active_word()
    }

    pub fn words(&self) -> &[FallingWord] {
        &self.state.words
    }

    pub fn particles(&self) -> &[Particle] {
        &self.state.particles
    }

    pub fn fall_speed(&self) -> f32 {
        self.state.fall_speed
    }

    pub fn spawn_delay_ms(&self) -> f64 {
        self.state.spawn_delay_ms
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the word source, e.g. to switch category
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Serialize the current state for a presentation layer
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.state)
    }
}
