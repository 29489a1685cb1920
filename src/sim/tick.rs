//! Per-frame simulation tick and keystroke handling
//!
//! Core game loop that advances the board one frame at a time.

use glam::Vec2;

use super::matcher::{is_complete_match, is_partial_match};
use super::particle::{Particle, advance_all};
use super::source::{KeyInput, WordSource};
use super::state::{GameEvent, GamePhase, GameState};
use super::word::FallingWord;
use crate::tuning::Tuning;

/// Advance the game by one frame at host time `now_ms`
pub fn tick(state: &mut GameState, source: &mut dyn WordSource, tuning: &Tuning, now_ms: f64) {
    // Don't tick unless running
    if state.phase != GamePhase::Active {
        return;
    }

    advance_clock(state, tuning, now_ms);
    check_category(state, source);

    // Spawn only when nothing is falling; this is the single place the
    // one-word-on-screen rule is enforced.
    if state.falling_count() == 0 && spawn_due(state) {
        spawn_word(state, source);
    }

    update_words(state, tuning);
    advance_all(&mut state.particles);
    update_difficulty(state, tuning);
}

/// Apply one filtered keystroke
pub fn handle_key(state: &mut GameState, tuning: &Tuning, key: KeyInput) {
    if state.phase != GamePhase::Active {
        return;
    }

    let ch = match key {
        KeyInput::Clear => {
            if !state.input.is_empty() {
                state.input.clear();
                state.emit(GameEvent::InputChanged {
                    input: String::new(),
                });
            }
            return;
        }
        KeyInput::Char(ch) => ch,
    };

    let Some(idx) = state.words.iter().position(|w| w.is_falling()) else {
        return;
    };

    let mut candidate = state.input.clone();
    candidate.push(ch);

    if is_partial_match(&candidate, &state.words[idx].text) {
        state.input = candidate;
        state.emit(GameEvent::InputChanged {
            input: state.input.clone(),
        });
        if is_complete_match(&state.input, &state.words[idx].text) {
            on_word_guessed(state, tuning, idx);
        }
    } else {
        // One wrong key discards the whole buffer
        log::debug!("Rejected key {:?} after {:?}", ch, state.input);
        state.input.clear();
        state.emit(GameEvent::KeyRejected { key: ch });
        deduct(state, tuning.wrong_key_penalty);
    }
}

/// Change the surface size between ticks
pub fn resize(state: &mut GameState, tuning: &Tuning, width: f32, height: f32) {
    let old = state.surface;
    if old.x > 0.0 && old.y > 0.0 {
        let sx = width / old.x;
        let sy = height / old.y;
        for word in &mut state.words {
            word.rescale(sx, sy);
        }
        for particle in &mut state.particles {
            particle.pos *= Vec2::new(sx, sy);
        }
    }
    state.surface = Vec2::new(width, height);
    log::info!("Surface resized to {}x{}", width, height);

    // Base speed follows surface height
    apply_fall_speed(state, tuning);
}

/// Feed the host frame delta into the game clock
fn advance_clock(state: &mut GameState, tuning: &Tuning, now_ms: f64) {
    let delta = match state.last_frame_ms {
        Some(prev) => (now_ms - prev).clamp(0.0, tuning.max_frame_gap_ms),
        // First tick after start/resume: paused time is not replayed
        None => 0.0,
    };
    state.last_frame_ms = Some(now_ms);
    state.clock_ms += delta;
}

/// Clear the board if the word source switched category
fn check_category(state: &mut GameState, source: &dyn WordSource) {
    let current = source.category();
    if state.category.as_deref() == current {
        return;
    }

    log::info!(
        "Category changed from {:?} to {:?}, clearing board",
        state.category,
        current
    );
    state.category = current.map(str::to_string);
    state.clear_board();
    let category = state.category.clone();
    state.emit(GameEvent::CategoryChanged { category });
}

fn spawn_due(state: &GameState) -> bool {
    match state.last_spawn_ms {
        None => true,
        Some(last) => state.clock_ms - last > state.spawn_delay_ms,
    }
}

fn spawn_word(state: &mut GameState, source: &mut dyn WordSource) {
    let Some(entry) = source.next_word() else {
        log::warn!("Word source has nothing to spawn, retrying next tick");
        return;
    };

    let id = state.next_entity_id();
    let x = state.surface.x / 2.0;
    let word = FallingWord::new(id, &entry.text, x, entry.image, state.fall_speed);
    log::info!("Spawned word {:?} at speed {:.2}", word.text, word.fall_speed);

    state.emit(GameEvent::WordSpawned {
        text: word.text.clone(),
    });
    state.words.push(word);
    state.last_spawn_ms = Some(state.clock_ms);
}

/// Move words, drop misses and drained explosions
fn update_words(state: &mut GameState, tuning: &Tuning) {
    let bottom = state.surface.y;
    let margin = tuning.off_screen_margin;
    let mut missed = Vec::new();

    state.words.retain_mut(|word| {
        word.advance();
        if word.is_falling() && word.is_off_screen(bottom, margin) {
            missed.push(word.text.clone());
            return false;
        }
        !word.is_drained()
    });

    for text in missed {
        log::info!("Word {:?} fell off screen", text);
        let penalty = tuning.miss_penalty;
        state.emit(GameEvent::WordMissed { text, penalty });
        if !state.input.is_empty() {
            state.input.clear();
            state.emit(GameEvent::InputChanged {
                input: String::new(),
            });
        }
        deduct(state, penalty);
    }
}

fn on_word_guessed(state: &mut GameState, tuning: &Tuning, idx: usize) {
    let points = {
        let word = &state.words[idx];
        tuning.points_for(&word.text, word.pos.y, state.surface.y)
    };
    let pos = state.words[idx].pos;
    let text = state.words[idx].text.clone();

    state.score = state.score.saturating_add(points);
    state.words[idx].explode(tuning.word_burst, tuning.particle_life, &mut state.rng);
    let burst = Particle::burst(pos, tuning.guess_burst, tuning.particle_life, &mut state.rng);
    state.particles.extend(burst);
    state.input.clear();

    log::info!("Word guessed: {}, +{} points", text, points);
    state.emit(GameEvent::WordGuessed { text, points });
    state.emit(GameEvent::InputChanged {
        input: String::new(),
    });
    let score = state.score;
    state.emit(GameEvent::ScoreChanged { score });

    update_difficulty(state, tuning);
}

/// Subtract a penalty without going below zero
fn deduct(state: &mut GameState, penalty: u64) {
    if penalty == 0 || state.score == 0 {
        return;
    }
    state.score = state.score.saturating_sub(penalty);
    let score = state.score;
    state.emit(GameEvent::ScoreChanged { score });
}

/// Raise the level when the score crosses a tier boundary. The level never
/// drops, so penalties cannot make the game easier.
fn update_difficulty(state: &mut GameState, tuning: &Tuning) {
    let level = tuning.level_for_score(state.score);
    if level > state.level {
        state.level = level;
        state.spawn_delay_ms = tuning.spawn_delay_ms(level);
        log::info!(
            "Level up to {} (spawn delay {} ms)",
            level,
            state.spawn_delay_ms
        );
        state.emit(GameEvent::LevelUp { level });
    }
    apply_fall_speed(state, tuning);
}

/// Push the level's fall speed onto every falling word
fn apply_fall_speed(state: &mut GameState, tuning: &Tuning) {
    state.fall_speed = tuning.fall_speed(state.level, state.surface.y);
    for word in state.words.iter_mut().filter(|w| w.is_falling()) {
        word.fall_speed = state.fall_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::source::WordEntry;
    use crate::tuning::Scoring;

    struct Fixed(Option<&'static str>);

    impl WordSource for Fixed {
        fn next_word(&mut self) -> Option<WordEntry> {
            self.0.map(|w| WordEntry::new(w, "img.png"))
        }
    }

    fn active_state(tuning: &Tuning) -> GameState {
        let mut state = GameState::new(12345, tuning);
        state.phase = GamePhase::Active;
        state
    }

    #[test]
    fn test_tick_spawns_centered_word() {
        let tuning = Tuning::default();
        let mut state = active_state(&tuning);
        let mut source = Fixed(Some("moscow"));

        tick(&mut state, &mut source, &tuning, 0.0);
        assert_eq!(state.words.len(), 1);
        let word = &state.words[0];
        assert_eq!(word.text, "MOSCOW");
        assert_eq!(word.pos.x, 400.0);
        assert_eq!(word.pos.y, word.fall_speed);
        assert_eq!(state.last_spawn_ms, Some(0.0));
    }

    #[test]
    fn test_tick_without_word_retries() {
        let tuning = Tuning::default();
        let mut state = active_state(&tuning);
        let mut source = Fixed(None);

        tick(&mut state, &mut source, &tuning, 0.0);
        assert!(state.words.is_empty());
        assert_eq!(state.last_spawn_ms, None);

        source.0 = Some("paris");
        tick(&mut state, &mut source, &tuning, 16.0);
        assert_eq!(state.words.len(), 1);
    }

    #[test]
    fn test_tick_ignored_when_idle() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        let mut source = Fixed(Some("paris"));
        tick(&mut state, &mut source, &tuning, 0.0);
        assert!(state.words.is_empty());
        assert_eq!(state.clock_ms, 0.0);
    }

    #[test]
    fn test_clock_clamps_large_gaps() {
        let tuning = Tuning::default();
        let mut state = active_state(&tuning);
        let mut source = Fixed(None);
        tick(&mut state, &mut source, &tuning, 1000.0);
        tick(&mut state, &mut source, &tuning, 1016.0);
        tick(&mut state, &mut source, &tuning, 60_000.0);
        assert_eq!(state.clock_ms, 16.0 + tuning.max_frame_gap_ms);
    }

    #[test]
    fn test_wrong_key_applies_penalty() {
        let tuning = Tuning {
            wrong_key_penalty: 5,
            ..Tuning::default()
        };
        let mut state = active_state(&tuning);
        let mut source = Fixed(Some("moscow"));
        tick(&mut state, &mut source, &tuning, 0.0);
        state.score = 12;

        handle_key(&mut state, &tuning, KeyInput::Char('M'));
        handle_key(&mut state, &tuning, KeyInput::Char('X'));
        assert_eq!(state.input, "");
        assert_eq!(state.score, 7);

        handle_key(&mut state, &tuning, KeyInput::Char('Q'));
        handle_key(&mut state, &tuning, KeyInput::Char('Q'));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_clear_key_empties_buffer_only() {
        let tuning = Tuning::default();
        let mut state = active_state(&tuning);
        let mut source = Fixed(Some("moscow"));
        tick(&mut state, &mut source, &tuning, 0.0);

        handle_key(&mut state, &tuning, KeyInput::Char('m'));
        handle_key(&mut state, &tuning, KeyInput::Char('o'));
        assert_eq!(state.input, "mo");
        handle_key(&mut state, &tuning, KeyInput::Clear);
        assert_eq!(state.input, "");
        assert_eq!(state.falling_count(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_key_without_word_is_ignored() {
        let tuning = Tuning::default();
        let mut state = active_state(&tuning);
        handle_key(&mut state, &tuning, KeyInput::Char('A'));
        assert_eq!(state.input, "");
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_guess_explodes_and_bursts() {
        let tuning = Tuning::default();
        let mut state = active_state(&tuning);
        let mut source = Fixed(Some("rome"));
        tick(&mut state, &mut source, &tuning, 0.0);
        let y = state.words[0].pos.y;

        for ch in "ROME".chars() {
            handle_key(&mut state, &tuning, KeyInput::Char(ch));
        }

        assert!(state.words[0].exploding);
        assert_eq!(state.words[0].particles.len(), tuning.word_burst);
        assert_eq!(state.particles.len(), tuning.guess_burst);
        assert_eq!(state.input, "");
        assert_eq!(state.score, tuning.points_for("ROME", y, 600.0));
    }

    #[test]
    fn test_huge_award_saturates_score() {
        let tuning = Tuning {
            scoring: Scoring::LengthAndDistance {
                points_per_letter: u64::MAX / 2,
                distance_divisor: 1.0,
            },
            ..Tuning::default()
        };
        assert!(tuning.validate().is_ok());
        let mut state = active_state(&tuning);
        let mut source = Fixed(Some("rome"));
        tick(&mut state, &mut source, &tuning, 0.0);
        state.score = 1000;

        for ch in "ROME".chars() {
            handle_key(&mut state, &tuning, KeyInput::Char(ch));
        }
        assert_eq!(state.score, u64::MAX);
        assert!(state.level > 1);
    }

    #[test]
    fn test_resize_scales_words_and_speed() {
        let tuning = Tuning::default();
        let mut state = active_state(&tuning);
        let mut source = Fixed(Some("oslo"));
        tick(&mut state, &mut source, &tuning, 0.0);
        state.words[0].pos.y = 300.0;

        resize(&mut state, &tuning, 400.0, 1200.0);
        assert_eq!(state.words[0].pos, Vec2::new(200.0, 600.0));
        assert_eq!(state.fall_speed, tuning.fall_speed(1, 1200.0));
        assert_eq!(state.words[0].fall_speed, state.fall_speed);
    }
}
