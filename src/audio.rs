//! Audio system using Web Audio API
//!
//! Every effect is a short list of oscillator tones, so no sound files ship
//! with the game.

use web_sys::{AudioContext, AudioContextState, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Keystroke extended the match
    KeyCorrect,
    /// Keystroke rejected, buffer discarded
    KeyWrong,
    WordGuessed,
    WordMissed,
    LevelUp,
}

impl SoundEffect {
    /// Sound to play for an engine event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::InputChanged { input } if !input.is_empty() => Some(Self::KeyCorrect),
            GameEvent::KeyRejected { .. } => Some(Self::KeyWrong),
            GameEvent::WordGuessed { .. } => Some(Self::WordGuessed),
            GameEvent::WordMissed { .. } => Some(Self::WordMissed),
            GameEvent::LevelUp { .. } => Some(Self::LevelUp),
            _ => None,
        }
    }

    fn tones(self) -> &'static [Tone] {
        match self {
            Self::KeyCorrect => KEY_CORRECT,
            Self::KeyWrong => KEY_WRONG,
            Self::WordGuessed => WORD_GUESSED,
            Self::WordMissed => WORD_MISSED,
            Self::LevelUp => LEVEL_UP,
        }
    }
}

const KEY_CORRECT: &[Tone] = &[Tone::new(OscillatorType::Triangle, 660.0, 0.0, 0.05, 0.15)];

const KEY_WRONG: &[Tone] = &[Tone::new(OscillatorType::Sawtooth, 140.0, 0.0, 0.15, 0.25).slide(90.0)];

/// Rising chime over a bass pop
const WORD_GUESSED: &[Tone] = &[
    Tone::new(OscillatorType::Sine, 600.0, 0.0, 0.15, 0.25),
    Tone::new(OscillatorType::Sine, 800.0, 0.08, 0.15, 0.25),
    Tone::new(OscillatorType::Sine, 1000.0, 0.16, 0.15, 0.25),
    Tone::new(OscillatorType::Sine, 80.0, 0.0, 0.12, 0.3),
];

const WORD_MISSED: &[Tone] = &[Tone::new(OscillatorType::Sine, 300.0, 0.0, 0.6, 0.4).slide(40.0)];

const LEVEL_UP: &[Tone] = &[
    Tone::new(OscillatorType::Triangle, 400.0, 0.0, 0.4, 0.3),
    Tone::new(OscillatorType::Triangle, 500.0, 0.1, 0.4, 0.3),
    Tone::new(OscillatorType::Triangle, 600.0, 0.2, 0.4, 0.3),
    Tone::new(OscillatorType::Triangle, 800.0, 0.3, 0.4, 0.3),
];

const MASTER_VOLUME: f32 = 0.8;

/// One oscillator note with an exponential decay
#[derive(Debug, Clone, Copy)]
struct Tone {
    wave: OscillatorType,
    freq: f32,
    /// Pitch at the end of the note, for slides
    end_freq: Option<f32>,
    /// Seconds after the effect starts
    delay: f64,
    /// Seconds until the gain has decayed
    decay: f64,
    /// Peak gain before master volume
    gain: f32,
}

impl Tone {
    const fn new(wave: OscillatorType, freq: f32, delay: f64, decay: f64, gain: f32) -> Self {
        Self {
            wave,
            freq,
            end_freq: None,
            delay,
            decay,
            gain,
        }
    }

    const fn slide(mut self, to: f32) -> Self {
        self.end_freq = Some(to);
        self
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, muted: false }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn play(&self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let start = ctx.current_time();
        for tone in effect.tones() {
            if self.schedule(ctx, tone, start).is_none() {
                log::debug!("Dropped {:?} tone at {} Hz", effect, tone.freq);
            }
        }
    }

    fn schedule(&self, ctx: &AudioContext, tone: &Tone, start: f64) -> Option<()> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;
        osc.set_type(tone.wave);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        let t = start + tone.delay;
        let end = t + tone.decay;
        osc.frequency().set_value_at_time(tone.freq, t).ok()?;
        if let Some(to) = tone.end_freq {
            osc.frequency().exponential_ramp_to_value_at_time(to, end).ok()?;
        }
        gain.gain().set_value_at_time(tone.gain * MASTER_VOLUME, t).ok()?;
        gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok()?;

        osc.start_with_when(t).ok()?;
        osc.stop_with_when(end + 0.05).ok()?;
        Some(())
    }
}
