//! Data-driven game balance
//!
//! Every behavioural variant of the game (scoring rule, penalties, speed
//! curve, spawn pacing) is a field here rather than a code path. Hosts can
//! ship a JSON file; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::LoadError;

/// How a guessed word is scored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scoring {
    /// Same award for every word
    Flat { points: u64 },
    /// `letters * points_per_letter` plus a bonus for the distance the word
    /// still had to fall: `(height - y) / distance_divisor`
    LengthAndDistance {
        points_per_letter: u64,
        distance_divisor: f32,
    },
}

impl Default for Scoring {
    fn default() -> Self {
        Scoring::LengthAndDistance {
            points_per_letter: 10,
            distance_divisor: 10.0,
        }
    }
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Points awarded per guessed word
    pub scoring: Scoring,
    /// Points lost when a word falls off the screen
    pub miss_penalty: u64,
    /// Points lost on a rejected keystroke
    pub wrong_key_penalty: u64,

    /// Score needed per difficulty tier
    pub tier_size: u64,
    /// Surface height at which the base speed is 1 px/tick
    pub reference_height: f32,
    /// Bounds on the surface-derived base speed
    pub base_speed_min: f32,
    pub base_speed_max: f32,
    /// Extra fall speed per level above 1
    pub speed_per_level: f32,
    /// Hard cap on fall speed (px/tick)
    pub max_fall_speed: f32,

    /// Spawn delay at level 1
    pub spawn_delay_base_ms: f64,
    /// Spawn delay reduction per level above 1
    pub spawn_delay_step_ms: f64,
    /// Spawn delay floor
    pub spawn_delay_min_ms: f64,

    /// Distance below the surface a word travels before it counts as missed
    pub off_screen_margin: f32,
    /// Longest host frame gap fed into the game clock (tab stalls, debugger)
    pub max_frame_gap_ms: f64,

    pub word_burst: usize,
    pub guess_burst: usize,
    pub particle_life: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scoring: Scoring::default(),
            miss_penalty: 0,
            wrong_key_penalty: 0,

            tier_size: 1000,
            reference_height: 700.0,
            base_speed_min: 0.5,
            base_speed_max: 2.0,
            speed_per_level: 0.1,
            max_fall_speed: 1.5,

            spawn_delay_base_ms: 2000.0,
            spawn_delay_step_ms: 150.0,
            spawn_delay_min_ms: 800.0,

            off_screen_margin: 100.0,
            max_frame_gap_ms: 100.0,

            word_burst: WORD_BURST,
            guess_burst: GUESS_BURST,
            particle_life: PARTICLE_LIFE,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning file
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the difficulty curve
    pub fn validate(&self) -> Result<(), LoadError> {
        fn invalid(field: &'static str, reason: &str) -> Result<(), LoadError> {
            Err(LoadError::InvalidTuning {
                field,
                reason: reason.to_string(),
            })
        }

        match self.scoring {
            Scoring::LengthAndDistance {
                distance_divisor, ..
            } if !distance_divisor.is_finite() || distance_divisor < 1.0 => {
                return invalid("scoring.distance_divisor", "must be a finite value >= 1");
            }
            _ => {}
        }
        if self.tier_size == 0 {
            return invalid("tier_size", "must be at least 1");
        }
        if self.reference_height <= 0.0 {
            return invalid("reference_height", "must be positive");
        }
        if self.base_speed_min <= 0.0 || self.base_speed_min > self.base_speed_max {
            return invalid("base_speed_min", "must be positive and <= base_speed_max");
        }
        if self.speed_per_level < 0.0 {
            return invalid("speed_per_level", "must not be negative");
        }
        if self.max_fall_speed <= 0.0 {
            return invalid("max_fall_speed", "must be positive");
        }
        if self.spawn_delay_step_ms < 0.0 {
            return invalid("spawn_delay_step_ms", "must not be negative");
        }
        if self.spawn_delay_min_ms < 0.0 || self.spawn_delay_min_ms > self.spawn_delay_base_ms {
            return invalid(
                "spawn_delay_min_ms",
                "must be non-negative and <= spawn_delay_base_ms",
            );
        }
        if self.max_frame_gap_ms < 0.0 {
            return invalid("max_frame_gap_ms", "must not be negative");
        }
        if self.particle_life == 0 {
            return invalid("particle_life", "must be at least 1");
        }
        Ok(())
    }

    /// Level reached at a given score (1-based)
    pub fn level_for_score(&self, score: u64) -> u32 {
        let tier = score / self.tier_size.max(1);
        u32::try_from(tier).unwrap_or(u32::MAX - 1) + 1
    }

    /// Base fall speed for a surface height
    pub fn base_speed(&self, surface_height: f32) -> f32 {
        (surface_height / self.reference_height).clamp(self.base_speed_min, self.base_speed_max)
    }

    /// Fall speed at a level. Non-decreasing in `level`, capped at `max_fall_speed`.
    pub fn fall_speed(&self, level: u32, surface_height: f32) -> f32 {
        let boost = level.saturating_sub(1) as f32 * self.speed_per_level;
        (self.base_speed(surface_height) + boost).min(self.max_fall_speed)
    }

    /// Spawn delay at a level. Non-increasing in `level`, floored at `spawn_delay_min_ms`.
    pub fn spawn_delay_ms(&self, level: u32) -> f64 {
        let cut = level.saturating_sub(1) as f64 * self.spawn_delay_step_ms;
        (self.spawn_delay_base_ms - cut).max(self.spawn_delay_min_ms)
    }

    /// Points for guessing `text` while its top is at `y`
    pub fn points_for(&self, text: &str, y: f32, surface_height: f32) -> u64 {
        match self.scoring {
            Scoring::Flat { points } => points,
            Scoring::LengthAndDistance {
                points_per_letter,
                distance_divisor,
            } => {
                let letters = text.chars().count() as u64;
                // Float to int casts saturate, so a huge bonus caps at u64::MAX
                let bonus = ((surface_height - y).max(0.0) / distance_divisor).floor() as u64;
                letters.saturating_mul(points_per_letter).saturating_add(bonus)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let tuning = Tuning::from_json(r#"{ "tier_size": 300, "miss_penalty": 25 }"#).unwrap();
        assert_eq!(tuning.tier_size, 300);
        assert_eq!(tuning.miss_penalty, 25);
        assert_eq!(tuning.spawn_delay_base_ms, 2000.0);
    }

    #[test]
    fn test_from_json_flat_scoring() {
        let tuning =
            Tuning::from_json(r#"{ "scoring": { "kind": "flat", "points": 50 } }"#).unwrap();
        assert_eq!(tuning.scoring, Scoring::Flat { points: 50 });
        assert_eq!(tuning.points_for("MOSCOW", 10.0, 600.0), 50);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "tier_size": 0 }"#).unwrap_err();
        assert!(matches!(err, LoadError::InvalidTuning { field: "tier_size", .. }));

        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_rejects_tiny_or_non_finite_divisor() {
        for divisor in [1e-30, 0.5, f32::INFINITY, f32::NAN] {
            let tuning = Tuning {
                scoring: Scoring::LengthAndDistance {
                    points_per_letter: 10,
                    distance_divisor: divisor,
                },
                ..Tuning::default()
            };
            let err = tuning.validate().unwrap_err();
            assert!(matches!(
                err,
                LoadError::InvalidTuning {
                    field: "scoring.distance_divisor",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_points_saturate_instead_of_overflowing() {
        let tuning = Tuning {
            scoring: Scoring::LengthAndDistance {
                points_per_letter: u64::MAX / 2,
                distance_divisor: 1e-30,
            },
            ..Tuning::default()
        };
        assert_eq!(tuning.points_for("ROME", 0.0, 600.0), u64::MAX);

        let tuning = Tuning {
            scoring: Scoring::LengthAndDistance {
                points_per_letter: u64::MAX,
                distance_divisor: 10.0,
            },
            ..Tuning::default()
        };
        assert_eq!(tuning.points_for("ROME", 600.0, 600.0), u64::MAX);
    }

    #[test]
    fn test_length_and_distance_points() {
        let tuning = Tuning::default();
        // 6 letters * 10 + (600 - 100) / 10
        assert_eq!(tuning.points_for("MOSCOW", 100.0, 600.0), 110);
        // No bonus once below the surface
        assert_eq!(tuning.points_for("MOSCOW", 650.0, 600.0), 60);
    }

    #[test]
    fn test_fall_speed_is_capped_and_monotonic() {
        let tuning = Tuning::default();
        let mut last = 0.0;
        for level in 1..50 {
            let speed = tuning.fall_speed(level, 600.0);
            assert!(speed >= last);
            assert!(speed <= tuning.max_fall_speed);
            last = speed;
        }
        assert_eq!(last, tuning.max_fall_speed);
    }

    #[test]
    fn test_spawn_delay_floor() {
        let tuning = Tuning::default();
        assert_eq!(tuning.spawn_delay_ms(1), 2000.0);
        assert_eq!(tuning.spawn_delay_ms(2), 1850.0);
        assert_eq!(tuning.spawn_delay_ms(100), 800.0);
    }

    #[test]
    fn test_level_for_score() {
        let tuning = Tuning::default();
        assert_eq!(tuning.level_for_score(0), 1);
        assert_eq!(tuning.level_for_score(999), 1);
        assert_eq!(tuning.level_for_score(1000), 2);
        assert_eq!(tuning.level_for_score(3500), 4);
    }
}
