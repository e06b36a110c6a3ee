//! Configuration types for test data generation.

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, macros::datetime};

/// Configuration for a simulated race day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Display name for the generated race.
    pub race_name: String,

    /// Number of runners on the team.
    pub runner_count: usize,

    /// Legs each runner covers; the course has `runner_count * legs_per_runner` legs.
    pub legs_per_runner: usize,

    /// When the gun goes off.
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,

    /// Coefficient of variation of actual pace around the predicted pace.
    pub pace_variance: f64,

    /// Probability that a runner reports a fatigue level at handoff.
    pub fatigue_report_rate: f64,

    /// RNG seed for reproducible runs.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            race_name: "Simulated Relay".to_string(),
            runner_count: 12,
            legs_per_runner: 3,
            start_time: datetime!(2025-08-22 07:00 UTC),
            pace_variance: 0.06,
            fatigue_report_rate: 0.8,
            seed: 12345,
        }
    }
}

/// Relative frequency of each terrain category on a generated course.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DifficultyMix {
    pub easy: f64,
    pub medium: f64,
    pub hard: f64,
    pub extra_hard: f64,
}

impl Default for DifficultyMix {
    fn default() -> Self {
        Self {
            easy: 0.3,
            medium: 0.4,
            hard: 0.2,
            extra_hard: 0.1,
        }
    }
}

impl DifficultyMix {
    /// A course with no climbing at all.
    pub fn flat() -> Self {
        Self {
            easy: 0.5,
            medium: 0.5,
            hard: 0.0,
            extra_hard: 0.0,
        }
    }

    /// Mountain course: mostly hard and extra hard legs.
    pub fn mountain() -> Self {
        Self {
            easy: 0.05,
            medium: 0.25,
            hard: 0.4,
            extra_hard: 0.3,
        }
    }

    pub fn weights(&self) -> [f64; 4] {
        [self.easy, self.medium, self.hard, self.extra_hard]
    }
}
