//! Fixed conversion tables: PR to relay pace, terrain and fatigue multipliers.

use crate::{
    config::PaceConfig,
    models::{Difficulty, PrDistance},
};

/// Multiplier used if a clamped fatigue level somehow misses the table.
const FATIGUE_FALLBACK: f64 = 1.07;

pub const MIN_FATIGUE: i32 = 1;
pub const MAX_FATIGUE: i32 = 5;

#[derive(Debug, Clone, Default)]
pub struct PaceModel {
    config: PaceConfig,
}

impl PaceModel {
    pub fn new(config: PaceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PaceConfig {
        &self.config
    }

    /// Converts a personal record into an expected relay pace in minutes per mile.
    ///
    /// Callers guarantee `pr_seconds > 0`.
    pub fn pr_to_relay_pace(&self, distance: PrDistance, pr_seconds: f64) -> f64 {
        let race_pace = pr_seconds / 60.0 / distance.miles();
        race_pace * self.relay_adjustment(distance)
    }

    pub fn relay_adjustment(&self, distance: PrDistance) -> f64 {
        let table = &self.config.relay_adjustment;
        match distance {
            PrDistance::FiveK => table.five_k,
            PrDistance::TenK => table.ten_k,
            PrDistance::Half => table.half,
            PrDistance::Marathon => table.marathon,
        }
    }

    pub fn terrain_multiplier(&self, difficulty: &Difficulty) -> f64 {
        let table = &self.config.terrain;
        match difficulty {
            Difficulty::Easy => table.easy,
            Difficulty::Medium => table.medium,
            Difficulty::Hard => table.hard,
            Difficulty::ExtraHard => table.extra_hard,
            Difficulty::Unknown(_) => 1.0,
        }
    }

    /// Clamps `level` into 1..=5 and looks up its multiplier.
    pub fn fatigue_multiplier(&self, level: i32) -> f64 {
        let clamped = level.clamp(MIN_FATIGUE, MAX_FATIGUE);
        self.config
            .fatigue
            .0
            .get((clamped - MIN_FATIGUE) as usize)
            .copied()
            .unwrap_or(FATIGUE_FALLBACK)
    }
}
