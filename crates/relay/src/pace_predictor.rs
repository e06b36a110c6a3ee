//! Per-leg pace prediction from in-race history, terrain and fatigue.

use time::OffsetDateTime;
use tracing::debug;

use crate::{
    models::{Leg, LegStatus, Runner},
    pace_model::PaceModel,
};

/// Blend weights for a runner's first and second completed legs.
///
/// Tuned for three legs per runner; only the first two results ever feed
/// the blend.
const FIRST_LEG_WEIGHT: f64 = 0.4;
const SECOND_LEG_WEIGHT: f64 = 0.6;

/// Hours of the night (local to the timestamp) that add a fatigue point.
const NIGHT_START_HOUR: u8 = 22;
const NIGHT_END_HOUR: u8 = 5;

/// Suggests a fatigue level from how many legs the runner has already run.
///
/// A time of day falling at night adds one level, capped at 5.
pub fn suggest_fatigue(runner_leg_index: usize, time_of_day: Option<OffsetDateTime>) -> u8 {
    let base: u8 = match runner_leg_index {
        0 => 1,
        1 => 3,
        _ => 4,
    };

    match time_of_day {
        Some(t) if t.hour() >= NIGHT_START_HOUR || t.hour() < NIGHT_END_HOUR => (base + 1).min(5),
        _ => base,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PacePredictor<'a> {
    model: &'a PaceModel,
}

impl<'a> PacePredictor<'a> {
    pub fn new(model: &'a PaceModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &'a PaceModel {
        self.model
    }

    /// Predicts the pace in minutes per mile for `target` run by `runner`.
    ///
    /// `all_legs` is every leg of the race; the runner's completed legs are
    /// picked out of it as history.
    pub fn predict_pace(&self, runner: &Runner, target: &Leg, all_legs: &[Leg]) -> f64 {
        let mut history: Vec<(&Leg, f64)> = all_legs
            .iter()
            .filter(|l| l.runner_id == Some(runner.id) && l.status == LegStatus::Completed)
            .filter_map(|l| l.actual_pace.map(|pace| (l, pace)))
            .collect();
        history.sort_by_key(|(l, _)| l.leg_number);

        let terrain = self.model.terrain_multiplier(&target.difficulty);

        if history.is_empty() {
            return runner.estimated_pace * terrain;
        }

        // Strip each leg's own terrain so the paces are comparable.
        let normalized: Vec<f64> = history
            .iter()
            .map(|(leg, pace)| pace / self.model.terrain_multiplier(&leg.difficulty))
            .collect();

        let base = match normalized.as_slice() {
            [only] => *only,
            [first, second, ..] => first * FIRST_LEG_WEIGHT + second * SECOND_LEG_WEIGHT,
            [] => runner.estimated_pace,
        };

        let fatigue = target
            .fatigue_level
            .or(target.system_suggested_fatigue)
            .unwrap_or_else(|| suggest_fatigue(history.len(), None));

        let predicted = base * terrain * self.model.fatigue_multiplier(i32::from(fatigue));

        debug!(
            runner = %runner.name,
            leg = target.leg_number,
            history = history.len(),
            base,
            fatigue,
            predicted,
            "predicted leg pace"
        );

        predicted
    }
}
