//! Race-day simulation.
//!
//! Runs a generated race leg by leg: each actual pace is drawn around the
//! engine's own prediction, the handoff is recorded through the race
//! workflow, and the schedule is re-projected so forecast drift can be
//! inspected step by step.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use thiserror::Error;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use relay::{
    errors::RelayError,
    models::{Race, RaceSnapshot},
    pace_model::PaceModel,
    pace_predictor::suggest_fatigue,
    project,
    schedule::estimated_finish,
};

use crate::config::SimConfig;
use crate::generators::{CourseGenerator, RunnerGenerator};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Relay error: {0}")]
    Relay(#[from] RelayError),

    #[error("Invalid pace variance: {0}")]
    InvalidVariance(f64),
}

/// One handoff in a simulated race.
#[derive(Debug, Clone)]
pub struct SimulationStep {
    pub leg_number: u32,
    pub runner_name: String,
    pub predicted_pace: f64,
    pub actual_pace: f64,
    pub reported_fatigue: Option<i32>,
    pub handoff_at: OffsetDateTime,
    /// Projected finish just before this leg started.
    pub finish_before: Option<OffsetDateTime>,
    /// Projected finish after this handoff was recorded.
    pub finish_after: Option<OffsetDateTime>,
}

#[derive(Debug)]
pub struct SimulationResult {
    pub snapshot: RaceSnapshot,
    pub steps: Vec<SimulationStep>,
    /// Projected finish at the gun, before any leg was run.
    pub initial_finish_estimate: Option<OffsetDateTime>,
    pub actual_finish: Option<OffsetDateTime>,
}

impl SimulationResult {
    /// Seconds between the gun-time forecast and the real finish; positive
    /// means the team finished later than predicted.
    pub fn forecast_error_seconds(&self) -> Option<i64> {
        match (self.initial_finish_estimate, self.actual_finish) {
            (Some(predicted), Some(actual)) => Some((actual - predicted).whole_seconds()),
            _ => None,
        }
    }
}

pub struct RaceSimulator {
    config: SimConfig,
    model: PaceModel,
}

impl RaceSimulator {
    pub fn new(config: SimConfig, model: PaceModel) -> Self {
        Self { config, model }
    }

    /// Generates a team and course and returns the race in setup.
    pub fn generate_race(&self, rng: &mut impl Rng) -> RaceSnapshot {
        let runners =
            RunnerGenerator::new().generate_team(self.config.runner_count, &self.model, rng);
        let runner_ids: Vec<_> = runners.iter().map(|r| r.id).collect();
        let legs =
            CourseGenerator::new().generate_legs(&runner_ids, self.config.legs_per_runner, rng);

        RaceSnapshot {
            race: Race::new(self.config.race_name.clone()),
            runners,
            legs,
        }
    }

    /// Starts `snapshot` and runs every leg to completion.
    pub fn run(
        &self,
        mut snapshot: RaceSnapshot,
        rng: &mut impl Rng,
    ) -> Result<SimulationResult, SimError> {
        let variance = Normal::new(1.0, self.config.pace_variance)
            .map_err(|_| SimError::InvalidVariance(self.config.pace_variance))?;

        snapshot.start_race(self.config.start_time)?;
        let initial_finish_estimate = estimated_finish(&project(&snapshot, &self.model));
        info!(
            race = %snapshot.race.name,
            legs = snapshot.legs.len(),
            finish = ?initial_finish_estimate,
            "simulation started"
        );

        let mut steps = Vec::with_capacity(snapshot.legs.len());

        while let Some(leg) = snapshot.active_leg() {
            let estimates = project(&snapshot, &self.model);
            let Some(current) = estimates.first() else {
                break;
            };
            let (leg_id, leg_number, start) = (
                leg.id,
                leg.leg_number,
                leg.start_time.unwrap_or(self.config.start_time),
            );

            // Day-to-day variance, clamped to keep outliers plausible
            let factor = variance.sample(rng).clamp(0.8, 1.3);
            let actual_pace = current.predicted_pace * factor;
            let handoff_at = start + Duration::seconds_f64(actual_pace * current.distance * 60.0);

            let reported_fatigue = if rng.r#gen::<f64>() < self.config.fatigue_report_rate {
                Some(self.sample_reported_fatigue(&snapshot, leg_number, handoff_at, rng))
            } else {
                None
            };

            let finish_before = estimated_finish(&estimates);
            let runner_name = current.runner_name.clone();
            let predicted_pace = current.predicted_pace;

            let completion = snapshot.complete_leg(leg_id, reported_fatigue, handoff_at)?;
            let finish_after = estimated_finish(&project(&snapshot, &self.model));

            debug!(
                leg = leg_number,
                predicted_pace,
                actual_pace = completion.actual_pace,
                "simulated handoff"
            );

            steps.push(SimulationStep {
                leg_number,
                runner_name,
                predicted_pace,
                actual_pace: completion.actual_pace,
                reported_fatigue,
                handoff_at,
                finish_before,
                finish_after,
            });
        }

        let actual_finish = snapshot.legs.iter().filter_map(|l| l.end_time).max();
        info!(finish = ?actual_finish, "simulation finished");

        Ok(SimulationResult {
            snapshot,
            steps,
            initial_finish_estimate,
            actual_finish,
        })
    }

    /// The runner's self-report: the system suggestion, off by one either way
    /// now and then.
    fn sample_reported_fatigue(
        &self,
        snapshot: &RaceSnapshot,
        leg_number: u32,
        at: OffsetDateTime,
        rng: &mut impl Rng,
    ) -> i32 {
        let runner_id = snapshot
            .legs
            .iter()
            .find(|l| l.leg_number == leg_number)
            .and_then(|l| l.runner_id);
        let prior = snapshot
            .legs
            .iter()
            .filter(|l| l.runner_id.is_some() && l.runner_id == runner_id && l.end_time.is_some())
            .count();
        let suggested = i32::from(suggest_fatigue(prior, Some(at)));
        (suggested + rng.gen_range(-1..=1)).clamp(1, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use relay::models::{LegStatus, RaceStatus};

    fn small_config() -> SimConfig {
        SimConfig {
            runner_count: 4,
            legs_per_runner: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_race() {
        let sim = RaceSimulator::new(small_config(), PaceModel::default());
        let mut rng = StdRng::seed_from_u64(7);
        let snapshot = sim.generate_race(&mut rng);

        assert_eq!(snapshot.runners.len(), 4);
        assert_eq!(snapshot.legs.len(), 12);
        assert_eq!(snapshot.race.status, RaceStatus::Setup);
        assert!(project(&snapshot, &PaceModel::default()).is_empty());
    }

    #[test]
    fn test_run_completes_every_leg() {
        let sim = RaceSimulator::new(small_config(), PaceModel::default());
        let mut rng = StdRng::seed_from_u64(12345);
        let snapshot = sim.generate_race(&mut rng);

        let result = sim.run(snapshot, &mut rng).unwrap();

        assert_eq!(result.steps.len(), 12);
        assert_eq!(result.snapshot.race.status, RaceStatus::Finished);
        assert!(
            result
                .snapshot
                .legs
                .iter()
                .all(|l| l.status == LegStatus::Completed && l.actual_pace.is_some())
        );
        assert!(result.initial_finish_estimate.is_some());
        assert_eq!(result.actual_finish, result.steps.last().map(|s| s.handoff_at));
        assert!(result.forecast_error_seconds().is_some());

        // Handoffs move strictly forward and the last one leaves nothing to project.
        for pair in result.steps.windows(2) {
            assert!(pair[1].handoff_at > pair[0].handoff_at);
        }
        assert_eq!(result.steps.last().unwrap().finish_after, None);
    }

    #[test]
    fn test_actual_paces_near_prediction() {
        let sim = RaceSimulator::new(small_config(), PaceModel::default());
        let mut rng = StdRng::seed_from_u64(99);
        let snapshot = sim.generate_race(&mut rng);
        let result = sim.run(snapshot, &mut rng).unwrap();

        for step in &result.steps {
            let ratio = step.actual_pace / step.predicted_pace;
            // Clamp bounds plus rounding to hundredths
            assert!(ratio > 0.79 && ratio < 1.31, "ratio {ratio} out of range");
        }
    }

    #[test]
    fn test_zero_variance_tracks_prediction() {
        let config = SimConfig {
            pace_variance: 0.0,
            fatigue_report_rate: 0.0,
            ..small_config()
        };
        let sim = RaceSimulator::new(config, PaceModel::default());
        let mut rng = StdRng::seed_from_u64(3);
        let snapshot = sim.generate_race(&mut rng);
        let result = sim.run(snapshot, &mut rng).unwrap();

        let first = &result.steps[0];
        assert_eq!(first.finish_before, result.initial_finish_estimate);
        assert!(result.steps.iter().all(|s| s.reported_fatigue.is_none()));
        for step in &result.steps {
            assert!((step.actual_pace - step.predicted_pace).abs() <= 0.005 + 1e-9);
        }
    }
}
