//! Schedule projection: chained start/end estimates for every unfinished leg.

use std::collections::HashMap;

use serde::Serialize;
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::{
    models::{Leg, LegStatus, Runner},
    pace_model::PaceModel,
    pace_predictor::PacePredictor,
};

pub const UNASSIGNED_RUNNER_NAME: &str = "Unassigned";

/// Projected timing for one leg that has not yet finished.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegEstimate {
    pub leg_number: u32,
    pub leg_id: Uuid,
    pub runner_id: Option<Uuid>,
    pub runner_name: String,
    pub distance: f64,
    /// Minutes per mile.
    pub predicted_pace: f64,
    /// Seconds.
    pub estimated_duration: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub estimated_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub estimated_end: OffsetDateTime,
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduleProjector<'a> {
    predictor: PacePredictor<'a>,
}

impl<'a> ScheduleProjector<'a> {
    pub fn new(model: &'a PaceModel) -> Self {
        Self {
            predictor: PacePredictor::new(model),
        }
    }

    /// Projects every leg that has not completed, chaining each estimate's
    /// start off the previous one's end.
    ///
    /// The clock is anchored at `race_start` and snaps to recorded timestamps
    /// along the way: a completed leg's `end_time` and the active leg's
    /// `start_time`. Returns nothing until the race has a start time.
    pub fn compute_estimates(
        &self,
        legs: &[Leg],
        runners: &[Runner],
        race_start: Option<OffsetDateTime>,
    ) -> Vec<LegEstimate> {
        let Some(race_start) = race_start else {
            return Vec::new();
        };

        let mut sorted = legs.to_vec();
        sorted.sort_by_key(|l| l.leg_number);
        let runner_map: HashMap<Uuid, &Runner> = runners.iter().map(|r| (r.id, r)).collect();
        let unassigned_pace = self.predictor.model().config().unassigned_pace;

        let mut estimates = Vec::with_capacity(sorted.len());
        let mut clock = race_start;

        for leg in &sorted {
            match leg.status {
                LegStatus::Completed => {
                    if let Some(end) = leg.end_time {
                        clock = end;
                        continue;
                    }
                }
                LegStatus::Active => {
                    if let Some(start) = leg.start_time {
                        clock = start;
                    }
                }
                LegStatus::Upcoming => {}
            }

            let runner = leg.runner_id.and_then(|id| runner_map.get(&id).copied());
            let (pace, runner_name) = match runner {
                Some(r) => (self.predictor.predict_pace(r, leg, &sorted), r.name.clone()),
                None => (unassigned_pace, UNASSIGNED_RUNNER_NAME.to_string()),
            };

            let duration = pace * leg.distance * 60.0;
            let estimated_end = clock + Duration::seconds_f64(duration);

            debug!(
                leg = leg.leg_number,
                runner = %runner_name,
                pace,
                duration,
                "projected leg"
            );

            estimates.push(LegEstimate {
                leg_number: leg.leg_number,
                leg_id: leg.id,
                runner_id: leg.runner_id,
                runner_name,
                distance: leg.distance,
                predicted_pace: pace,
                estimated_duration: duration,
                estimated_start: clock,
                estimated_end,
            });

            clock = estimated_end;
        }

        estimates
    }
}

pub fn estimated_finish(estimates: &[LegEstimate]) -> Option<OffsetDateTime> {
    estimates.last().map(|e| e.estimated_end)
}

/// Miles across every leg.
pub fn total_distance(legs: &[Leg]) -> f64 {
    legs.iter().map(|l| l.distance).sum()
}

pub fn completed_distance(legs: &[Leg]) -> f64 {
    legs.iter()
        .filter(|l| l.status == LegStatus::Completed)
        .map(|l| l.distance)
        .sum()
}
