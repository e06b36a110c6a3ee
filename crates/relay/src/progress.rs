//! Read-only race views derived from a snapshot and its projected estimates.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    models::{Leg, LegStatus, Race, RaceStatus, Runner},
    schedule::{LegEstimate, completed_distance, estimated_finish, total_distance},
};

/// Overall race progress.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceProgress {
    pub total_distance: f64,
    pub completed_distance: f64,
    /// 0 to 100.
    pub percent_complete: f64,
    pub completed_legs: usize,
    pub total_legs: usize,
    #[serde(with = "time::serde::rfc3339::option")]
    pub estimated_finish: Option<OffsetDateTime>,
    /// Seconds from race start to the last handoff, once the race has finished.
    pub final_elapsed_seconds: Option<i64>,
}

impl RaceProgress {
    pub fn from_snapshot(race: &Race, legs: &[Leg], estimates: &[LegEstimate]) -> Self {
        let total = total_distance(legs);
        let completed = completed_distance(legs);
        let percent_complete = if total > 0.0 {
            completed / total * 100.0
        } else {
            0.0
        };

        let final_elapsed_seconds = match (race.status, race.start_time) {
            (RaceStatus::Finished, Some(start)) => legs
                .iter()
                .filter_map(|l| l.end_time)
                .max()
                .map(|last| (last - start).whole_seconds()),
            _ => None,
        };

        Self {
            total_distance: total,
            completed_distance: completed,
            percent_complete,
            completed_legs: legs
                .iter()
                .filter(|l| l.status == LegStatus::Completed)
                .count(),
            total_legs: legs.len(),
            estimated_finish: estimated_finish(estimates),
            final_elapsed_seconds,
        }
    }
}

/// Per-runner status line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunnerSummary {
    pub runner_id: Uuid,
    pub name: String,
    pub completed_legs: usize,
    pub assigned_legs: usize,
    /// Mean recorded pace over completed legs, minutes per mile.
    pub average_pace: Option<f64>,
    pub is_running: bool,
    pub next_leg_number: Option<u32>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub next_estimated_start: Option<OffsetDateTime>,
    pub is_done: bool,
}

impl RunnerSummary {
    pub fn new(runner: &Runner, legs: &[Leg], estimates: &[LegEstimate]) -> Self {
        let mut runner_legs: Vec<&Leg> = legs
            .iter()
            .filter(|l| l.runner_id == Some(runner.id))
            .collect();
        runner_legs.sort_by_key(|l| l.leg_number);

        let completed: Vec<&Leg> = runner_legs
            .iter()
            .copied()
            .filter(|l| l.status == LegStatus::Completed)
            .collect();

        let average_pace = (!completed.is_empty()).then(|| {
            completed.iter().map(|l| l.actual_pace.unwrap_or(0.0)).sum::<f64>()
                / completed.len() as f64
        });

        let next_upcoming = runner_legs
            .iter()
            .find(|l| l.status == LegStatus::Upcoming);
        let next_estimated_start = next_upcoming.and_then(|leg| {
            estimates
                .iter()
                .find(|e| e.leg_id == leg.id)
                .map(|e| e.estimated_start)
        });

        Self {
            runner_id: runner.id,
            name: runner.name.clone(),
            completed_legs: completed.len(),
            assigned_legs: runner_legs.len(),
            average_pace,
            is_running: runner_legs.iter().any(|l| l.status == LegStatus::Active),
            next_leg_number: next_upcoming.map(|l| l.leg_number),
            next_estimated_start,
            is_done: !runner_legs.is_empty() && completed.len() == runner_legs.len(),
        }
    }
}

/// Summaries for the whole team, in display order.
pub fn runner_summaries(
    runners: &[Runner],
    legs: &[Leg],
    estimates: &[LegEstimate],
) -> Vec<RunnerSummary> {
    let mut ordered: Vec<&Runner> = runners.iter().collect();
    ordered.sort_by_key(|r| r.sort_order);
    ordered
        .into_iter()
        .map(|r| RunnerSummary::new(r, legs, estimates))
        .collect()
}

/// Elapsed time and running pace of a leg in progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LivePace {
    pub elapsed_seconds: f64,
    pub pace: Option<f64>,
}

/// Live pace for `leg` as of `now`; `None` if the leg has not started.
pub fn live_leg_pace(leg: &Leg, now: OffsetDateTime) -> Option<LivePace> {
    let start = leg.start_time?;
    let elapsed_seconds = (now - start).as_seconds_f64();
    let pace = (elapsed_seconds > 0.0).then(|| elapsed_seconds / 60.0 / leg.distance);
    Some(LivePace {
        elapsed_seconds,
        pace,
    })
}
