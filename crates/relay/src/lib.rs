pub mod config;
pub mod errors;
pub mod models;
pub mod pace_model;
pub mod pace_predictor;
pub mod progress;
pub mod schedule;
pub mod time_format;
pub mod workflow;

use crate::{
    models::RaceSnapshot,
    pace_model::PaceModel,
    progress::RaceProgress,
    schedule::{LegEstimate, ScheduleProjector},
};

/// Projects every unfinished leg of `snapshot`.
pub fn project(snapshot: &RaceSnapshot, model: &PaceModel) -> Vec<LegEstimate> {
    ScheduleProjector::new(model).compute_estimates(
        &snapshot.legs,
        &snapshot.runners,
        snapshot.race.start_time,
    )
}

/// Projects `snapshot` and summarizes overall progress alongside the estimates.
pub fn project_with_progress(
    snapshot: &RaceSnapshot,
    model: &PaceModel,
) -> (Vec<LegEstimate>, RaceProgress) {
    let estimates = project(snapshot, model);
    let progress = RaceProgress::from_snapshot(&snapshot.race, &snapshot.legs, &estimates);
    (estimates, progress)
}
