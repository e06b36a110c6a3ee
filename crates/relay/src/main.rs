use std::env;

use anyhow::Context;
use relay::{
    config::PaceConfig,
    models::RaceSnapshot,
    pace_model::PaceModel,
    project_with_progress,
    time_format::{format_clock_time, format_duration, format_pace},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let snapshot_path = env::args()
        .nth(1)
        .context("usage: relay-eta <snapshot.json>")?;

    let config = match env::var("RELAY_PACE_CONFIG") {
        Ok(path) => {
            tracing::info!("Loading pace config from {}", path);
            PaceConfig::from_json_file(&path)
                .with_context(|| format!("failed to load pace config {path}"))?
        }
        Err(_) => PaceConfig::default(),
    };
    let model = PaceModel::new(config);

    let snapshot = RaceSnapshot::from_json_file(&snapshot_path)
        .with_context(|| format!("failed to load snapshot {snapshot_path}"))?;
    tracing::info!(
        "Projecting {} ({} legs, {} runners)",
        snapshot.race.name,
        snapshot.legs.len(),
        snapshot.runners.len()
    );

    let (estimates, progress) = project_with_progress(&snapshot, &model);

    println!(
        "{}: {:.1} of {:.1} mi ({:.0}%), {}/{} legs complete",
        snapshot.race.name,
        progress.completed_distance,
        progress.total_distance,
        progress.percent_complete,
        progress.completed_legs,
        progress.total_legs
    );

    if snapshot.race.start_time.is_none() {
        println!("Race has not started; no projection available.");
        return Ok(());
    }

    for e in &estimates {
        println!(
            "Leg {:>2}  {:<20} {:>5.1} mi  {}/mi  {:>8}  {:>8} - {:>8}",
            e.leg_number,
            e.runner_name,
            e.distance,
            format_pace(e.predicted_pace),
            format_duration(e.estimated_duration),
            format_clock_time(e.estimated_start),
            format_clock_time(e.estimated_end),
        );
    }

    match (progress.estimated_finish, progress.final_elapsed_seconds) {
        (Some(finish), _) => println!("Estimated finish: {}", format_clock_time(finish)),
        (None, Some(elapsed)) => println!(
            "Finished in {}",
            format_duration(elapsed.max(0) as f64)
        ),
        (None, None) => {}
    }

    Ok(())
}
