//! Simulates a full relay race and logs how the finish forecast evolves.
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin simulate
//! ```
//!
//! `SIM_CONFIG` and `RELAY_PACE_CONFIG` may point at JSON files overriding
//! the simulation and pace defaults. `SIM_OUTPUT` writes the finished race
//! snapshot as JSON.

use rand::SeedableRng;
use rand::rngs::StdRng;
use relay::{
    config::PaceConfig,
    pace_model::PaceModel,
    time_format::{format_clock_time, format_pace},
};
use test_data::{config::SimConfig, simulator::RaceSimulator};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config: SimConfig = match std::env::var("SIM_CONFIG") {
        Ok(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        Err(_) => SimConfig::default(),
    };
    let pace_config = match std::env::var("RELAY_PACE_CONFIG") {
        Ok(path) => PaceConfig::from_json_file(path)?,
        Err(_) => PaceConfig::default(),
    };

    let mut rng = StdRng::seed_from_u64(config.seed);
    let sim = RaceSimulator::new(config, PaceModel::new(pace_config));

    let snapshot = sim.generate_race(&mut rng);
    let result = sim.run(snapshot, &mut rng)?;

    for step in &result.steps {
        tracing::info!(
            "Leg {:>2} {:<24} predicted {}/mi actual {}/mi handoff {} finish now {}",
            step.leg_number,
            step.runner_name,
            format_pace(step.predicted_pace),
            format_pace(step.actual_pace),
            format_clock_time(step.handoff_at),
            step.finish_after
                .map(format_clock_time)
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    // Summary output
    tracing::info!("Simulation completed!");
    tracing::info!("  Legs: {}", result.steps.len());
    if let Some(predicted) = result.initial_finish_estimate {
        tracing::info!("  Forecast at start: {}", format_clock_time(predicted));
    }
    if let Some(actual) = result.actual_finish {
        tracing::info!("  Actual finish: {}", format_clock_time(actual));
    }
    if let Some(error) = result.forecast_error_seconds() {
        tracing::info!("  Forecast error: {}s", error);
    }

    if let Ok(path) = std::env::var("SIM_OUTPUT") {
        std::fs::write(&path, serde_json::to_string_pretty(&result.snapshot)?)?;
        tracing::info!("Wrote snapshot to {}", path);
    }

    Ok(())
}
