//! Test data generation for relay races.
//!
//! This crate generates realistic teams and courses and simulates a race day
//! leg by leg, re-projecting the schedule after every handoff. It supports
//! manual verification of the projection engine and integration testing.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let sim = RaceSimulator::new(SimConfig::default(), PaceModel::default());
//! let mut rng = StdRng::seed_from_u64(12345);
//! let snapshot = sim.generate_race(&mut rng);
//! let result = sim.run(snapshot, &mut rng)?;
//! println!("forecast error: {:?}s", result.forecast_error_seconds());
//! ```

pub mod config;
pub mod generators;
pub mod simulator;

// Re-export core types from relay crate
pub use relay::models::{Difficulty, Leg, PrDistance, Race, RaceSnapshot, Runner};
pub use relay::pace_model::PaceModel;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{DifficultyMix, SimConfig};
    pub use crate::generators::{CourseGenConfig, CourseGenerator, RunnerGenConfig, RunnerGenerator};
    pub use crate::simulator::{RaceSimulator, SimError, SimulationResult, SimulationStep};
    pub use crate::{Difficulty, Leg, PaceModel, PrDistance, Race, RaceSnapshot, Runner};
    pub use rand::SeedableRng;
    pub use rand::rngs::StdRng;
}
