//! Entity generators for test data.
//!
//! - [`RunnerGenerator`]: Generate runners with sampled personal records
//! - [`CourseGenerator`]: Lay out legs with distances, terrain and runner rotation

pub mod course;
pub mod runner;

pub use course::{CourseGenConfig, CourseGenerator};
pub use runner::{RunnerGenConfig, RunnerGenerator};
