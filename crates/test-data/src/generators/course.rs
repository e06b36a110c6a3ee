//! Relay course generation: leg distances, terrain and runner rotation.

use rand::Rng;
use uuid::Uuid;

use relay::models::{Difficulty, Leg};

use crate::config::DifficultyMix;

/// Configuration for course generation.
#[derive(Debug, Clone)]
pub struct CourseGenConfig {
    /// Shortest and longest leg in miles.
    pub leg_distance_range: (f64, f64),
    /// Relative frequency of each terrain category.
    pub difficulty_mix: DifficultyMix,
}

impl Default for CourseGenConfig {
    fn default() -> Self {
        Self {
            leg_distance_range: (3.0, 8.0),
            difficulty_mix: DifficultyMix::default(),
        }
    }
}

/// Generates the ordered legs of a relay course.
pub struct CourseGenerator {
    config: CourseGenConfig,
}

impl CourseGenerator {
    /// Creates a new course generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: CourseGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: CourseGenConfig) -> Self {
        Self { config }
    }

    /// Generates `runner_ids.len() * legs_per_runner` legs numbered from 1.
    ///
    /// Runners rotate in order, so runner `i` takes legs `i+1`,
    /// `i+1+n`, `i+1+2n` and so on.
    pub fn generate_legs(
        &self,
        runner_ids: &[Uuid],
        legs_per_runner: usize,
        rng: &mut impl Rng,
    ) -> Vec<Leg> {
        let count = runner_ids.len() * legs_per_runner;
        (0..count)
            .map(|i| {
                let leg = Leg::new(
                    i as u32 + 1,
                    self.generate_distance(rng),
                    self.generate_difficulty(rng),
                );
                leg.with_runner(runner_ids[i % runner_ids.len()])
            })
            .collect()
    }

    /// Distance rounded to a tenth of a mile, as course maps list them.
    fn generate_distance(&self, rng: &mut impl Rng) -> f64 {
        let (min, max) = self.config.leg_distance_range;
        let miles = rng.gen_range(min..=max);
        (miles * 10.0).round() / 10.0
    }

    fn generate_difficulty(&self, rng: &mut impl Rng) -> Difficulty {
        let weights = self.config.difficulty_mix.weights();
        let total: f64 = weights.iter().sum();
        let roll = rng.r#gen::<f64>() * total;
        let mut cumulative = 0.0;

        for (i, &weight) in weights.iter().enumerate() {
            cumulative += weight;
            if roll < cumulative {
                return match i {
                    0 => Difficulty::Easy,
                    1 => Difficulty::Medium,
                    2 => Difficulty::Hard,
                    _ => Difficulty::ExtraHard,
                };
            }
        }

        Difficulty::Medium
    }
}

impl Default for CourseGenerator {
    fn default() -> Self {
        Self::new()
    }
}
