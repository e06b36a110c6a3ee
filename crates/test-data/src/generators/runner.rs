//! Runner generation with realistic personal records.

use fake::{Fake, faker::name::en::Name};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use relay::{
    models::{PrDistance, Runner},
    pace_model::PaceModel,
};

/// Configuration for runner generation.
#[derive(Debug, Clone)]
pub struct RunnerGenConfig {
    /// Distribution of reported PR distances (5K, 10K, half, marathon).
    pub pr_distance_distribution: [f64; 4],
    /// Mean race pace at the PR distance, minutes per mile.
    pub race_pace_mean: f64,
    /// Standard deviation of race pace.
    pub race_pace_std: f64,
}

impl Default for RunnerGenConfig {
    fn default() -> Self {
        Self {
            // Relay teams skew toward shorter PRs
            pr_distance_distribution: [0.35, 0.3, 0.25, 0.1],
            race_pace_mean: 8.5,
            race_pace_std: 1.3,
        }
    }
}

/// Generates relay runners whose pre-race pace is derived from a sampled PR.
pub struct RunnerGenerator {
    config: RunnerGenConfig,
}

impl RunnerGenerator {
    /// Creates a new runner generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: RunnerGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: RunnerGenConfig) -> Self {
        Self { config }
    }

    /// Generates a single runner.
    pub fn generate(&self, sort_order: u32, model: &PaceModel, rng: &mut impl Rng) -> Runner {
        let name: String = Name().fake_with_rng(rng);
        let pr_distance = self.generate_pr_distance(rng);
        let pr_time_seconds = self.generate_pr_time(pr_distance, rng);

        Runner::from_pr(name, pr_distance, pr_time_seconds, sort_order, model)
    }

    /// Generates a full team in display order.
    pub fn generate_team(
        &self,
        count: usize,
        model: &PaceModel,
        rng: &mut impl Rng,
    ) -> Vec<Runner> {
        (0..count)
            .map(|i| self.generate(i as u32, model, rng))
            .collect()
    }

    fn generate_pr_distance(&self, rng: &mut impl Rng) -> PrDistance {
        let roll: f64 = rng.r#gen();
        let mut cumulative = 0.0;

        for (i, &weight) in self.config.pr_distance_distribution.iter().enumerate() {
            cumulative += weight;
            if roll < cumulative {
                return match i {
                    0 => PrDistance::FiveK,
                    1 => PrDistance::TenK,
                    2 => PrDistance::Half,
                    _ => PrDistance::Marathon,
                };
            }
        }

        PrDistance::Marathon
    }

    /// PR time in whole seconds, as a runner would enter it.
    fn generate_pr_time(&self, distance: PrDistance, rng: &mut impl Rng) -> f64 {
        let normal = Normal::new(self.config.race_pace_mean, self.config.race_pace_std).unwrap();
        // Clamp between elite and walk-run paces
        let pace = normal.sample(rng).clamp(5.0, 14.0);
        (pace * distance.miles() * 60.0).round()
    }
}

impl Default for RunnerGenerator {
    fn default() -> Self {
        Self::new()
    }
}
