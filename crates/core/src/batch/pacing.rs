//! Randomized per-send pacing.

use std::time::Duration;

use rand::Rng;

/// The delay between consecutive sends, perturbed after every send.
///
/// Each advance multiplies the current wait by two independent uniform
/// draws in [0.5, 1.2]. This is a multiplicative random walk over the
/// run, not a jitter around a fixed base: the effective delay drifts and
/// is unbounded in both directions over enough sends.
#[derive(Debug, Clone)]
pub struct Pacing {
    wait_secs: f64,
}

impl Pacing {
    pub fn new(initial_wait_secs: f64) -> Self {
        Self {
            wait_secs: initial_wait_secs,
        }
    }

    /// Current wait in seconds.
    pub fn wait_secs(&self) -> f64 {
        self.wait_secs
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs_f64(self.wait_secs.max(0.0))
    }

    /// Re-derive the wait for the upcoming sleep from its prior value.
    /// Returns the new wait in seconds.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> f64 {
        let factor_a: f64 = rng.gen_range(0.5..=1.2);
        let factor_b: f64 = rng.gen_range(0.5..=1.2);
        self.wait_secs *= factor_a * factor_b;
        self.wait_secs
    }
}
