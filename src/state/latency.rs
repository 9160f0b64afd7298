use std::time::Duration;

use rand::Rng;
use serde::Deserialize;
use tokio::time::sleep;
use validator::{Validate, ValidationError};

/// Artificial wait injected before answering, used to exercise the UI loading states.
///
/// The actual delay is drawn uniformly from `min_ms..=max_ms` on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Validate)]
#[validate(schema(function = "validate_bounds"))]
pub struct ArtificialDelay {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl ArtificialDelay {
    /// No delay at all.
    pub const NONE: Self = Self::fixed(0);

    /// Always wait exactly `ms` milliseconds.
    pub const fn fixed(ms: u64) -> Self {
        Self {
            min_ms: ms,
            max_ms: ms,
        }
    }

    /// Wait a random duration within `min_ms..=max_ms`.
    pub const fn between(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Draw the duration of a single wait.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Duration {
        let ms = if self.max_ms <= self.min_ms {
            self.min_ms
        } else {
            rng.random_range(self.min_ms..=self.max_ms)
        };
        Duration::from_millis(ms)
    }

    /// Sleep for a freshly sampled duration.
    pub async fn wait(&self) {
        let duration = self.sample(&mut rand::rng());
        if !duration.is_zero() {
            sleep(duration).await;
        }
    }
}

fn validate_bounds(delay: &ArtificialDelay) -> Result<(), ValidationError> {
    if delay.min_ms > delay.max_ms {
        let mut err = ValidationError::new("delay_bounds");
        err.message = Some(
            format!(
                "min_ms ({}) must not exceed max_ms ({})",
                delay.min_ms, delay.max_ms
            )
            .into(),
        );
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn fixed_delay_always_samples_the_same_value() {
        let mut rng = StdRng::seed_from_u64(0);
        let delay = ArtificialDelay::fixed(750);
        for _ in 0..10 {
            assert_eq!(delay.sample(&mut rng), Duration::from_millis(750));
        }
        assert_eq!(ArtificialDelay::NONE.sample(&mut rng), Duration::ZERO);
    }

    #[test]
    fn ranged_delay_stays_within_bounds() {
        let mut rng = StdRng::seed_from_u64(9);
        let delay = ArtificialDelay::between(10, 3000);
        for _ in 0..500 {
            let sampled = delay.sample(&mut rng);
            assert!(sampled >= Duration::from_millis(10));
            assert!(sampled <= Duration::from_millis(3000));
        }
    }

    #[test]
    fn inverted_bounds_fail_validation() {
        assert!(ArtificialDelay::between(0, 3000).validate().is_ok());
        assert!(ArtificialDelay::between(10, 5).validate().is_err());
    }
}
