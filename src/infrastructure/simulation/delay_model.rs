use rand::Rng;
use std::time::Duration;

/// Trait defining a simulated I/O delay model.
pub trait DelayModel: Send + Sync {
    /// Returns the duration to block for before the stage completes.
    fn next_delay(&self) -> Duration;
}

/// Uniformly random delay between zero and an upper bound.
/// Simulates an external dependency with unpredictable response times.
#[derive(Debug, Clone)]
pub struct UniformDelay {
    max_ms: u64,
}

impl UniformDelay {
    pub fn up_to_millis(max_ms: u64) -> Self {
        Self { max_ms }
    }
}

impl DelayModel for UniformDelay {
    fn next_delay(&self) -> Duration {
        let mut rng = rand::rng();
        Duration::from_millis(rng.random_range(0..=self.max_ms))
    }
}

/// Zero delay model (instant stages) for tests or pure logic verification.
pub struct ZeroDelay;

impl DelayModel for ZeroDelay {
    fn next_delay(&self) -> Duration {
        Duration::from_millis(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_delay_range() {
        let model = UniformDelay::up_to_millis(100);
        for _ in 0..100 {
            let delay = model.next_delay().as_millis() as u64;
            assert!(delay <= 100, "Delay {} out of bounds [0, 100]", delay);
        }
    }

    #[test]
    fn test_zero_delay_is_zero() {
        assert_eq!(ZeroDelay.next_delay(), Duration::ZERO);
    }
}
