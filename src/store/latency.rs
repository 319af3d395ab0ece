use std::time::Duration;

use rand::Rng;

/// Artificial delay applied before every store call, drawn uniformly from
/// `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    min: Duration,
    max: Duration,
}

impl Latency {
    pub const DEFAULT_MIN_MS: u64 = 200;
    pub const DEFAULT_MAX_MS: u64 = 500;

    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max { Self { min, max } } else { Self { min: max, max: min } }
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    pub fn none() -> Self {
        Self { min: Duration::ZERO, max: Duration::ZERO }
    }

    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
    }

    pub async fn wait(&self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::from_millis(Self::DEFAULT_MIN_MS, Self::DEFAULT_MAX_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_in_range() {
        let latency = Latency::from_millis(20, 40);
        for _ in 0..100 {
            let d = latency.sample();
            assert!(d >= Duration::from_millis(20) && d <= Duration::from_millis(40));
        }
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        assert_eq!(Latency::from_millis(50, 10), Latency::from_millis(10, 50));
    }

    #[test]
    fn none_never_sleeps() {
        assert_eq!(Latency::none().sample(), Duration::ZERO);
    }
}
