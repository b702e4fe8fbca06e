//! 请求限速
//!
//! 每处理完一行，在给定区间内随机等待一段时间，避免对平台造成压力。

use crate::config::Config;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    min_ms: u64,
    max_ms: u64,
}

impl Throttle {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.min_delay_ms, config.max_delay_ms)
    }

    /// 不等待
    pub fn disabled() -> Self {
        Self::new(0, 0)
    }

    /// 在 `[min, max]` 区间内均匀取一个等待时长
    pub fn sample(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }

    pub async fn pause(&self) {
        let delay = self.sample();
        if delay.is_zero() {
            return;
        }
        debug!("⏳ 等待 {} 毫秒", delay.as_millis());
        sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_stay_within_bounds() {
        let throttle = Throttle::new(1500, 3000);
        for _ in 0..200 {
            let delay = throttle.sample();
            assert!(delay >= Duration::from_millis(1500));
            assert!(delay <= Duration::from_millis(3000));
        }
    }

    #[test]
    fn swapped_bounds_are_normalized() {
        let throttle = Throttle::new(50, 10);
        let delay = throttle.sample();
        assert!(delay >= Duration::from_millis(10) && delay <= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn disabled_throttle_returns_immediately() {
        let start = std::time::Instant::now();
        Throttle::disabled().pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
