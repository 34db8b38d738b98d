//! Timing utilities.

use std::time::{Duration, Instant};

#[inline]
pub fn timed<R>(f: impl FnOnce() -> R) -> (R, Duration) {
    let t = Instant::now();
    let r = f();
    (r, t.elapsed())
}

/// Transfer rate in MB/s (10^6 bytes per second).
#[inline]
pub fn rate(bytes: usize, elapsed: Duration) -> f64 {
    let seconds = elapsed.as_secs_f64();
    if seconds == 0.0 {
        return 0.0;
    }
    bytes as f64 / 1_000_000.0 / seconds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_in_megabytes() {
        assert_eq!(rate(2_000_000, Duration::from_secs(2)), 1.0);
        assert_eq!(rate(1024, Duration::ZERO), 0.0);
    }

    #[test]
    fn timed_returns_result() {
        let (value, elapsed) = timed(|| 7);
        assert_eq!(value, 7);
        assert!(elapsed < Duration::from_secs(1));
    }
}
