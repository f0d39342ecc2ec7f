use serde::{Deserialize, Serialize};

use crate::TimestampMs;

/// Wall-time source injected by the driver.
pub trait Clock {
    fn now(&self) -> TimestampMs;
}

/// Clock backed by the platform time source, wasm-compatible via `web-time`.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimestampMs {
        use web_time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as TimestampMs
    }
}

/// Elapsed-time tracker for one game session. Once stopped it stays frozen
/// until the next `start` or `reset`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stopwatch {
    started_at: Option<TimestampMs>,
    ended_at: Option<TimestampMs>,
}

impl Stopwatch {
    pub fn start(&mut self, now: TimestampMs) {
        self.started_at = Some(now);
        self.ended_at = None;
    }

    pub fn stop(&mut self, now: TimestampMs) {
        if self.is_running() {
            self.ended_at = Some(now);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub const fn is_running(&self) -> bool {
        self.started_at.is_some() && self.ended_at.is_none()
    }

    /// Whole seconds since start, 0 if the session never started.
    pub fn elapsed_secs(&self, now: TimestampMs) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now).saturating_sub(started_at) / 1000) as u32
        } else {
            0
        }
    }
}

/// Formats seconds as zero-padded minutes:seconds. Minutes keep growing past
/// two digits rather than wrapping.
pub fn format_clock(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_clock_zero_pads_both_fields() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(599), "09:59");
    }

    #[test]
    fn format_clock_does_not_wrap_past_99_minutes() {
        assert_eq!(format_clock(6_543), "109:03");
    }

    #[test]
    fn stopwatch_freezes_elapsed_after_stop() {
        let mut watch = Stopwatch::default();
        assert_eq!(watch.elapsed_secs(10_000), 0);

        watch.start(1_000);
        assert!(watch.is_running());
        assert_eq!(watch.elapsed_secs(31_500), 30);

        watch.stop(61_000);
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed_secs(999_000), 60);
    }

    #[test]
    fn stopwatch_clamps_backwards_clock_to_zero() {
        let mut watch = Stopwatch::default();
        watch.start(5_000);
        assert_eq!(watch.elapsed_secs(1_000), 0);
    }
}
