use std::{collections::VecDeque, time::Duration};

use log::info;

/// The number of frame intervals the rolling statistics are computed over.
pub const FRAME_WINDOW: usize = 60;

/// Rolling statistics over the intervals between driven frames.
///
/// Reports a summary of all samples when dropped.
#[derive(Debug, Default)]
pub struct FrameMonitor {
    window: VecDeque<Duration>,
    window_sum: Duration,
    stats: Stats,
}

impl FrameMonitor {
    pub fn add_sample(&mut self, interval: Duration) {
        if self.window.len() == FRAME_WINDOW {
            if let Some(oldest) = self.window.pop_front() {
                self.window_sum -= oldest;
            }
        }
        self.window.push_back(interval);
        self.window_sum += interval;
        self.stats.add(interval);
    }

    /// Frames per second over the recent window. `None` if there is no sample yet.
    pub fn fps(&self) -> Option<f64> {
        let mean = self.mean_interval()?;
        if mean.is_zero() {
            return None;
        }
        Some(1.0 / mean.as_secs_f64())
    }

    /// The mean frame interval over the recent window.
    pub fn mean_interval(&self) -> Option<Duration> {
        if self.window.is_empty() {
            return None;
        }
        Some(self.window_sum / self.window.len() as u32)
    }

    pub fn sample_count(&self) -> usize {
        self.stats.count
    }
}

impl Drop for FrameMonitor {
    fn drop(&mut self) {
        let Some(mean) = self.stats.mean() else {
            return;
        };
        info!(
            "Frame intervals: mean: {:?} ({:?}-{:?}, {} samples)",
            mean, self.stats.min, self.stats.max, self.stats.count
        );
    }
}

#[derive(Debug, Default)]
struct Stats {
    min: Duration,
    sum: Duration,
    max: Duration,
    count: usize,
}

impl Stats {
    fn add(&mut self, interval: Duration) {
        self.min = if self.count == 0 {
            interval
        } else {
            self.min.min(interval)
        };
        self.max = self.max.max(interval);
        self.sum += interval;
        self.count += 1;
    }

    fn mean(&self) -> Option<Duration> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum / self.count as u32)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn no_samples_no_fps() {
        assert_eq!(FrameMonitor::default().fps(), None);
    }

    #[test]
    fn fps_from_the_mean_interval() {
        let mut monitor = FrameMonitor::default();
        monitor.add_sample(Duration::from_millis(20));
        monitor.add_sample(Duration::from_millis(30));
        assert_eq!(monitor.mean_interval(), Some(Duration::from_millis(25)));
        assert_abs_diff_eq!(monitor.fps().unwrap(), 40.0, epsilon = 1e-9);
    }

    #[test]
    fn only_the_recent_window_counts() {
        let mut monitor = FrameMonitor::default();
        monitor.add_sample(Duration::from_secs(1));
        for _ in 0..FRAME_WINDOW {
            monitor.add_sample(Duration::from_millis(10));
        }
        assert_eq!(monitor.mean_interval(), Some(Duration::from_millis(10)));
        assert_eq!(monitor.sample_count(), FRAME_WINDOW + 1);
    }
}
