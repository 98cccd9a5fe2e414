use std::time::Duration;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use log::trace;
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use crate::{FrameMonitor, PlaybackEvent, PlayerConfig, SegmentTimeline};

/// Turns host frame callbacks into timeline updates.
#[derive(Debug)]
pub struct PlaybackDriver {
    playback_rate: f64,
    min_frame_interval: Duration,
    last_frame: Option<Instant>,
    monitor: FrameMonitor,
}

impl PlaybackDriver {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            playback_rate: config.playback_rate,
            min_frame_interval: config.min_frame_interval(),
            last_frame: None,
            monitor: FrameMonitor::default(),
        }
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    /// Panics if `rate` is not a positive number.
    pub fn set_playback_rate(&mut self, rate: f64) {
        assert!(
            rate.is_finite() && rate > 0.0,
            "Playback rate must be a positive number, was {rate}"
        );
        self.playback_rate = rate;
    }

    pub fn monitor(&self) -> &FrameMonitor {
        &self.monitor
    }

    /// Forget the previous frame, so that the next frame only restarts the clock.
    ///
    /// Use this after the host stopped calling [`Self::frame`] for a while.
    pub fn restart_clock(&mut self) {
        self.last_frame = None;
    }

    /// Drive one host frame at `now`.
    ///
    /// The first frame only starts the clock. Frames that arrive sooner than the minimum frame
    /// interval after the previous one are skipped, their time is added to the next frame. The
    /// timeline is updated first, then the scene's updaters run with the same time delta, or with
    /// zero if the timeline is paused.
    pub fn frame(&mut self, now: Instant, timeline: &mut SegmentTimeline) -> Option<PlaybackEvent> {
        let Some(last_frame) = self.last_frame else {
            self.last_frame = Some(now);
            return None;
        };

        let elapsed = now.saturating_duration_since(last_frame);
        if elapsed < self.min_frame_interval {
            trace!("Skipping frame after {elapsed:?}");
            return None;
        }
        self.last_frame = Some(now);
        self.monitor.add_sample(elapsed);

        let dt = elapsed.as_secs_f64() * self.playback_rate;
        let playing = timeline.is_playing();
        let event = timeline.update(dt);
        timeline
            .scene()
            .run_updaters(if playing { dt } else { 0.0 });
        event
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use approx::assert_abs_diff_eq;
    use tableau_animation::{Animation, RateFunction, move_to};
    use tableau_scene::{MobjectState, Scene};

    use super::*;
    use crate::Recorder;

    fn driver(playback_rate: f64) -> PlaybackDriver {
        PlaybackDriver::new(&PlayerConfig {
            playback_rate,
            ..PlayerConfig::default()
        })
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn wait_timeline(duration: f64) -> SegmentTimeline {
        let mut recorder = Recorder::new(Scene::new());
        recorder.wait(duration);
        let mut timeline = recorder.finish();
        timeline.play();
        timeline
    }

    #[test]
    fn first_frame_primes_the_clock() {
        let mut driver = driver(1.0);
        let mut timeline = wait_timeline(10.0);
        driver.frame(Instant::now(), &mut timeline);
        assert_eq!(timeline.current_time(), 0.0);
    }

    #[test]
    fn short_intervals_are_skipped_without_losing_time() {
        let mut driver = driver(1.0);
        let mut timeline = wait_timeline(10.0);
        let start = Instant::now();
        driver.frame(start, &mut timeline);

        driver.frame(start + ms(10), &mut timeline);
        assert_eq!(timeline.current_time(), 0.0);

        driver.frame(start + ms(20), &mut timeline);
        assert_abs_diff_eq!(timeline.current_time(), 0.020, epsilon = 1e-9);
        assert_eq!(driver.monitor().sample_count(), 1);
    }

    #[test]
    fn playback_rate_scales_time() {
        let mut driver = driver(2.0);
        let mut timeline = wait_timeline(10.0);
        let start = Instant::now();
        driver.frame(start, &mut timeline);
        driver.frame(start + ms(100), &mut timeline);
        assert_abs_diff_eq!(timeline.current_time(), 0.2, epsilon = 1e-9);

        driver.set_playback_rate(0.5);
        driver.frame(start + ms(200), &mut timeline);
        assert_abs_diff_eq!(timeline.current_time(), 0.25, epsilon = 1e-9);
    }

    #[test]
    fn updaters_run_after_the_timeline() {
        let scene = Scene::new();
        let dot = scene.create(MobjectState::default());
        let shadow = scene.create(MobjectState::default());
        let mut recorder = Recorder::new(scene.clone());
        recorder.play([move_to(&dot, (1.0, 0.0)).with_rate(RateFunction::Linear).boxed()]);
        let mut timeline = recorder.finish();
        scene.add(&shadow);
        {
            let dot = dot.clone();
            shadow.add_updater(move |state, _| state.position = dot.state().position);
        }
        timeline.play();

        let mut driver = driver(1.0);
        let start = Instant::now();
        driver.frame(start, &mut timeline);
        driver.frame(start + ms(500), &mut timeline);
        assert_abs_diff_eq!(shadow.state().position.x, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn paused_updaters_receive_zero_time() {
        let mut timeline = wait_timeline(10.0);
        timeline.pause();
        let scene = timeline.scene().clone();
        let dot = scene.create(MobjectState::default());
        scene.add(&dot);
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let calls = calls.clone();
            dot.add_updater(move |state, dt| {
                assert_eq!(dt, 0.0);
                state.rotation += 1.0;
                calls.fetch_add(1, Ordering::SeqCst);
            });
        }

        let mut driver = driver(1.0);
        let start = Instant::now();
        driver.frame(start, &mut timeline);
        driver.frame(start + ms(50), &mut timeline);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(timeline.current_time(), 0.0);
    }

    #[test]
    fn driving_to_the_end_reports_finished() {
        let mut driver = driver(1.0);
        let mut timeline = wait_timeline(0.05);
        let start = Instant::now();
        driver.frame(start, &mut timeline);
        assert_eq!(
            driver.frame(start + ms(100), &mut timeline),
            Some(PlaybackEvent::Finished)
        );
        assert_eq!(driver.frame(start + ms(200), &mut timeline), None);
    }
}
