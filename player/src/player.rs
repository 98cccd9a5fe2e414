#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

use anyhow::Result;
use log::info;
use tableau_scene::{Scene, SceneChange};
#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use crate::{
    PlaybackDriver, PlaybackEvent, PlayerConfig, Recorder, SegmentMarker, SegmentTimeline,
    TimeDisplay,
};

/// Owns a scene, the timeline recorded for it, and the driver that plays it back.
#[derive(Debug)]
pub struct Player {
    config: PlayerConfig,
    scene: Scene,
    timeline: SegmentTimeline,
    driver: PlaybackDriver,
}

impl Player {
    pub fn new(config: PlayerConfig) -> Result<Self> {
        config.validate()?;
        let scene = Scene::new();
        let timeline = SegmentTimeline::empty(scene.clone());
        let driver = PlaybackDriver::new(&config);
        Ok(Self {
            config,
            scene,
            timeline,
            driver,
        })
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn timeline(&self) -> &SegmentTimeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut SegmentTimeline {
        &mut self.timeline
    }

    /// Record a new sequence. The previous timeline is discarded.
    ///
    /// The new timeline starts at 0 and plays right away if `autoplay` is configured.
    pub fn sequence(&mut self, record: impl FnOnce(&mut Recorder)) {
        let mut recorder =
            Recorder::new(self.scene.clone()).with_default_wait(self.config.default_wait);
        record(&mut recorder);

        let mut timeline = recorder.finish();
        timeline.set_looping(self.config.looping);
        timeline.set_prev_segment_threshold(self.config.prev_segment_threshold);
        if self.config.autoplay {
            timeline.play();
        }
        info!(
            "New sequence with {} segments, {:.3}s",
            timeline.segment_count(),
            timeline.duration()
        );
        self.timeline = timeline;
        self.driver.restart_clock();
    }

    /// Drive a host frame.
    ///
    /// Every state and membership change is collected in the scene until the host takes it with
    /// [`Player::take_changes`]. Hosts are expected to do that once per frame, otherwise the
    /// collected changes grow without bound.
    pub fn frame(&mut self, now: Instant) -> Option<PlaybackEvent> {
        self.driver.frame(now, &mut self.timeline)
    }

    /// Take the changes the renderer needs to catch up with the scene.
    pub fn take_changes(&self) -> Vec<SceneChange> {
        self.scene.take_changes()
    }

    /// Advance the timeline by `dt` seconds, bypassing the driver.
    pub fn update(&mut self, dt: f64) -> Option<PlaybackEvent> {
        self.timeline.update(dt)
    }

    pub fn play(&mut self) {
        self.driver.restart_clock();
        self.timeline.play();
    }

    pub fn pause(&mut self) {
        self.timeline.pause();
    }

    pub fn is_playing(&self) -> bool {
        self.timeline.is_playing()
    }

    pub fn seek(&mut self, t: f64) {
        self.timeline.seek(t);
    }

    pub fn next_segment(&mut self) {
        self.timeline.next_segment();
    }

    pub fn prev_segment(&mut self) {
        self.timeline.prev_segment();
    }

    pub fn is_finished(&self) -> bool {
        self.timeline.is_finished()
    }

    pub fn current_time(&self) -> f64 {
        self.timeline.current_time()
    }

    pub fn duration(&self) -> f64 {
        self.timeline.duration()
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.config.looping = looping;
        self.timeline.set_looping(looping);
    }

    /// Panics if `rate` is not a positive number.
    pub fn set_playback_rate(&mut self, rate: f64) {
        self.driver.set_playback_rate(rate);
        self.config.playback_rate = rate;
    }

    pub fn segment_markers(&self) -> Vec<SegmentMarker> {
        self.timeline.segment_markers()
    }

    pub fn time_display(&self) -> TimeDisplay {
        self.timeline.time_display()
    }

    /// Frames per second over the recently driven frames.
    pub fn fps(&self) -> Option<f64> {
        self.driver.monitor().fps()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tableau_animation::{Animation, fade_in, move_to};
    use tableau_geometry::Point;
    use tableau_scene::MobjectState;

    use super::*;

    #[test]
    fn invalid_config_is_rejected() {
        let config = PlayerConfig {
            playback_rate: 0.0,
            ..PlayerConfig::default()
        };
        assert!(Player::new(config).is_err());
    }

    #[test]
    fn sequence_replaces_the_timeline() {
        let mut player = Player::new(PlayerConfig::default()).unwrap();
        let dot = player.scene().create(MobjectState::default());

        player.sequence(|r| {
            r.play([fade_in(&dot).boxed()]);
            r.wait_default();
        });
        assert_eq!(player.duration(), 2.0);
        assert_eq!(player.segment_markers().len(), 2);
        assert!(!player.is_playing());

        player.sequence(|r| r.play([move_to(&dot, (1.0, 0.0)).with_duration(0.5).boxed()]));
        assert_eq!(player.duration(), 0.5);
        player.seek(0.5);
        assert_eq!(dot.state().position, Point::new(1.0, 0.0));
    }

    #[test]
    fn autoplay_and_looping_come_from_the_config() {
        let config = PlayerConfig::from_toml_str("autoplay = true\nlooping = true").unwrap();
        let mut player = Player::new(config).unwrap();
        player.sequence(|r| r.wait(1.0));
        assert!(player.is_playing());
        assert!(player.timeline().is_looping());

        let start = Instant::now();
        player.frame(start);
        assert_eq!(
            player.frame(start + Duration::from_millis(1500)),
            Some(PlaybackEvent::Looped)
        );
        assert!(player.is_playing());
    }

    #[test]
    fn frames_collect_changes_until_taken() {
        let mut player = Player::new(PlayerConfig::default()).unwrap();
        let dot = player.scene().create(MobjectState::default());
        player.sequence(|r| r.play([move_to(&dot, (1.0, 0.0)).boxed()]));
        player.take_changes();

        player.play();
        let start = Instant::now();
        player.frame(start);
        player.frame(start + Duration::from_millis(100));
        player.frame(start + Duration::from_millis(200));
        let changes = player.take_changes();
        assert_eq!(
            changes
                .iter()
                .filter(|c| matches!(c, SceneChange::Updated(id, _) if *id == dot.id()))
                .count(),
            2
        );
        assert!(player.take_changes().is_empty());
    }

    #[test]
    fn navigation_pauses() {
        let mut player = Player::new(PlayerConfig::default()).unwrap();
        player.sequence(|r| {
            r.wait(1.0);
            r.wait(2.0);
        });
        player.play();
        player.next_segment();
        assert!(!player.is_playing());
        assert_eq!(player.current_time(), 1.0);
        assert_eq!(player.time_display().to_string(), "0:01 / 0:03");
        player.prev_segment();
        assert_eq!(player.current_time(), 0.0);
    }
}
