use log::{debug, trace};
use tableau_animation::{Animation, DEFAULT_DURATION};
use tableau_scene::Scene;

use crate::{Segment, SegmentTimeline};

/// Records `play()` and `wait()` calls into the segments of a [`SegmentTimeline`].
///
/// Recording does not advance any time. Each played set is begun and then put at its end state
/// right away, so that code following a `play()` observes the animated result and the next set
/// captures it when it begins.
#[derive(Debug)]
pub struct Recorder {
    scene: Scene,
    segments: Vec<Segment>,
    start_time: f64,
    default_wait: f64,
}

impl Recorder {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            segments: Vec::new(),
            start_time: 0.0,
            default_wait: DEFAULT_DURATION,
        }
    }

    /// Panics if `duration` is negative or not finite.
    pub fn with_default_wait(self, duration: f64) -> Self {
        assert_valid_wait(duration);
        Self {
            default_wait: duration,
            ..self
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Record a segment that plays all `animations` at the same time.
    ///
    /// Does nothing if there are no animations.
    pub fn play(&mut self, animations: impl IntoIterator<Item = Box<dyn Animation>>) {
        let mut animations: Vec<_> = animations.into_iter().collect();
        if animations.is_empty() {
            trace!("Ignoring play without animations");
            return;
        }

        let members_before = self.scene.members();
        for animation in &mut animations {
            for target in animation.targets() {
                self.scene.add(&target);
            }
            animation.begin();
        }

        let mut segment = Segment::play(
            self.segments.len(),
            self.start_time,
            animations,
            members_before,
        );
        // Leave the scene as it is at the end of the segment.
        segment.complete();
        self.scene.set_members(segment.members_at(segment.duration()));
        self.push(segment);
    }

    /// Record a pause of `duration` seconds. Zero durations are not recorded.
    ///
    /// Panics if `duration` is negative or not finite.
    pub fn wait(&mut self, duration: f64) {
        assert_valid_wait(duration);
        if duration == 0.0 {
            trace!("Ignoring wait of zero duration");
            return;
        }
        let segment = Segment::wait(
            self.segments.len(),
            self.start_time,
            duration,
            self.scene.members(),
        );
        self.push(segment);
    }

    /// Record a pause of the default wait duration.
    pub fn wait_default(&mut self) {
        self.wait(self.default_wait);
    }

    /// The total duration recorded so far.
    pub fn duration(&self) -> f64 {
        self.start_time
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Finish recording and return the timeline positioned at its start.
    pub fn finish(self) -> SegmentTimeline {
        let final_members = self.scene.members();
        debug!(
            "Recorded {} segments, {:.3}s",
            self.segments.len(),
            self.start_time
        );
        let mut timeline = SegmentTimeline::new(self.scene, self.segments, final_members);
        timeline.seek(0.0);
        timeline
    }

    fn push(&mut self, segment: Segment) {
        debug!(
            "Segment {}: {} at {:.3}s for {:.3}s",
            segment.index(),
            if segment.is_wait() { "wait" } else { "play" },
            segment.start_time(),
            segment.duration()
        );
        self.start_time += segment.duration();
        self.segments.push(segment);
    }
}

fn assert_valid_wait(duration: f64) {
    assert!(
        duration.is_finite() && duration >= 0.0,
        "Wait duration must be finite and non-negative, was {duration}"
    );
}
