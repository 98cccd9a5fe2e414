use log::{info, trace, warn};
use tableau_scene::{Mobject, Scene};

use crate::{Segment, SegmentMarker, TimeDisplay};

/// Seconds into a segment after which [`SegmentTimeline::prev_segment`] restarts the current
/// segment instead of jumping to the previous one.
pub const PREV_SEGMENT_THRESHOLD: f64 = 0.5;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The end was reached and playback continues from the start.
    Looped,
    /// The end was reached and playback stopped. Fired once per pass.
    Finished,
}

/// A recorded sequence of segments that can be played, paused, and sought.
///
/// Seeking replays the recording from the start: segments after the target time restore what they
/// changed, segments before it are put at their end state, and the segment containing the target
/// time is positioned at its local time. Every position is therefore computed from the recorded
/// state alone, no matter which position was visited before.
///
/// Playback moves forward without a replay. It completes the segments it crosses and positions the
/// containing one, so mobjects of other segments keep what their updaters did to them.
#[derive(Debug)]
pub struct SegmentTimeline {
    scene: Scene,
    segments: Vec<Segment>,
    /// The scene members after the last segment.
    final_members: Vec<Mobject>,
    /// All mobjects whose membership is controlled by the recording. Other members of the scene
    /// are left alone.
    managed: Vec<Mobject>,
    current_time: f64,
    playing: bool,
    looping: bool,
    /// Set when `Finished` was reported for the current pass.
    finish_reported: bool,
    prev_segment_threshold: f64,
}

impl SegmentTimeline {
    pub(crate) fn new(scene: Scene, segments: Vec<Segment>, final_members: Vec<Mobject>) -> Self {
        let mut managed = final_members.clone();
        for mobject in segments.iter().flat_map(|s| s.managed_mobjects()) {
            if !managed.contains(&mobject) {
                managed.push(mobject);
            }
        }
        Self {
            scene,
            segments,
            final_members,
            managed,
            current_time: 0.0,
            playing: false,
            looping: false,
            finish_reported: false,
            prev_segment_threshold: PREV_SEGMENT_THRESHOLD,
        }
    }

    /// A timeline without segments.
    pub fn empty(scene: Scene) -> Self {
        let final_members = scene.members();
        Self::new(scene, Vec::new(), final_members)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The total duration.
    pub fn duration(&self) -> f64 {
        self.segments.last().map(|s| s.end_time()).unwrap_or(0.0)
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn set_prev_segment_threshold(&mut self, threshold: f64) {
        assert!(
            threshold.is_finite() && threshold >= 0.0,
            "Segment threshold must be finite and non-negative, was {threshold}"
        );
        self.prev_segment_threshold = threshold;
    }

    /// `true` if the current time is at the end.
    pub fn is_finished(&self) -> bool {
        self.current_time >= self.duration()
    }

    /// Start playing. Restarts from the beginning if the end was reached.
    pub fn play(&mut self) {
        if self.is_finished() {
            self.seek(0.0);
        }
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Jump to `t`. Values outside of the timeline are clamped, NaN is treated as 0.
    pub fn seek(&mut self, t: f64) {
        let t = self.clamp_time(t);
        trace!("Seeking to {t:.3}s");
        self.current_time = t;
        if t < self.duration() {
            self.finish_reported = false;
        }
        self.apply(t);
    }

    /// Advance by `dt` seconds if playing.
    ///
    /// When the end is reached, the timeline either wraps around or stops and reports
    /// [`PlaybackEvent::Finished`].
    pub fn update(&mut self, dt: f64) -> Option<PlaybackEvent> {
        assert!(
            dt >= 0.0,
            "Timeline can not advance by a negative time delta: {dt}"
        );
        if !self.playing {
            return None;
        }

        let total = self.duration();
        let target = self.current_time + dt;
        if target < total {
            self.advance(target);
            return None;
        }

        if self.looping && total > 0.0 {
            let wrapped = (target - total) % total;
            info!("Looping at {total:.3}s");
            self.seek(wrapped);
            return Some(PlaybackEvent::Looped);
        }

        self.advance(total);
        self.playing = false;
        if self.finish_reported {
            return None;
        }
        self.finish_reported = true;
        info!("Finished at {total:.3}s");
        Some(PlaybackEvent::Finished)
    }

    /// Jump to the start of the next segment, or to the end. Pauses.
    pub fn next_segment(&mut self) {
        let next = self
            .segments
            .iter()
            .map(|s| s.start_time())
            .find(|start| *start > self.current_time)
            .unwrap_or_else(|| self.duration());
        self.pause();
        self.seek(next);
    }

    /// Jump to the start of the current segment if more than the threshold passed since it
    /// started, otherwise to the start of the previous one. Pauses.
    pub fn prev_segment(&mut self) {
        let Some(current) = self.current_segment_index() else {
            self.pause();
            self.seek(0.0);
            return;
        };
        let start = self.segments[current].start_time();
        let target = if self.current_time - start > self.prev_segment_threshold {
            start
        } else {
            // Zero-duration segments share their start with the next one.
            self.segments[..current]
                .iter()
                .rev()
                .map(|s| s.start_time())
                .find(|previous| *previous < start)
                .unwrap_or(0.0)
        };
        self.pause();
        self.seek(target);
    }

    /// The index of the segment at the current time. At the end, this is the last segment.
    pub fn current_segment_index(&self) -> Option<usize> {
        self.segment_index_at(self.current_time)
            .or_else(|| self.segments.len().checked_sub(1))
    }

    pub fn segment_markers(&self) -> Vec<SegmentMarker> {
        self.segments.iter().map(SegmentMarker::from).collect()
    }

    pub fn time_display(&self) -> TimeDisplay {
        TimeDisplay {
            current: self.current_time,
            total: self.duration(),
        }
    }

    fn clamp_time(&self, t: f64) -> f64 {
        if t.is_nan() {
            warn!("Seeking to NaN, seeking to the start instead");
            return 0.0;
        }
        t.clamp(0.0, self.duration())
    }

    /// The segment `t` lies in. Zero-duration segments never contain a time.
    fn segment_index_at(&self, t: f64) -> Option<usize> {
        self.segments.iter().position(|s| t < s.end_time())
    }

    /// Replay the recording up to `t`.
    fn apply(&mut self, t: f64) {
        let containing = self.segment_index_at(t);
        let pending = containing.unwrap_or(self.segments.len());

        for segment in self.segments[pending..].iter_mut().rev() {
            segment.reset();
        }
        for segment in &mut self.segments[..pending] {
            segment.complete();
        }
        self.position_at(containing, t);
    }

    /// Move forward from the current time to `t`. Only the segments crossed on the way are put at
    /// their end state, all others are left as they are.
    fn advance(&mut self, t: f64) {
        debug_assert!(t >= self.current_time);
        let len = self.segments.len();
        let from = self.segment_index_at(self.current_time).unwrap_or(len);
        let containing = self.segment_index_at(t);
        let to = containing.unwrap_or(len);

        for segment in &mut self.segments[from..to] {
            segment.complete();
        }
        self.current_time = t;
        self.position_at(containing, t);
    }

    /// Position the containing segment at `t` and update the scene membership.
    fn position_at(&mut self, containing: Option<usize>, t: f64) {
        let mut members = match containing {
            Some(index) => {
                let segment = &mut self.segments[index];
                let local = t - segment.start_time();
                segment.interpolate_at(local);
                segment.members_at(local)
            }
            None => self.final_members.clone(),
        };
        for member in self.scene.members() {
            if !self.managed.contains(&member) && !members.contains(&member) {
                members.push(member);
            }
        }
        self.scene.set_members(members);
    }
}
