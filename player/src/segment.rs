use tableau_animation::Animation;
use tableau_scene::Mobject;

/// One recorded `play()` or `wait()` call.
#[derive(Debug)]
pub struct Segment {
    index: usize,
    start_time: f64,
    duration: f64,
    /// `None` for waits.
    animations: Option<Vec<Box<dyn Animation>>>,
    /// The scene members right before the segment was recorded.
    members_before: Vec<Mobject>,
}

impl Segment {
    pub(crate) fn play(
        index: usize,
        start_time: f64,
        animations: Vec<Box<dyn Animation>>,
        members_before: Vec<Mobject>,
    ) -> Self {
        let duration = animations
            .iter()
            .map(|a| a.duration())
            .fold(0.0, f64::max);
        Self {
            index,
            start_time,
            duration,
            animations: Some(animations),
            members_before,
        }
    }

    pub(crate) fn wait(
        index: usize,
        start_time: f64,
        duration: f64,
        members_before: Vec<Mobject>,
    ) -> Self {
        Self {
            index,
            start_time,
            duration,
            animations: None,
            members_before,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }

    pub fn is_wait(&self) -> bool {
        self.animations.is_none()
    }

    pub fn animations(&self) -> Option<&[Box<dyn Animation>]> {
        self.animations.as_deref()
    }

    fn animations_mut(&mut self) -> &mut [Box<dyn Animation>] {
        self.animations.as_deref_mut().unwrap_or_default()
    }

    /// Position all animations at the segment-local time `local`.
    pub(crate) fn interpolate_at(&mut self, local: f64) {
        for animation in self.animations_mut() {
            let alpha = animation.alpha_at(local);
            animation.interpolate(alpha);
        }
    }

    /// Position all animations at their end state.
    pub(crate) fn complete(&mut self) {
        let duration = self.duration;
        self.interpolate_at(duration);
    }

    /// Restore the state the targets had before the segment began, latest animation first.
    pub(crate) fn reset(&mut self) {
        for animation in self.animations_mut().iter_mut().rev() {
            animation.reset();
        }
    }

    /// The mobjects whose membership this segment depends on.
    pub(crate) fn managed_mobjects(&self) -> Vec<Mobject> {
        let mut mobjects = self.members_before.clone();
        for animation in self.animations().unwrap_or_default() {
            mobjects.extend(animation.targets());
        }
        mobjects
    }

    /// The scene members at the segment-local time `local`.
    pub(crate) fn members_at(&self, local: f64) -> Vec<Mobject> {
        let mut members = self.members_before.clone();
        let Some(animations) = &self.animations else {
            return members;
        };
        for target in animations.iter().flat_map(|a| a.targets()) {
            if !members.contains(&target) {
                members.push(target);
            }
        }
        for removed in animations.iter().flat_map(|a| a.removals(local)) {
            members.retain(|m| *m != removed);
        }
        members
    }
}

/// The position of a segment boundary on a timeline, for drawing markers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SegmentMarker {
    pub index: usize,
    pub start_time: f64,
}

impl From<&Segment> for SegmentMarker {
    fn from(segment: &Segment) -> Self {
        Self {
            index: segment.index,
            start_time: segment.start_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use tableau_animation::{Wait, fade_in, fade_out};
    use tableau_scene::{MobjectState, Scene};

    use super::*;

    #[test]
    fn duration_is_the_longest_animation() {
        let segment = Segment::play(
            0,
            0.0,
            vec![Wait::new(0.5).boxed(), Wait::new(2.0).boxed()],
            Vec::new(),
        );
        assert_eq!(segment.duration(), 2.0);
        assert!(!segment.is_wait());
        assert!(Segment::wait(1, 2.0, 1.0, Vec::new()).is_wait());
    }

    #[test]
    fn members_include_targets_and_drop_completed_removers() {
        let scene = Scene::new();
        let a = scene.create(MobjectState::default());
        let b = scene.create(MobjectState::default());
        let segment = Segment::play(
            0,
            0.0,
            vec![fade_out(&a).boxed(), fade_in(&b).boxed()],
            vec![a.clone()],
        );
        assert_eq!(segment.members_at(0.5), vec![a.clone(), b.clone()]);
        assert_eq!(segment.members_at(1.0), vec![b]);
    }
}
