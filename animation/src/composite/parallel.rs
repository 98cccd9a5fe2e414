use tableau_scene::Mobject;

use crate::{Animation, AnimationState, Lifecycle, animation::unique_targets, progress};

/// Runs all children at the same time. Lasts as long as the longest child.
#[derive(Debug)]
pub struct Parallel {
    children: Vec<Box<dyn Animation>>,
    duration: f64,
    lifecycle: Lifecycle,
}

impl Parallel {
    pub fn new(children: impl IntoIterator<Item = Box<dyn Animation>>) -> Self {
        let children: Vec<_> = children.into_iter().collect();
        let duration = children.iter().map(|c| c.duration()).fold(0.0, f64::max);
        Self {
            children,
            duration,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn children(&self) -> &[Box<dyn Animation>] {
        &self.children
    }
}

impl Animation for Parallel {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn state(&self) -> AnimationState {
        self.lifecycle.state()
    }

    fn elapsed(&self) -> f64 {
        self.lifecycle.elapsed()
    }

    fn begin(&mut self) {
        if !self.lifecycle.begin() {
            return;
        }
        for child in &mut self.children {
            child.begin();
        }
    }

    fn interpolate(&mut self, alpha: f64) {
        self.lifecycle.assert_active("interpolate");
        let elapsed = alpha.clamp(0.0, 1.0) * self.duration;
        for child in &mut self.children {
            let alpha = child.alpha_at(elapsed);
            child.interpolate(alpha);
        }
    }

    fn update(&mut self, dt: f64) {
        self.lifecycle.advance(dt);
        for child in self.children.iter_mut().filter(|c| !c.is_finished()) {
            child.update(dt);
        }
        if self.children.iter().all(|c| c.is_finished()) {
            self.finish();
        }
    }

    fn finish(&mut self) {
        if !self.lifecycle.finish() {
            return;
        }
        for child in self.children.iter_mut().filter(|c| !c.is_finished()) {
            child.finish();
        }
    }

    fn reset(&mut self) {
        for child in self.children.iter_mut().rev() {
            child.reset();
        }
    }

    fn alpha_at(&self, elapsed: f64) -> f64 {
        progress(elapsed, self.duration)
    }

    fn targets(&self) -> Vec<Mobject> {
        unique_targets(&self.children)
    }

    fn removals(&self, elapsed: f64) -> Vec<Mobject> {
        self.children
            .iter()
            .flat_map(|c| c.removals(elapsed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use tableau_scene::{MobjectState, Scene};

    use super::*;
    use crate::{RateFunction, Wait, fade_out, move_to, rotate};

    #[test]
    fn duration_is_the_longest_child() {
        let group = Parallel::new([
            Wait::new(1.0).boxed(),
            Wait::new(3.0).boxed(),
            Wait::new(2.0).boxed(),
        ]);
        assert_eq!(group.duration(), 3.0);
        assert_eq!(Parallel::new([]).duration(), 0.0);
    }

    #[test]
    fn children_advance_by_their_own_duration() {
        let scene = Scene::new();
        let a = scene.create(MobjectState::default());
        let b = scene.create(MobjectState::default());
        let mut group = Parallel::new([
            rotate(&a, 1.0).with_rate(RateFunction::Linear).boxed(),
            rotate(&b, 1.0)
                .with_duration(2.0)
                .with_rate(RateFunction::Linear)
                .boxed(),
        ]);
        group.begin();

        group.update(0.5);
        assert_abs_diff_eq!(a.state().rotation, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(b.state().rotation, 0.25, epsilon = 1e-12);

        group.update(1.0);
        assert!(group.children()[0].is_finished());
        assert!(!group.is_finished());
        assert_abs_diff_eq!(a.state().rotation, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(b.state().rotation, 0.75, epsilon = 1e-12);

        group.update(0.5);
        assert!(group.is_finished());
        assert_abs_diff_eq!(b.state().rotation, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn interpolate_positions_children_by_group_time() {
        let scene = Scene::new();
        let a = scene.create(MobjectState::default());
        let b = scene.create(MobjectState::default());
        let mut group = Parallel::new([
            move_to(&a, (1.0, 0.0)).with_rate(RateFunction::Linear).boxed(),
            move_to(&b, (4.0, 0.0))
                .with_duration(4.0)
                .with_rate(RateFunction::Linear)
                .boxed(),
        ]);
        group.begin();

        // Group time 2.0 of 4.0
        group.interpolate(0.5);
        assert_eq!(a.state().position.x, 1.0);
        assert_eq!(b.state().position.x, 2.0);

        group.interpolate(0.0);
        assert_eq!(a.state().position.x, 0.0);
        assert_eq!(b.state().position.x, 0.0);
    }

    #[test]
    fn removals_are_collected_from_children() {
        let scene = Scene::new();
        let a = scene.create(MobjectState::default());
        let b = scene.create(MobjectState::default());
        let group = Parallel::new([
            fade_out(&a).with_duration(2.0).boxed(),
            move_to(&b, (1.0, 1.0)).boxed(),
        ]);
        assert!(group.removals(1.0).is_empty());
        assert_eq!(group.removals(2.0), vec![a.clone()]);
        assert_eq!(group.targets(), vec![a, b]);
    }

    #[test]
    fn finish_finishes_all_children() {
        let mut group = Parallel::new([Wait::new(1.0).boxed(), Wait::new(2.0).boxed()]);
        group.begin();
        group.update(0.1);
        group.finish();
        assert!(group.children().iter().all(|c| c.is_finished()));
        group.finish();
    }
}
