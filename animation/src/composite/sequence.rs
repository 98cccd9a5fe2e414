use tableau_scene::Mobject;

use crate::{Animation, AnimationState, Lifecycle, animation::unique_targets, progress};

/// Runs the children one after another.
#[derive(Debug)]
pub struct Sequence {
    children: Vec<Box<dyn Animation>>,
    starts: Vec<f64>,
    duration: f64,
    /// The index of the child currently receiving time deltas.
    current: usize,
    lifecycle: Lifecycle,
}

impl Sequence {
    pub fn new(children: impl IntoIterator<Item = Box<dyn Animation>>) -> Self {
        let children: Vec<_> = children.into_iter().collect();
        let mut starts = Vec::with_capacity(children.len());
        let mut duration = 0.0;
        for child in &children {
            starts.push(duration);
            duration += child.duration();
        }
        Self {
            children,
            starts,
            duration,
            current: 0,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn children(&self) -> &[Box<dyn Animation>] {
        &self.children
    }

    /// The local start time of each child.
    pub fn starts(&self) -> &[f64] {
        &self.starts
    }
}

impl Animation for Sequence {
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
        self.current = 0;
        if let Some(first) = self.children.first_mut() {
            first.begin();
        }
    }

    fn interpolate(&mut self, alpha: f64) {
        self.lifecycle.assert_active("interpolate");
        let elapsed = alpha.clamp(0.0, 1.0) * self.duration;

        for (child, start) in self.children.iter_mut().zip(&self.starts).rev() {
            if *start > elapsed {
                child.reset();
            }
        }

        for (child, start) in self.children.iter_mut().zip(&self.starts) {
            let local = elapsed - start;
            if local < 0.0 {
                break;
            }
            if child.state() == AnimationState::Unstarted {
                child.begin();
            }
            if !child.is_finished() {
                let alpha = child.alpha_at(local);
                child.interpolate(alpha);
            }
        }
    }

    /// Time left over by a finishing child is carried over to the next one.
    fn update(&mut self, dt: f64) {
        self.lifecycle.advance(dt);
        let mut remaining = dt;
        while let Some(child) = self.children.get_mut(self.current) {
            match child.state() {
                AnimationState::Finished => {
                    self.current += 1;
                    continue;
                }
                AnimationState::Unstarted => child.begin(),
                AnimationState::Active => {}
            }
            let left = (child.duration() - child.elapsed()).max(0.0);
            child.update(remaining);
            if !child.is_finished() {
                break;
            }
            remaining = (remaining - left).max(0.0);
            self.current += 1;
        }
        if self.current >= self.children.len() {
            self.finish();
        }
    }

    fn finish(&mut self) {
        if !self.lifecycle.finish() {
            return;
        }
        for child in self.children.iter_mut().filter(|c| !c.is_finished()) {
            if child.state() == AnimationState::Unstarted {
                child.begin();
            }
            child.finish();
        }
        self.current = self.children.len();
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
            .zip(&self.starts)
            .flat_map(|(c, start)| c.removals(elapsed - start))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use tableau_geometry::Point;
    use tableau_scene::{MobjectState, Scene};

    use super::*;
    use crate::{RateFunction, Wait, fade_out, move_to, shift};

    #[test]
    fn duration_is_the_sum_of_all_children() {
        let sequence = Sequence::new([Wait::new(1.0).boxed(), Wait::new(2.5).boxed()]);
        assert_eq!(sequence.duration(), 3.5);
        assert_eq!(sequence.starts(), &[0.0, 1.0]);
    }

    #[test]
    fn leftover_time_is_carried_to_the_next_child() {
        let mut sequence = Sequence::new([Wait::new(1.0).boxed(), Wait::new(1.0).boxed()]);
        sequence.begin();
        sequence.update(1.5);

        let children = sequence.children();
        assert!(children[0].is_finished());
        assert_eq!(children[1].state(), AnimationState::Active);
        assert_eq!(children[1].elapsed(), 0.5);
        assert!(!sequence.is_finished());

        sequence.update(0.5);
        assert!(sequence.is_finished());
    }

    #[test]
    fn a_large_delta_crosses_several_children() {
        let mut sequence = Sequence::new([
            Wait::new(0.5).boxed(),
            Wait::new(0.0).boxed(),
            Wait::new(0.5).boxed(),
            Wait::new(1.0).boxed(),
        ]);
        sequence.begin();
        sequence.update(1.25);
        assert!(sequence.children()[..3].iter().all(|c| c.is_finished()));
        assert_eq!(sequence.children()[3].elapsed(), 0.25);
    }

    #[test]
    fn second_child_starts_from_where_the_first_ended() {
        let scene = Scene::new();
        let dot = scene.create(MobjectState::default());
        let mut sequence = Sequence::new([
            move_to(&dot, (1.0, 0.0)).with_rate(RateFunction::Linear).boxed(),
            shift(&dot, (0.0, 2.0)).with_rate(RateFunction::Linear).boxed(),
        ]);
        sequence.begin();
        sequence.update(1.5);
        assert_abs_diff_eq!(dot.state().position.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dot.state().position.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn interpolate_resets_children_that_did_not_start() {
        let scene = Scene::new();
        let dot = scene.create(MobjectState::default());
        let mut sequence = Sequence::new([
            move_to(&dot, (1.0, 0.0)).with_rate(RateFunction::Linear).boxed(),
            shift(&dot, (0.0, 2.0)).with_rate(RateFunction::Linear).boxed(),
        ]);
        sequence.begin();

        sequence.interpolate(1.0);
        assert_eq!(dot.state().position, Point::new(1.0, 2.0));

        sequence.interpolate(0.25);
        assert_abs_diff_eq!(dot.state().position.x, 0.5, epsilon = 1e-12);
        assert_eq!(dot.state().position.y, 0.0);

        // Seeking forward again reuses the state captured on the first begin.
        sequence.interpolate(0.75);
        assert_abs_diff_eq!(dot.state().position.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dot.state().position.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn removals_use_the_childrens_local_time() {
        let scene = Scene::new();
        let dot = scene.create(MobjectState::default());
        let sequence = Sequence::new([Wait::new(1.0).boxed(), fade_out(&dot).boxed()]);
        assert!(sequence.removals(1.5).is_empty());
        assert_eq!(sequence.removals(2.0), vec![dot]);
    }
}
