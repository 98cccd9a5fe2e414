use tableau_scene::Mobject;

use crate::{Animation, AnimationState, Lifecycle, animation::unique_targets, progress};

/// Starts each child a fraction of its predecessor's duration after the predecessor started.
///
/// A `lag_ratio` of 0 behaves like [`Parallel`](crate::Parallel), a `lag_ratio` of 1 like
/// [`Sequence`](crate::Sequence).
#[derive(Debug)]
pub struct Staggered {
    children: Vec<Box<dyn Animation>>,
    offsets: Vec<f64>,
    lag_ratio: f64,
    duration: f64,
    lifecycle: Lifecycle,
}

impl Staggered {
    /// Panics if `lag_ratio` is negative or not finite.
    pub fn new(children: impl IntoIterator<Item = Box<dyn Animation>>, lag_ratio: f64) -> Self {
        assert!(
            lag_ratio.is_finite() && lag_ratio >= 0.0,
            "Lag ratio must be finite and non-negative, was {lag_ratio}"
        );
        let children: Vec<_> = children.into_iter().collect();

        let mut offsets = Vec::with_capacity(children.len());
        let mut offset = 0.0;
        let mut previous_duration = None;
        for child in &children {
            if let Some(previous) = previous_duration {
                offset += lag_ratio * previous;
            }
            offsets.push(offset);
            previous_duration = Some(child.duration());
        }

        let duration = children
            .iter()
            .zip(&offsets)
            .map(|(c, offset)| offset + c.duration())
            .fold(0.0, f64::max);

        Self {
            children,
            offsets,
            lag_ratio,
            duration,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn children(&self) -> &[Box<dyn Animation>] {
        &self.children
    }

    /// The local start time of each child.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn lag_ratio(&self) -> f64 {
        self.lag_ratio
    }
}

impl Animation for Staggered {
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
        for (child, offset) in self.children.iter_mut().zip(&self.offsets) {
            if *offset <= 0.0 {
                child.begin();
            }
        }
    }

    fn interpolate(&mut self, alpha: f64) {
        self.lifecycle.assert_active("interpolate");
        let elapsed = alpha.clamp(0.0, 1.0) * self.duration;

        // Children that did not start yet at `elapsed` give back what they changed, latest first.
        for (child, offset) in self.children.iter_mut().zip(&self.offsets).rev() {
            if *offset > elapsed {
                child.reset();
            }
        }

        for (child, offset) in self.children.iter_mut().zip(&self.offsets) {
            if *offset > elapsed {
                continue;
            }
            if child.state() == AnimationState::Unstarted {
                child.begin();
            }
            if !child.is_finished() {
                let alpha = child.alpha_at(elapsed - offset);
                child.interpolate(alpha);
            }
        }
    }

    fn update(&mut self, dt: f64) {
        let elapsed = self.lifecycle.advance(dt);
        for (child, offset) in self.children.iter_mut().zip(&self.offsets) {
            if *offset > elapsed {
                continue;
            }
            match child.state() {
                AnimationState::Unstarted => {
                    child.begin();
                    child.update(elapsed - offset);
                }
                AnimationState::Active => child.update(dt),
                AnimationState::Finished => {}
            }
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
            if child.state() == AnimationState::Unstarted {
                child.begin();
            }
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
            .zip(&self.offsets)
            .flat_map(|(c, offset)| c.removals(elapsed - offset))
            .collect()
    }
}
