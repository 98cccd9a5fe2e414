use std::fmt;

use tableau_scene::{Mobject, MobjectState};

use crate::{
    Animation, AnimationState, DEFAULT_DURATION, Lifecycle, RateFunction, animation,
    interpolate, progress, settle_alpha,
};

/// Describes how a mobject changes over the course of a [`Tween`].
pub trait Transition: fmt::Debug + Send {
    /// Compute the start and the end state from the state the mobject had when the animation
    /// began.
    fn endpoints(&self, begin: &MobjectState) -> (MobjectState, MobjectState);

    /// The state at `alpha`. Must only depend on its arguments.
    fn state_at(
        &self,
        _begin: &MobjectState,
        from: &MobjectState,
        to: &MobjectState,
        alpha: f64,
    ) -> MobjectState {
        interpolate(from, to, alpha)
    }

    /// Momentary transitions restore the begin state when finished instead of keeping the final
    /// one.
    fn is_momentary(&self) -> bool {
        false
    }

    fn is_remover(&self) -> bool {
        false
    }

    fn default_rate(&self) -> RateFunction {
        RateFunction::Smooth
    }
}

/// An animation of a single mobject's state.
#[derive(Debug)]
pub struct Tween<T> {
    target: Mobject,
    transition: T,
    duration: f64,
    rate: RateFunction,
    lifecycle: Lifecycle,
    captured: Option<Captured>,
}

#[derive(Debug, Copy, Clone)]
struct Captured {
    begin: MobjectState,
    from: MobjectState,
    to: MobjectState,
}

impl<T: Transition> Tween<T> {
    pub fn new(target: &Mobject, transition: T) -> Self {
        let rate = transition.default_rate();
        Self {
            target: target.clone(),
            transition,
            duration: DEFAULT_DURATION,
            rate,
            lifecycle: Lifecycle::default(),
            captured: None,
        }
    }

    /// Panics if `duration` is negative or not finite.
    pub fn with_duration(self, duration: f64) -> Self {
        animation::assert_valid_duration(duration);
        Self { duration, ..self }
    }

    pub fn with_rate(self, rate: RateFunction) -> Self {
        Self { rate, ..self }
    }

    pub fn target(&self) -> &Mobject {
        &self.target
    }

    pub fn transition(&self) -> &T {
        &self.transition
    }

    pub fn rate(&self) -> RateFunction {
        self.rate
    }

    fn apply(&self, alpha: f64) {
        let Some(captured) = &self.captured else {
            return;
        };
        let state =
            self.transition
                .state_at(&captured.begin, &captured.from, &captured.to, alpha);
        self.target.set_state(state);
    }
}

impl<T: Transition> Animation for Tween<T> {
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
        let begin = self.target.state();
        let (from, to) = self.transition.endpoints(&begin);
        self.captured = Some(Captured { begin, from, to });
        self.apply(self.alpha_at(0.0));
    }

    fn interpolate(&mut self, alpha: f64) {
        self.lifecycle.assert_active("interpolate");
        self.apply(settle_alpha(alpha));
    }

    fn update(&mut self, dt: f64) {
        let elapsed = self.lifecycle.advance(dt);
        self.interpolate(self.alpha_at(elapsed));
        if elapsed >= self.duration {
            self.finish();
        }
    }

    fn finish(&mut self) {
        if !self.lifecycle.finish() {
            return;
        }
        if self.transition.is_momentary() {
            self.reset();
        } else {
            self.apply(self.rate.apply(1.0));
        }
    }

    fn reset(&mut self) {
        if let Some(captured) = &self.captured {
            self.target.set_state(captured.begin);
        }
    }

    fn alpha_at(&self, elapsed: f64) -> f64 {
        self.rate.apply(progress(elapsed, self.duration))
    }

    fn targets(&self) -> Vec<Mobject> {
        vec![self.target.clone()]
    }

    fn is_remover(&self) -> bool {
        self.transition.is_remover()
    }
}
