use tableau_scene::Mobject;

use crate::{Animation, AnimationState, Lifecycle, animation, progress};

/// An animation without targets that only lets time pass.
#[derive(Debug, Clone)]
pub struct Wait {
    duration: f64,
    lifecycle: Lifecycle,
}

impl Wait {
    /// Panics if `duration` is negative or not finite.
    pub fn new(duration: f64) -> Self {
        animation::assert_valid_duration(duration);
        Self {
            duration,
            lifecycle: Lifecycle::default(),
        }
    }
}

impl Animation for Wait {
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
        self.lifecycle.begin();
    }

    fn interpolate(&mut self, _alpha: f64) {
        self.lifecycle.assert_active("interpolate");
    }

    fn update(&mut self, dt: f64) {
        if self.lifecycle.advance(dt) >= self.duration {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.lifecycle.finish();
    }

    fn reset(&mut self) {}

    fn alpha_at(&self, elapsed: f64) -> f64 {
        progress(elapsed, self.duration)
    }

    fn targets(&self) -> Vec<Mobject> {
        Vec::new()
    }
}
