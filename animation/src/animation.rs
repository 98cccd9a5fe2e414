use std::fmt;

use tableau_scene::Mobject;

/// The default duration of an animation in seconds.
pub const DEFAULT_DURATION: f64 = 1.0;

/// Alpha values this close outside of 0..1 are considered floating point drift and are clamped.
const ALPHA_DRIFT: f64 = 1e-9;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Unstarted,
    Active,
    Finished,
}

/// A stateful unit of change that drives its targets over a logical duration.
///
/// Lifecycle: `begin()` captures whatever is needed to compute the animated state, `update(dt)`
/// advances time and interpolates, and `finish()` performs the final cleanup. `interpolate(alpha)`
/// must compute the targets' state as a pure function of the state captured in `begin()` and
/// `alpha`, so that it can be called with any alpha in any order.
///
/// Composites implement this trait, too, so a scheduler never needs to distinguish them.
///
/// Precondition violations (updating before begin, negative time deltas) panic.
pub trait Animation: fmt::Debug + Send {
    /// The logical duration in seconds.
    fn duration(&self) -> f64;

    fn state(&self) -> AnimationState;

    /// The time advanced since `begin()`. Only meaningful while active.
    fn elapsed(&self) -> f64;

    fn begin(&mut self);

    /// Apply the effect for the given (eased) progress.
    fn interpolate(&mut self, alpha: f64);

    /// Advance by `dt` seconds and interpolate. Finishes the animation when its duration is
    /// reached.
    fn update(&mut self, dt: f64);

    /// Idempotent.
    fn finish(&mut self);

    /// Restore the state captured in `begin()`. Does nothing if the animation never began.
    fn reset(&mut self);

    /// The eased alpha at the local time `elapsed`.
    fn alpha_at(&self, elapsed: f64) -> f64;

    /// The mobjects this animation changes, without duplicates.
    fn targets(&self) -> Vec<Mobject>;

    fn is_finished(&self) -> bool {
        self.state() == AnimationState::Finished
    }

    /// `true` if the targets leave the scene once the animation is complete.
    fn is_remover(&self) -> bool {
        false
    }

    /// The targets that must not be part of the scene anymore at local time `elapsed`.
    fn removals(&self, elapsed: f64) -> Vec<Mobject> {
        if self.is_remover() && elapsed >= self.duration() {
            self.targets()
        } else {
            Vec::new()
        }
    }

    fn boxed(self) -> Box<dyn Animation>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

/// Linear progress of `elapsed` relative to `duration`, in 0..1.
///
/// Zero durations are always complete.
pub fn progress(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    let t = elapsed / duration;
    if !t.is_finite() {
        return 0.0;
    }
    t.clamp(0.0, 1.0)
}

/// Clamps alpha values that drifted slightly out of 0..1.
///
/// Rate functions may overshoot deliberately, those values are left alone.
pub fn settle_alpha(alpha: f64) -> f64 {
    if (-ALPHA_DRIFT..0.0).contains(&alpha) {
        0.0
    } else if alpha > 1.0 && alpha <= 1.0 + ALPHA_DRIFT {
        1.0
    } else {
        alpha
    }
}

pub(crate) fn assert_valid_duration(duration: f64) {
    assert!(
        duration.is_finite() && duration >= 0.0,
        "Animation duration must be finite and non-negative, was {duration}"
    );
}

/// Collect targets in order, dropping duplicates.
pub(crate) fn unique_targets<'a>(
    targets: impl IntoIterator<Item = &'a Box<dyn Animation>>,
) -> Vec<Mobject> {
    let mut result: Vec<Mobject> = Vec::new();
    for target in targets.into_iter().flat_map(|a| a.targets()) {
        if !result.contains(&target) {
            result.push(target);
        }
    }
    result
}

/// The three state lifecycle shared by all animations.
#[derive(Debug, Copy, Clone, Default)]
pub struct Lifecycle {
    state: AnimationState,
    elapsed: f64,
}

impl Lifecycle {
    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Transition from `Unstarted` to `Active`.
    ///
    /// Beginning twice is a programming error and panics in debug builds. In release builds this
    /// returns `false` and the caller must not capture anything.
    pub fn begin(&mut self) -> bool {
        debug_assert_eq!(
            self.state,
            AnimationState::Unstarted,
            "Animation began twice"
        );
        if self.state != AnimationState::Unstarted {
            return false;
        }
        self.state = AnimationState::Active;
        self.elapsed = 0.0;
        true
    }

    pub fn assert_active(&self, operation: &str) {
        assert!(
            self.state == AnimationState::Active,
            "`{operation}` called on an animation that is {:?}",
            self.state
        );
    }

    /// Advance the elapsed time and return it.
    pub fn advance(&mut self, dt: f64) -> f64 {
        assert!(dt >= 0.0, "Animations can not advance by a negative time delta: {dt}");
        self.assert_active("update");
        self.elapsed += dt;
        self.elapsed
    }

    /// Transition to `Finished`. Returns `false` if it was already finished.
    pub fn finish(&mut self) -> bool {
        if self.state == AnimationState::Finished {
            return false;
        }
        self.state = AnimationState::Finished;
        true
    }
}
