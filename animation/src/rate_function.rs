//! Rate functions map the linear progress of an animation to the progress that is used to
//! interpolate its values.
//!
//! All rate functions are pure. They are evaluated again and again for the same `t` while seeking,
//! so they must never depend on anything but `t`.

use std::f64::consts::{FRAC_PI_2, PI};

/// How to adjust linear progress before interpolating.
///
/// The input is clamped to 0..1. The output is conventionally 0..1, but some functions overshoot
/// (`RunningStart`, `Ease(Easing::BackIn)`, ...) or are not monotonic (`ThereAndBack`, `Wiggle`).
#[derive(Debug, Copy, Clone, Default)]
pub enum RateFunction {
    Linear,
    /// A sigmoid based ease in and out. The default.
    #[default]
    Smooth,
    Smoothstep,
    Smootherstep,
    RushInto,
    RushFrom,
    SlowInto,
    DoubleSmooth,
    /// Goes to 1 at the half and back to 0 at the end.
    ThereAndBack,
    /// Like `ThereAndBack`, but rests at 1 for the given ratio of the time.
    ThereAndBackWithPause(f64),
    Wiggle,
    /// Reaches 1 at 80% of the time and stays there.
    Lingering,
    /// Exponential approach to 1 with the given half life (in normalized time).
    ExponentialDecay(f64),
    /// Pulls back a bit before starting.
    RunningStart,
    Ease(Easing),
    Custom(fn(f64) -> f64),
}

impl RateFunction {
    pub fn apply(&self, t: f64) -> f64 {
        let t = clamp(t);
        match *self {
            RateFunction::Linear => t,
            RateFunction::Smooth => smooth(t),
            RateFunction::Smoothstep => t * t * (3.0 - 2.0 * t),
            RateFunction::Smootherstep => t * t * t * (t * (6.0 * t - 15.0) + 10.0),
            RateFunction::RushInto => 2.0 * smooth(t / 2.0),
            RateFunction::RushFrom => 2.0 * smooth(t / 2.0 + 0.5) - 1.0,
            RateFunction::SlowInto => (1.0 - (1.0 - t) * (1.0 - t)).sqrt(),
            RateFunction::DoubleSmooth => {
                if t < 0.5 {
                    0.5 * smooth(2.0 * t)
                } else {
                    0.5 * (1.0 + smooth(2.0 * t - 1.0))
                }
            }
            RateFunction::ThereAndBack => there_and_back(t),
            RateFunction::ThereAndBackWithPause(pause_ratio) => {
                let pause_ratio = clamp(pause_ratio);
                if pause_ratio >= 1.0 {
                    return 1.0;
                }
                let a = 2.0 / (1.0 - pause_ratio);
                if t < 0.5 - pause_ratio / 2.0 {
                    smooth(a * t)
                } else if t < 0.5 + pause_ratio / 2.0 {
                    1.0
                } else {
                    smooth(a - a * t)
                }
            }
            RateFunction::Wiggle => there_and_back(t) * (2.0 * PI * t).sin(),
            RateFunction::Lingering => (t / 0.8).min(1.0),
            RateFunction::ExponentialDecay(half_life) => {
                if half_life <= 0.0 {
                    return 1.0;
                }
                1.0 - (-t / half_life).exp()
            }
            RateFunction::RunningStart => bezier(&[0.0, 0.0, -0.5, -0.5, 1.0, 1.0, 1.0], t),
            RateFunction::Ease(easing) => easing.apply(t),
            RateFunction::Custom(f) => f(t),
        }
    }
}

fn clamp(t: f64) -> f64 {
    if t.is_nan() {
        return 0.0;
    }
    t.clamp(0.0, 1.0)
}

const INFLECTION: f64 = 10.0;

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn smooth(t: f64) -> f64 {
    // The endpoints need to be exact, interpolation must hit its endpoint values.
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    // Shifted and scaled so that the curve passes through 0 and 1.
    let error = sigmoid(-INFLECTION / 2.0);
    ((sigmoid(INFLECTION * (t - 0.5)) - error) / (1.0 - 2.0 * error)).clamp(0.0, 1.0)
}

fn there_and_back(t: f64) -> f64 {
    let t = if t < 0.5 { 2.0 * t } else { 2.0 * (1.0 - t) };
    smooth(t)
}

/// A one dimensional bezier curve through the given control points.
fn bezier(points: &[f64], t: f64) -> f64 {
    let n = points.len() - 1;
    let mut result = 0.0;
    let mut binomial = 1.0;
    for (k, p) in points.iter().enumerate() {
        result += binomial * (1.0 - t).powi((n - k) as i32) * t.powi(k as i32) * p;
        binomial = binomial * (n - k) as f64 / (k + 1) as f64;
    }
    result
}

/// Classic easing curves.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Easing {
    QuadraticIn,
    QuadraticOut,
    QuadraticInOut,

    CubicIn,
    CubicOut,
    CubicInOut,

    QuarticIn,
    QuarticOut,
    QuarticInOut,

    SineIn,
    SineOut,
    SineInOut,

    CircularIn,
    CircularOut,
    CircularInOut,

    ExponentialIn,
    ExponentialOut,
    ExponentialInOut,

    BackIn,
    BackOut,
    BackInOut,

    ElasticIn,
    ElasticOut,
    ElasticInOut,

    BounceIn,
    BounceOut,
    BounceInOut,
}

impl Easing {
    /// `t` is expected to be in 0..1.
    pub fn apply(self, t: f64) -> f64 {
        use Easing::*;

        match self {
            QuadraticIn => t.powi(2),
            QuadraticOut => 1.0 - (1.0 - t).powi(2),
            QuadraticInOut => in_out(t, |t| t.powi(2)),

            CubicIn => t.powi(3),
            CubicOut => 1.0 - (1.0 - t).powi(3),
            CubicInOut => in_out(t, |t| t.powi(3)),

            QuarticIn => t.powi(4),
            QuarticOut => 1.0 - (1.0 - t).powi(4),
            QuarticInOut => in_out(t, |t| t.powi(4)),

            SineIn => 1.0 - (t * FRAC_PI_2).cos(),
            SineOut => (t * FRAC_PI_2).sin(),
            SineInOut => 0.5 * (1.0 - (t * PI).cos()),

            CircularIn => 1.0 - (1.0 - t * t).sqrt(),
            CircularOut => ((2.0 - t) * t).sqrt(),
            CircularInOut => in_out(t, |t| 1.0 - (1.0 - t * t).sqrt()),

            ExponentialIn => exponential_in(t),
            ExponentialOut => 1.0 - exponential_in(1.0 - t),
            ExponentialInOut => in_out(t, exponential_in),

            BackIn => back_in(t),
            BackOut => 1.0 - back_in(1.0 - t),
            BackInOut => in_out(t, back_in),

            ElasticIn => elastic_in(t),
            ElasticOut => 1.0 - elastic_in(1.0 - t),
            ElasticInOut => in_out(t, elastic_in),

            BounceIn => 1.0 - bounce_out(1.0 - t),
            BounceOut => bounce_out(t),
            BounceInOut => in_out(t, |t| 1.0 - bounce_out(1.0 - t)),
        }
    }
}

/// Builds a symmetric in-out curve from an in curve.
fn in_out(t: f64, ease_in: impl Fn(f64) -> f64) -> f64 {
    if t < 0.5 {
        0.5 * ease_in(2.0 * t)
    } else {
        1.0 - 0.5 * ease_in(2.0 - 2.0 * t)
    }
}

fn exponential_in(t: f64) -> f64 {
    if t <= 0.0 {
        0.0
    } else {
        2f64.powf(10.0 * (t - 1.0))
    }
}

fn back_in(t: f64) -> f64 {
    t * t * t - t * (t * PI).sin()
}

fn elastic_in(t: f64) -> f64 {
    (13.0 * FRAC_PI_2 * t).sin() * 2f64.powf(10.0 * (t - 1.0))
}

fn bounce_out(t: f64) -> f64 {
    if t < 4.0 / 11.0 {
        (121.0 * t * t) / 16.0
    } else if t < 8.0 / 11.0 {
        (363.0 / 40.0 * t * t) - (99.0 / 10.0 * t) + 17.0 / 5.0
    } else if t < 9.0 / 10.0 {
        (4356.0 / 361.0 * t * t) - (35442.0 / 1805.0 * t) + 16061.0 / 1805.0
    } else {
        (54.0 / 5.0 * t * t) - (513.0 / 25.0 * t) + 268.0 / 25.0
    }
}
