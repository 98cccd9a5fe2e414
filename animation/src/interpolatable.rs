use tableau_geometry::{Color, Point, UnitInterval};
use tableau_scene::MobjectState;

/// Values that can be blended between two endpoints.
///
/// `t` is usually in 0..1, but rate functions may overshoot, so implementations extrapolate
/// linearly where that makes sense. Implementations must return exactly `from` at 0 and exactly
/// `to` at 1, seeking relies on that.
pub trait Interpolatable: Clone {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        from * (1.0 - t as f32) + to * t as f32
    }
}

impl Interpolatable for f64 {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        from * (1.0 - t) + to * t
    }
}

impl Interpolatable for Point {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        *from * (1.0 - t) + *to * t
    }
}

impl Interpolatable for Color {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        *from * (1.0 - t as f32) + *to * t as f32
    }
}

impl Interpolatable for UnitInterval {
    /// Overshooting rate functions would leave the interval, so the result saturates.
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        UnitInterval::saturating(f64::interpolate(&from.value(), &to.value(), t))
    }
}

impl Interpolatable for MobjectState {
    fn interpolate(from: &Self, to: &Self, t: f64) -> Self {
        MobjectState {
            position: interpolate(&from.position, &to.position, t),
            scale: interpolate(&from.scale, &to.scale, t),
            rotation: interpolate(&from.rotation, &to.rotation, t),
            color: interpolate(&from.color, &to.color, t),
            opacity: interpolate(&from.opacity, &to.opacity, t),
        }
    }
}

pub fn interpolate<T>(from: &T, to: &T, t: f64) -> T
where
    T: Interpolatable,
{
    T::interpolate(from, to, t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let from = MobjectState::default();
        let to = MobjectState::default()
            .at((3.0, -2.0))
            .with_scale(2.0)
            .with_color(Color::RED)
            .with_opacity(0.25);

        assert_eq!(interpolate(&from, &to, 0.0), from);
        assert_eq!(interpolate(&from, &to, 1.0), to);
    }

    #[test]
    fn opacity_saturates_when_overshooting() {
        let v = interpolate(&UnitInterval::ZERO, &UnitInterval::ONE, 1.2);
        assert_eq!(v, UnitInterval::ONE);
    }
}
