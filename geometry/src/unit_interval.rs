use log::warn;

/// 0 .. 1
/// https://english.stackexchange.com/questions/275734/a-word-for-a-value-between-0-and-1-inclusive
#[derive(
    Copy, Clone, PartialEq, PartialOrd, Debug, derive_more::Mul, derive_more::MulAssign,
)]
pub struct UnitInterval(f64);

impl Default for UnitInterval {
    fn default() -> Self {
        Self::ONE
    }
}

impl UnitInterval {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    /// Clamps `v` into 0..1. Clamping is logged, because it usually hints at a caller mistake.
    pub fn new(mut v: f64) -> Self {
        if v.is_nan() {
            warn!("Unit Interval provided with NaN, set to 0.0");
            v = 0.0;
        }
        let clamped = v.clamp(0.0, 1.0);
        if clamped != v {
            warn!("Unit Interval clamped to be in the 0.0..1.0 range, was: {v}");
        }
        Self(clamped)
    }

    /// Clamps silently. For values that are expected to drift slightly out of range, like
    /// interpolation results.
    pub fn saturating(v: f64) -> Self {
        if v.is_nan() {
            return Self::ZERO;
        }
        Self(v.clamp(0.0, 1.0))
    }

    pub const fn new_unchecked(v: f64) -> Self {
        Self(v)
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for UnitInterval {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<UnitInterval> for f64 {
    fn from(ui: UnitInterval) -> Self {
        ui.0
    }
}

#[cfg(test)]
mod tests {
    use super::UnitInterval;

    #[test]
    fn clamps_out_of_range_values() {
        assert_eq!(UnitInterval::new(1.5).value(), 1.0);
        assert_eq!(UnitInterval::new(-0.5).value(), 0.0);
        assert_eq!(UnitInterval::new(f64::NAN).value(), 0.0);
        assert_eq!(UnitInterval::saturating(1.0 + 1e-12).value(), 1.0);
    }
}
