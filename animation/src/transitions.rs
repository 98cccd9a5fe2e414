//! The library of mobject transitions and their constructor functions.

use tableau_geometry::{Color, Point, UnitInterval, Vector};
use tableau_scene::{Mobject, MobjectState};

use crate::{RateFunction, Transition, Tween};

pub fn move_to(target: &Mobject, position: impl Into<Point>) -> Tween<MoveTo> {
    Tween::new(target, MoveTo(position.into()))
}

pub fn shift(target: &Mobject, by: impl Into<Vector>) -> Tween<Shift> {
    Tween::new(target, Shift(by.into()))
}

/// Scale relative to the current scale.
pub fn scale(target: &Mobject, factor: f64) -> Tween<Scale> {
    Tween::new(target, Scale(factor))
}

/// Rotate counter-clockwise by `angle` radians.
pub fn rotate(target: &Mobject, angle: f64) -> Tween<Rotate> {
    Tween::new(target, Rotate(angle))
}

pub fn set_color(target: &Mobject, color: Color) -> Tween<SetColor> {
    Tween::new(target, SetColor(color))
}

pub fn fade_in(target: &Mobject) -> Tween<FadeIn> {
    Tween::new(target, FadeIn::default())
}

pub fn fade_out(target: &Mobject) -> Tween<FadeOut> {
    Tween::new(target, FadeOut::default())
}

/// Briefly enlarge and highlight the target.
pub fn indicate(target: &Mobject) -> Tween<Indicate> {
    Tween::new(target, Indicate::default())
}

pub fn transform_to(target: &Mobject, state: MobjectState) -> Tween<TransformTo> {
    Tween::new(target, TransformTo(state))
}

/// Compute the state from the begin state and alpha. `f` must be pure.
pub fn update_from_alpha(
    target: &Mobject,
    f: impl Fn(&MobjectState, f64) -> MobjectState + Send + 'static,
) -> Tween<UpdateFromAlpha> {
    Tween::new(target, UpdateFromAlpha(Box::new(f)))
}

#[derive(Debug, Copy, Clone)]
pub struct MoveTo(pub Point);

impl Transition for MoveTo {
    fn endpoints(&self, begin: &MobjectState) -> (MobjectState, MobjectState) {
        (*begin, begin.at(self.0))
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Shift(pub Vector);

impl Transition for Shift {
    fn endpoints(&self, begin: &MobjectState) -> (MobjectState, MobjectState) {
        (*begin, begin.at(begin.position + self.0))
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Scale(pub f64);

impl Transition for Scale {
    fn endpoints(&self, begin: &MobjectState) -> (MobjectState, MobjectState) {
        (*begin, begin.with_scale(begin.scale * self.0))
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Rotate(pub f64);

impl Transition for Rotate {
    fn endpoints(&self, begin: &MobjectState) -> (MobjectState, MobjectState) {
        (*begin, begin.with_rotation(begin.rotation + self.0))
    }
}

#[derive(Debug, Copy, Clone)]
pub struct SetColor(pub Color);

impl Transition for SetColor {
    fn endpoints(&self, begin: &MobjectState) -> (MobjectState, MobjectState) {
        (*begin, begin.with_color(self.0))
    }
}

/// Fades from transparent to the opacity the mobject had at begin, optionally moving in by
/// `shift`.
#[derive(Debug, Copy, Clone, Default)]
pub struct FadeIn {
    pub shift: Vector,
}

impl Transition for FadeIn {
    fn endpoints(&self, begin: &MobjectState) -> (MobjectState, MobjectState) {
        let from = begin
            .with_opacity(UnitInterval::ZERO)
            .at(begin.position - self.shift);
        (from, *begin)
    }
}

/// Fades to transparent, optionally moving out by `shift`, and leaves the scene.
#[derive(Debug, Copy, Clone, Default)]
pub struct FadeOut {
    pub shift: Vector,
}

impl Transition for FadeOut {
    fn endpoints(&self, begin: &MobjectState) -> (MobjectState, MobjectState) {
        let to = begin
            .with_opacity(UnitInterval::ZERO)
            .at(begin.position + self.shift);
        (*begin, to)
    }

    fn is_remover(&self) -> bool {
        true
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Indicate {
    pub scale_factor: f64,
    pub color: Color,
}

impl Default for Indicate {
    fn default() -> Self {
        Self {
            scale_factor: 1.2,
            color: Color::YELLOW,
        }
    }
}

impl Transition for Indicate {
    fn endpoints(&self, begin: &MobjectState) -> (MobjectState, MobjectState) {
        let to = begin
            .with_scale(begin.scale * self.scale_factor)
            .with_color(self.color);
        (*begin, to)
    }

    fn is_momentary(&self) -> bool {
        true
    }

    fn default_rate(&self) -> RateFunction {
        RateFunction::ThereAndBack
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TransformTo(pub MobjectState);

impl Transition for TransformTo {
    fn endpoints(&self, begin: &MobjectState) -> (MobjectState, MobjectState) {
        (*begin, self.0)
    }
}

#[derive(derive_more::Debug)]
#[debug("UpdateFromAlpha")]
pub struct UpdateFromAlpha(Box<dyn Fn(&MobjectState, f64) -> MobjectState + Send>);

impl Transition for UpdateFromAlpha {
    fn endpoints(&self, begin: &MobjectState) -> (MobjectState, MobjectState) {
        (*begin, *begin)
    }

    fn state_at(
        &self,
        begin: &MobjectState,
        _from: &MobjectState,
        _to: &MobjectState,
        alpha: f64,
    ) -> MobjectState {
        (self.0)(begin, alpha)
    }

    fn default_rate(&self) -> RateFunction {
        RateFunction::Linear
    }
}
