//! Value types shared by mobjects and animations.

mod color;
mod point;
mod unit_interval;

pub use color::*;
pub use point::*;
pub use unit_interval::*;
