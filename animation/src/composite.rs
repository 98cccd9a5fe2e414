//! Animations composed of other animations.
//!
//! All of them implement the [`Animation`](crate::Animation) contract themselves and can be nested
//! freely. When driven through `update()`, they forward time deltas to their children. When driven
//! through `interpolate()`, alpha is mapped linearly to the group's local time and each child is
//! positioned with its own rate function.

mod parallel;
mod sequence;
mod staggered;

pub use parallel::*;
pub use sequence::*;
pub use staggered::*;
