//! The renderable-object side of the engine.
//!
//! A [`Scene`] is a registry of [`Mobject`] handles. Mobjects are mutated in place by animations
//! and updaters. Every mutation and every membership change is recorded as a [`SceneChange`] so
//! that an external renderer can pick up exactly what changed since it last looked, without the
//! animation layer ever knowing how anything is drawn.

mod change;
mod change_collector;
mod id;
mod mobject;
mod scene;

pub use change::*;
pub use change_collector::*;
pub use id::*;
pub use mobject::*;
pub use scene::*;
