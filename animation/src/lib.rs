//! Animations over the mobjects of a [`Scene`](tableau_scene::Scene).
//!
//! The building block is the [`Animation`] trait. [`Tween`]s change a single mobject with a
//! [`Transition`], [`Wait`] lets time pass, and the [composites](crate::composite) combine any of
//! them. A live [`Timeline`] drives animations from frame time deltas.

mod animation;
pub mod composite;
mod interpolatable;
mod rate_function;
mod timeline;
mod transitions;
mod tween;
mod wait;

pub use animation::*;
pub use composite::*;
pub use interpolatable::*;
pub use rate_function::*;
pub use timeline::*;
pub use transitions::*;
pub use tween::*;
pub use wait::*;
