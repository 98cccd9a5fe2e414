use std::{mem, sync::Arc};

use parking_lot::Mutex;
use tableau_geometry::{Color, Point, UnitInterval};

use crate::{Id, SceneChange, scene::Shared};

/// A continuous per-frame behavior attached to a mobject, independent of any animation.
///
/// Receives the state to modify and the frame's time delta in seconds.
pub type Updater = Box<dyn FnMut(&mut MobjectState, f64) + Send>;

/// Everything about a mobject that animations are allowed to touch.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MobjectState {
    pub position: Point,
    pub scale: f64,
    /// Radians, counter-clockwise.
    pub rotation: f64,
    pub color: Color,
    pub opacity: UnitInterval,
}

impl Default for MobjectState {
    fn default() -> Self {
        Self {
            position: Point::ORIGIN,
            scale: 1.0,
            rotation: 0.0,
            color: Color::WHITE,
            opacity: UnitInterval::ONE,
        }
    }
}

impl MobjectState {
    pub fn at(self, position: impl Into<Point>) -> Self {
        Self {
            position: position.into(),
            ..self
        }
    }

    pub fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    pub fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }

    pub fn with_opacity(self, opacity: impl Into<UnitInterval>) -> Self {
        Self {
            opacity: opacity.into(),
            ..self
        }
    }
}

/// A shared handle to a drawable object.
///
/// Clones refer to the same object. Two handles are equal if they refer to the same object.
#[derive(Debug, Clone)]
pub struct Mobject {
    inner: Arc<InnerMobject>,
}

impl PartialEq for Mobject {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Mobject {}

impl Mobject {
    pub(crate) fn new(id: Id, state: MobjectState, shared: Arc<Shared>) -> Self {
        shared.changes.push(SceneChange::Created(id, state));

        Self {
            inner: InnerMobject {
                id,
                shared,
                state: state.into(),
                updaters: Default::default(),
            }
            .into(),
        }
    }

    pub fn id(&self) -> Id {
        self.inner.id
    }

    /// A copy of the current state.
    pub fn state(&self) -> MobjectState {
        *self.inner.state.lock()
    }

    pub fn set_state(&self, state: MobjectState) {
        *self.inner.state.lock() = state;
        self.inner.updated(state);
    }

    pub fn update_with(&self, f: impl FnOnce(&mut MobjectState)) {
        let state = {
            let mut state = self.inner.state.lock();
            f(&mut state);
            *state
        };
        self.inner.updated(state);
    }

    pub fn add_updater(&self, updater: impl FnMut(&mut MobjectState, f64) + Send + 'static) {
        self.inner.updaters.lock().push(Box::new(updater));
    }

    pub fn clear_updaters(&self) {
        self.inner.updaters.lock().clear();
    }

    pub fn has_updaters(&self) -> bool {
        !self.inner.updaters.lock().is_empty()
    }

    /// Run all updaters in the order they were added.
    ///
    /// The updaters work on a copy of the state and do not hold any lock while running, so they
    /// may freely read other mobjects, or this one.
    pub fn run_updaters(&self, dt: f64) {
        let mut updaters = mem::take(&mut *self.inner.updaters.lock());
        if updaters.is_empty() {
            return;
        }

        let mut state = self.state();
        for updater in &mut updaters {
            updater(&mut state, dt);
        }
        self.set_state(state);

        let mut slot = self.inner.updaters.lock();
        // Updaters added while running go after the existing ones.
        let added = mem::replace(&mut *slot, updaters);
        slot.extend(added);
    }
}

#[derive(derive_more::Debug)]
struct InnerMobject {
    id: Id,
    #[debug(skip)]
    shared: Arc<Shared>,
    state: Mutex<MobjectState>,
    #[debug(skip)]
    updaters: Mutex<Vec<Updater>>,
}

impl InnerMobject {
    fn updated(&self, state: MobjectState) {
        self.shared.changes.push(SceneChange::Updated(self.id, state));
    }
}

impl Drop for InnerMobject {
    fn drop(&mut self) {
        self.shared.changes.push(SceneChange::Dropped(self.id));
        self.shared.ids.lock().release(self.id);
    }
}
