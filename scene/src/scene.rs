use std::sync::Arc;

use log::trace;
use parking_lot::Mutex;

use crate::{ChangeCollector, Generator, Mobject, MobjectState, SceneChange};

/// The registry of mobjects that are currently visible, in drawing order.
///
/// A scene is cheap to clone, clones refer to the same registry. This way the live timeline, the
/// segment timeline and the playback driver can all hold on to it.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    // Mobjects refer to `shared` so that they can report changes and release their ids when
    // dropped. The members are kept outside of it, otherwise the mobjects would keep themselves
    // alive.
    shared: Arc<Shared>,
    members: Arc<Mutex<Vec<Mobject>>>,
}

#[derive(Debug, Default)]
pub(crate) struct Shared {
    pub changes: ChangeCollector,
    pub ids: Mutex<Generator>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new mobject. It is not a member of the scene until it gets added.
    pub fn create(&self, state: MobjectState) -> Mobject {
        let id = self.shared.ids.lock().acquire();
        Mobject::new(id, state, self.shared.clone())
    }

    /// Add a mobject on top of all other members. Returns `false` if it already is a member.
    pub fn add(&self, mobject: &Mobject) -> bool {
        let mut members = self.members.lock();
        if members.contains(mobject) {
            return false;
        }
        trace!("Adding mobject {}", mobject.id());
        members.push(mobject.clone());
        self.shared.changes.push(SceneChange::Added(mobject.id()));
        true
    }

    /// Remove a mobject. Returns `false` if it was not a member.
    pub fn remove(&self, mobject: &Mobject) -> bool {
        let mut members = self.members.lock();
        let Some(index) = members.iter().position(|m| m == mobject) else {
            return false;
        };
        trace!("Removing mobject {}", mobject.id());
        members.remove(index);
        self.shared.changes.push(SceneChange::Removed(mobject.id()));
        true
    }

    pub fn has(&self, mobject: &Mobject) -> bool {
        self.members.lock().contains(mobject)
    }

    /// The current members in drawing order.
    pub fn members(&self) -> Vec<Mobject> {
        self.members.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.members.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.lock().is_empty()
    }

    /// Replace the membership wholesale.
    ///
    /// Only the differences are reported as changes: Members that disappear are removed first,
    /// then new members are added.
    pub fn set_members(&self, new_members: Vec<Mobject>) {
        let mut members = self.members.lock();

        for old in members.iter().filter(|m| !new_members.contains(m)) {
            self.shared.changes.push(SceneChange::Removed(old.id()));
        }
        for new in new_members.iter().filter(|m| !members.contains(m)) {
            self.shared.changes.push(SceneChange::Added(new.id()));
        }

        *members = new_members;
    }

    pub fn clear(&self) {
        self.set_members(Vec::new());
    }

    /// Run the updaters of all members in drawing order.
    pub fn run_updaters(&self, dt: f64) {
        // Updaters may add or remove members, so don't hold the lock.
        for mobject in self.members() {
            mobject.run_updaters(dt);
        }
    }

    /// Take the changes that need to be sent to the renderer.
    pub fn take_changes(&self) -> Vec<SceneChange> {
        self.shared.changes.take_all()
    }
}

#[cfg(test)]
mod tests {
    use tableau_geometry::Point;

    use super::*;

    #[test]
    fn add_is_idempotent() {
        let scene = Scene::new();
        let m = scene.create(MobjectState::default());
        assert!(!scene.has(&m));

        assert!(scene.add(&m));
        assert!(!scene.add(&m));
        assert_eq!(scene.len(), 1);

        assert!(scene.remove(&m));
        assert!(!scene.remove(&m));
        assert!(scene.is_empty());
    }

    #[test]
    fn changes_are_reported_in_order() {
        let scene = Scene::new();
        let m = scene.create(MobjectState::default());
        scene.add(&m);
        m.update_with(|s| s.position = Point::new(1.0, 2.0));

        let changes = scene.take_changes();
        assert_eq!(changes.len(), 3);
        assert!(matches!(changes[0], SceneChange::Created(..)));
        assert_eq!(changes[1], SceneChange::Added(m.id()));
        assert_eq!(
            changes[2],
            SceneChange::Updated(m.id(), MobjectState::default().at((1.0, 2.0)))
        );
        assert!(scene.take_changes().is_empty());
    }

    #[test]
    fn set_members_reports_only_differences() {
        let scene = Scene::new();
        let a = scene.create(MobjectState::default());
        let b = scene.create(MobjectState::default());
        let c = scene.create(MobjectState::default());
        scene.add(&a);
        scene.add(&b);
        scene.take_changes();

        scene.set_members(vec![b.clone(), c.clone()]);

        assert_eq!(
            scene.take_changes(),
            vec![SceneChange::Removed(a.id()), SceneChange::Added(c.id())]
        );
        assert_eq!(scene.members(), vec![b, c]);
    }

    #[test]
    fn dropping_the_last_handle_releases_the_id() {
        let scene = Scene::new();
        let a = scene.create(MobjectState::default());
        let id = a.id();
        drop(a);
        assert_eq!(scene.take_changes().last(), Some(&SceneChange::Dropped(id)));
        assert_eq!(scene.create(MobjectState::default()).id(), id);
    }

    #[test]
    fn updaters_may_read_other_mobjects() {
        let scene = Scene::new();
        let leader = scene.create(MobjectState::default().at((3.0, 0.0)));
        let follower = scene.create(MobjectState::default());
        scene.add(&leader);
        scene.add(&follower);

        let followed = leader.clone();
        follower.add_updater(move |state, _dt| {
            state.position = followed.state().position + Point::UP;
        });

        scene.run_updaters(1.0 / 60.0);
        assert_eq!(follower.state().position, Point::new(3.0, 1.0));
    }

    #[test]
    fn updaters_receive_dt_and_may_read_themselves() {
        let scene = Scene::new();
        let m = scene.create(MobjectState::default());
        scene.add(&m);

        let this = m.clone();
        m.add_updater(move |state, dt| {
            // Reading the handle while updating must not deadlock.
            let _ = this.state();
            state.rotation += dt;
        });

        scene.run_updaters(0.5);
        scene.run_updaters(0.25);
        assert_eq!(m.state().rotation, 0.75);
        assert!(m.has_updaters());
        m.clear_updaters();
        assert!(!m.has_updaters());
    }
}
