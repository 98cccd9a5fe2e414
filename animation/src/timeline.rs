use log::{debug, trace};
use tableau_scene::Scene;

use crate::{Animation, Wait};

/// Drives animations in real time as a frame loop produces time deltas.
///
/// Animations passed to [`Timeline::play`] start immediately. Their targets are added to the
/// scene before they begin, and targets of finished removers are taken out of it again.
#[derive(Debug)]
pub struct Timeline {
    scene: Scene,
    active: Vec<Box<dyn Animation>>,
    time: f64,
}

impl Timeline {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            active: Vec::new(),
            time: 0.0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Start all `animations` now.
    pub fn play(&mut self, animations: impl IntoIterator<Item = Box<dyn Animation>>) {
        for mut animation in animations {
            for target in animation.targets() {
                self.scene.add(&target);
            }
            animation.begin();
            trace!("Playing {animation:?}");
            self.active.push(animation);
        }
    }

    /// Let `duration` seconds pass before the timeline becomes idle.
    ///
    /// Panics if `duration` is negative or not finite.
    pub fn wait(&mut self, duration: f64) {
        self.play([Wait::new(duration).boxed()]);
    }

    /// Advance all active animations by `dt` seconds.
    ///
    /// Returns `true` if the last active animation finished with this update.
    pub fn update(&mut self, dt: f64) -> bool {
        assert!(dt >= 0.0, "Timeline can not advance by a negative time delta: {dt}");
        self.time += dt;
        if self.active.is_empty() {
            return false;
        }
        for animation in self.active.iter_mut() {
            animation.update(dt);
        }

        let scene = &self.scene;
        self.active.retain(|animation| {
            if !animation.is_finished() {
                return true;
            }
            for removed in animation.removals(animation.elapsed()) {
                scene.remove(&removed);
            }
            false
        });

        let became_idle = self.active.is_empty();
        if became_idle {
            debug!("Timeline idle at {:.3}s", self.time);
        }
        became_idle
    }

    /// `true` if there is no active animation.
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// The total time the timeline was advanced.
    pub fn time(&self) -> f64 {
        self.time
    }
}
