use std::mem;

use parking_lot::Mutex;

use crate::SceneChange;

#[derive(Debug, Default)]
pub struct ChangeCollector(Mutex<Vec<SceneChange>>);

impl ChangeCollector {
    pub fn push(&self, change: impl Into<SceneChange>) {
        self.0.lock().push(change.into());
    }

    pub fn take_all(&self) -> Vec<SceneChange> {
        mem::take(&mut *self.0.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}
