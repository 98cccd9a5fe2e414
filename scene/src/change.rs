use crate::{Id, MobjectState};

/// A change a renderer needs to know about.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneChange {
    /// A mobject handle got created. It is not visible before it is added to the scene.
    Created(Id, MobjectState),
    /// The state of a mobject changed.
    Updated(Id, MobjectState),
    /// The mobject became a member of the scene.
    Added(Id),
    /// The mobject is not a member of the scene anymore.
    Removed(Id),
    /// The last handle got dropped, the id may be reused.
    Dropped(Id),
}

impl SceneChange {
    pub fn id(&self) -> Id {
        match *self {
            SceneChange::Created(id, _)
            | SceneChange::Updated(id, _)
            | SceneChange::Added(id)
            | SceneChange::Removed(id)
            | SceneChange::Dropped(id) => id,
        }
    }
}
