use derive_more::{Deref, Display};

/// Identifies a mobject inside its scene.
///
/// Ids start at 0 and their maximum value is never greater than the number of ids acquired, so a
/// renderer can use them directly as storage indices.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref, Display)]
pub struct Id(u32);

#[derive(Debug, Default)]
pub struct Generator {
    next_id: u32,
    free_list: Vec<u32>,
}

impl Generator {
    pub fn acquire(&mut self) -> Id {
        if let Some(free) = self.free_list.pop() {
            return Id(free);
        }

        let this_id = self.next_id;
        self.next_id += 1;

        Id(this_id)
    }

    pub fn release(&mut self, id: Id) {
        debug_assert!(id.0 < self.next_id);
        self.free_list.push(id.0);
    }
}

impl From<Id> for usize {
    fn from(value: Id) -> Self {
        *value as _
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_ids_are_reused() {
        let mut generator = Generator::default();
        let a = generator.acquire();
        let b = generator.acquire();
        assert_eq!((*a, *b), (0, 1));

        generator.release(a);
        assert_eq!(generator.acquire(), a);
        assert_eq!(*generator.acquire(), 2);
    }
}
