use crate::store::{OrderStore, SideKey};

/// Candidates held out of the security+side+quantity view for the duration
/// of one matching pass.
///
/// Every held entry is re-attached when the guard is dropped, so the book is
/// restored on every exit path of the pass.
pub struct Reservation<'a> {
    store: &'a mut OrderStore,
    held: Vec<(SideKey, usize)>,
}

impl<'a> Reservation<'a> {
    pub fn new(store: &'a mut OrderStore) -> Self {
        Self {
            store,
            held: Vec::new(),
        }
    }

    pub fn store(&self) -> &OrderStore {
        self.store
    }

    pub fn hold(&mut self, key: SideKey) -> bool {
        match self.store.detach_side_entry(&key) {
            Some(idx) => {
                self.held.push((key, idx));
                true
            }
            None => false,
        }
    }

    pub fn held(&self) -> usize {
        self.held.len()
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        for (key, idx) in self.held.drain(..) {
            self.store.attach_side_entry(key, idx);
        }
    }
}
