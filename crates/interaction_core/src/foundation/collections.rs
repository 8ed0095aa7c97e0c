//! Specialized collection types

use std::fmt;

pub use slotmap::{new_key_type, SlotMap};

/// Stable integer identifier handed out by an [`IdPool`]
///
/// Interactors and interactables draw from the same pool, so an id never
/// names two live objects at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniqueId(u32);

impl UniqueId {
    /// Get the raw id value
    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Free-list id allocator
///
/// Released ids are reused lowest-first, which keeps allocation
/// deterministic across runs.
#[derive(Debug, Default)]
pub struct IdPool {
    next: u32,
    free: Vec<u32>,
}

impl IdPool {
    /// Create a new, empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id
    pub fn allocate(&mut self) -> UniqueId {
        if let Some(id) = self.free.pop() {
            return UniqueId(id);
        }
        let id = self.next;
        self.next += 1;
        UniqueId(id)
    }

    /// Return an id to the pool
    ///
    /// Releasing an id that is not currently allocated is a no-op.
    pub fn release(&mut self, id: UniqueId) {
        if id.0 >= self.next || self.free.contains(&id.0) {
            return;
        }
        // Keep the free list sorted descending so `pop` yields the lowest id
        let at = self.free.partition_point(|&free| free > id.0);
        self.free.insert(at, id.0);
    }

    /// Number of ids currently handed out
    pub fn live_count(&self) -> usize {
        self.next as usize - self.free.len()
    }
}
