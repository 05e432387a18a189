use crate::error::{ArenaKind, BitsyError, BitsyResult};
use crate::value::Value;

/// A single cons cell in the pair arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsCell {
    pub car: Value,
    pub cdr: Value,
}

/// Fixed-capacity, append-only slot table. Indices are handed out in order
/// and never reused; there is no reclamation.
pub struct Arena<T> {
    kind: ArenaKind,
    slots: Vec<T>,
    capacity: usize,
}

impl<T> Arena<T> {
    pub fn new(kind: ArenaKind, capacity: usize) -> Self {
        Arena {
            kind,
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Reserve the next slot. Returns Err(ArenaExhausted) once the arena is full.
    pub fn alloc(&mut self, item: T) -> BitsyResult<u16> {
        if self.slots.len() >= self.capacity {
            tracing::warn!(arena = %self.kind, capacity = self.capacity, "arena exhausted");
            return Err(BitsyError::ArenaExhausted {
                arena: self.kind,
                capacity: self.capacity,
            });
        }
        let index = self.slots.len();
        self.slots.push(item);
        tracing::trace!(arena = %self.kind, index, "alloc");
        Ok(index as u16)
    }

    #[inline]
    pub fn get(&self, index: u16) -> &T {
        &self.slots[index as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, index: u16) -> &mut T {
        &mut self.slots[index as usize]
    }

    /// Number of slots in use.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn kind(&self) -> ArenaKind {
        self.kind
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &T)> {
        self.slots.iter().enumerate().map(|(i, t)| (i as u16, t))
    }
}
