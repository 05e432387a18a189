use std::collections::HashMap;

use crate::error::{ArenaKind, BitsyResult};
use crate::heap::Arena;
use crate::value::SymbolId;

/// Symbol arena plus the name registry used for interning.
/// `(eq? 'foo 'foo)` holds because both resolve to the same SymbolId.
pub struct SymbolTable {
    names: Arena<String>,
    registry: HashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new(capacity: usize) -> Self {
        SymbolTable {
            names: Arena::new(ArenaKind::Symbol, capacity),
            registry: HashMap::new(),
        }
    }

    /// Intern a symbol name. Returns the existing ID if already interned,
    /// or allocates a new slot.
    pub fn intern(&mut self, name: &str) -> BitsyResult<SymbolId> {
        if let Some(&id) = self.registry.get(name) {
            return Ok(id);
        }
        let id = SymbolId(self.names.alloc(name.to_string())?);
        self.registry.insert(name.to_string(), id);
        Ok(id)
    }

    /// Allocate a fresh slot without consulting or updating the registry.
    /// The result is never `eq` to any other symbol, whatever its name.
    pub fn make_uninterned(&mut self, name: &str) -> BitsyResult<SymbolId> {
        Ok(SymbolId(self.names.alloc(name.to_string())?))
    }

    pub fn name(&self, id: SymbolId) -> &str {
        self.names.get(id.0)
    }

    /// Look up an interned symbol by name, without interning.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.registry.get(name).copied()
    }

    pub fn count(&self) -> usize {
        self.names.len()
    }

    pub fn capacity(&self) -> usize {
        self.names.capacity()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> {
        self.names.iter().map(|(i, n)| (SymbolId(i), n.as_str()))
    }
}
