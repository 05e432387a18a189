use std::fmt;

use crate::word::Kind;

/// Index into the pair arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(pub u16);

/// Index into the symbol arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u16);

/// Index into the sundry arena (booleans, singletons, environments, combiners).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SundryId(pub u16);

/// The fundamental value. Copy semantics: the referenced data lives in the
/// machine's arenas. Equality of two `Value`s is `eq`, i.e. same slot or same
/// integer literal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    Pair(PairId),
    Int(i16),
    Symbol(SymbolId),
    Sundry(SundryId),
}

impl Value {
    /// Pair slot 0, allocated first by every machine.
    pub const NIL: Value = Value::Pair(PairId(0));

    pub fn kind(self) -> Kind {
        match self {
            Value::Pair(_) => Kind::Pair,
            Value::Int(_) => Kind::Int,
            Value::Symbol(_) => Kind::Symbol,
            Value::Sundry(_) => Kind::Sundry,
        }
    }

    /// The signed payload a tagged word carries for this value.
    pub fn payload(self) -> i16 {
        match self {
            Value::Pair(id) => id.0 as i16,
            Value::Int(n) => n,
            Value::Symbol(id) => id.0 as i16,
            Value::Sundry(id) => id.0 as i16,
        }
    }

    /// Rebuild a value from its kind and payload. Arena indices are never
    /// negative; a negative index payload comes from a corrupt word.
    pub fn from_parts(kind: Kind, payload: i16) -> Value {
        match kind {
            Kind::Int => Value::Int(payload),
            Kind::Pair => Value::Pair(PairId(index(payload))),
            Kind::Symbol => Value::Symbol(SymbolId(index(payload))),
            Kind::Sundry => Value::Sundry(SundryId(index(payload))),
        }
    }

    pub fn is_nil(self) -> bool {
        self == Value::NIL
    }

    pub fn is_pair(self) -> bool {
        matches!(self, Value::Pair(_))
    }

    pub fn is_int(self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_symbol(self) -> bool {
        matches!(self, Value::Symbol(_))
    }

    pub fn is_sundry(self) -> bool {
        matches!(self, Value::Sundry(_))
    }

    pub fn as_pair(self) -> PairId {
        match self {
            Value::Pair(id) => id,
            other => panic!("as_pair requires a pair value, got {:?}", other),
        }
    }

    pub fn as_int(self) -> i16 {
        match self {
            Value::Int(n) => n,
            other => panic!("as_int requires an int value, got {:?}", other),
        }
    }

    pub fn as_symbol(self) -> SymbolId {
        match self {
            Value::Symbol(id) => id,
            other => panic!("as_symbol requires a symbol value, got {:?}", other),
        }
    }

    pub fn as_sundry(self) -> SundryId {
        match self {
            Value::Sundry(id) => id,
            other => panic!("as_sundry requires a sundry value, got {:?}", other),
        }
    }
}

fn index(payload: i16) -> u16 {
    assert!(payload >= 0, "negative arena index {}", payload);
    payload as u16
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Pair(id) if id.0 == 0 => write!(f, "Nil"),
            Value::Pair(id) => write!(f, "Pair({})", id.0),
            Value::Int(n) => write!(f, "Int({})", n),
            Value::Symbol(id) => write!(f, "Sym({})", id.0),
            Value::Sundry(id) => write!(f, "Sundry({})", id.0),
        }
    }
}

impl fmt::Debug for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PairId({})", self.0)
    }
}

impl fmt::Debug for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolId({})", self.0)
    }
}

impl fmt::Debug for SundryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SundryId({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_is_a_pair() {
        assert!(Value::NIL.is_pair());
        assert!(Value::NIL.is_nil());
        assert_eq!(Value::NIL.as_pair(), PairId(0));
        assert!(!Value::Pair(PairId(1)).is_nil());
    }

    #[test]
    fn parts_round_trip() {
        for v in [
            Value::Int(-7),
            Value::Pair(PairId(12)),
            Value::Symbol(SymbolId(3)),
            Value::Sundry(SundryId(0)),
        ] {
            assert_eq!(Value::from_parts(v.kind(), v.payload()), v);
        }
    }

    #[test]
    #[should_panic(expected = "as_pair requires a pair value")]
    fn wrong_accessor_panics() {
        Value::Int(3).as_pair();
    }

    #[test]
    #[should_panic(expected = "as_symbol requires a symbol value")]
    fn symbol_accessor_on_sundry_panics() {
        Value::Sundry(SundryId(1)).as_symbol();
    }
}
