use std::fmt;

use crate::error::BitsyResult;
use crate::machine::Machine;
use crate::value::{SundryId, SymbolId, Value};

/// Native implementation of a primitive operative. Receives the argument list.
pub type PrimitiveFn = fn(&mut Machine, Value) -> BitsyResult<Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SingletonKind {
    Ignore,
    Inert,
}

/// One scope: an association list of `(symbol . value)` pairs and the
/// enclosing scope, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Environment {
    pub bindings: Value,
    pub outer: Option<SundryId>,
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            bindings: Value::NIL,
            outer: None,
        }
    }
}

#[derive(Clone, Copy)]
pub enum Operative {
    Primitive { name: SymbolId, func: PrimitiveFn },
}

/// Something an environment can bind a symbol to and an evaluator can call.
#[derive(Clone, Copy)]
pub enum Combiner {
    Operative(Operative),
    /// Wraps another combiner; its arguments are evaluated before the call.
    Applicative(Value),
}

/// Everything that is not a pair, an integer, or a symbol.
#[derive(Clone, Copy)]
pub enum Sundry {
    Boolean(bool),
    Singleton(SingletonKind),
    Environment(Environment),
    Combiner(Combiner),
}

impl Sundry {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Sundry::Boolean(_) => "boolean",
            Sundry::Singleton(SingletonKind::Ignore) => "ignore",
            Sundry::Singleton(SingletonKind::Inert) => "inert",
            Sundry::Environment(_) => "environment",
            Sundry::Combiner(Combiner::Operative(_)) => "operative",
            Sundry::Combiner(Combiner::Applicative(_)) => "applicative",
        }
    }
}

impl fmt::Debug for Operative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operative::Primitive { name, .. } => write!(f, "Primitive({:?})", name),
        }
    }
}

impl fmt::Debug for Combiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combiner::Operative(op) => write!(f, "Operative({:?})", op),
            Combiner::Applicative(inner) => write!(f, "Applicative({:?})", inner),
        }
    }
}

impl fmt::Debug for Sundry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sundry::Boolean(b) => write!(f, "Boolean({})", b),
            Sundry::Singleton(k) => write!(f, "Singleton({:?})", k),
            Sundry::Environment(env) => write!(f, "{:?}", env),
            Sundry::Combiner(c) => write!(f, "{:?}", c),
        }
    }
}
