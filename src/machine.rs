use std::collections::HashSet;
use std::fmt;
use std::fmt::Write as _;

use crate::config::Config;
use crate::error::{ArenaKind, BitsyError, BitsyResult};
use crate::heap::{Arena, ConsCell};
use crate::sundry::{Combiner, Environment, Operative, PrimitiveFn, SingletonKind, Sundry};
use crate::symbol::SymbolTable;
use crate::value::{PairId, SundryId, SymbolId, Value};
use crate::word::{self, Word};

/// Sundry slots filled at startup, in allocation order.
pub const FALSE: SundryId = SundryId(0);
pub const TRUE: SundryId = SundryId(1);
pub const INERT: SundryId = SundryId(2);
pub const IGNORE: SundryId = SundryId(3);

/// Arena occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub pairs: usize,
    pub symbols: usize,
    pub sundries: usize,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pairs, {} symbols, {} sundry",
            self.pairs, self.symbols, self.sundries
        )
    }
}

/// Owns the three arenas and everything built on them.
pub struct Machine {
    config: Config,
    pairs: Arena<ConsCell>,
    symbols: SymbolTable,
    sundries: Arena<Sundry>,
}

impl Machine {
    /// Build a machine. Nil is pair slot 0 and must exist before anything
    /// asks whether a value is nil, so it is allocated first.
    pub fn new(config: Config) -> BitsyResult<Self> {
        config.validate()?;
        let mut machine = Machine {
            pairs: Arena::new(ArenaKind::Pair, config.pair_capacity),
            symbols: SymbolTable::new(config.symbol_capacity),
            sundries: Arena::new(ArenaKind::Sundry, config.sundry_capacity),
            config,
        };

        let nil = machine.pairs.alloc(ConsCell {
            car: Value::NIL,
            cdr: Value::NIL,
        })?;
        assert_eq!(Value::Pair(PairId(nil)), Value::NIL, "nil must be pair 0");

        for sundry in [
            Sundry::Boolean(false),
            Sundry::Boolean(true),
            Sundry::Singleton(SingletonKind::Inert),
            Sundry::Singleton(SingletonKind::Ignore),
        ] {
            machine.sundries.alloc(sundry)?;
        }

        tracing::debug!(
            width = %machine.config.word_width,
            pairs = machine.config.pair_capacity,
            symbols = machine.config.symbol_capacity,
            sundries = machine.config.sundry_capacity,
            "machine initialised"
        );
        Ok(machine)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // === Construction ===

    pub fn cons(&mut self, car: Value, cdr: Value) -> BitsyResult<Value> {
        let id = self.pairs.alloc(ConsCell { car, cdr })?;
        Ok(Value::Pair(PairId(id)))
    }

    /// Make an integer value, rejecting literals the payload cannot hold.
    pub fn make_int(&self, n: i64) -> BitsyResult<Value> {
        let width = self.config.word_width;
        if !width.contains(n) {
            return Err(BitsyError::IntOutOfRange { value: n, width });
        }
        Ok(Value::Int(n as i16))
    }

    pub fn intern(&mut self, name: &str) -> BitsyResult<Value> {
        Ok(Value::Symbol(self.symbols.intern(name)?))
    }

    pub fn make_uninterned(&mut self, name: &str) -> BitsyResult<Value> {
        Ok(Value::Symbol(self.symbols.make_uninterned(name)?))
    }

    pub fn make_boolean(&self, b: bool) -> Value {
        Value::Sundry(if b { TRUE } else { FALSE })
    }

    pub fn make_singleton(&self, kind: SingletonKind) -> Value {
        match kind {
            SingletonKind::Inert => Value::Sundry(INERT),
            SingletonKind::Ignore => Value::Sundry(IGNORE),
        }
    }

    /// New empty scope. `outer` must be an environment value when given.
    pub fn make_environment(&mut self, outer: Option<Value>) -> BitsyResult<Value> {
        let outer = outer.map(|env| self.environment_id(env));
        let id = self.sundries.alloc(Sundry::Environment(Environment {
            bindings: Value::NIL,
            outer,
        }))?;
        tracing::debug!(env = id, outer = ?outer, "environment created");
        Ok(Value::Sundry(SundryId(id)))
    }

    pub fn make_primitive(&mut self, name: &str, func: PrimitiveFn) -> BitsyResult<Value> {
        let name = self.symbols.intern(name)?;
        let id = self
            .sundries
            .alloc(Sundry::Combiner(Combiner::Operative(Operative::Primitive {
                name,
                func,
            })))?;
        Ok(Value::Sundry(SundryId(id)))
    }

    pub fn make_applicative(&mut self, combiner: Value) -> BitsyResult<Value> {
        if !self.is_combiner(combiner) {
            return Err(BitsyError::TypeError(format!(
                "wrap expects a combiner, got {}",
                self.display(combiner)
            )));
        }
        let id = self
            .sundries
            .alloc(Sundry::Combiner(Combiner::Applicative(combiner)))?;
        Ok(Value::Sundry(SundryId(id)))
    }

    /// Build a proper list from a slice of values.
    pub fn list(&mut self, values: &[Value]) -> BitsyResult<Value> {
        let mut result = Value::NIL;
        for &val in values.iter().rev() {
            result = self.cons(val, result)?;
        }
        Ok(result)
    }

    pub fn int_list(&mut self, ints: &[i64]) -> BitsyResult<Value> {
        let values = ints
            .iter()
            .map(|&n| self.make_int(n))
            .collect::<BitsyResult<Vec<_>>>()?;
        self.list(&values)
    }

    // === Pair access ===

    #[inline]
    pub fn cell(&self, id: PairId) -> &ConsCell {
        self.pairs.get(id.0)
    }

    /// Car of a pair. Nil's car is nil.
    pub fn car(&self, val: Value) -> Value {
        self.cell(val.as_pair()).car
    }

    /// Cdr of a pair. Nil's cdr is nil.
    pub fn cdr(&self, val: Value) -> Value {
        self.cell(val.as_pair()).cdr
    }

    pub fn set_car(&mut self, target: Value, val: Value) -> BitsyResult<()> {
        self.mutable_cell(target, "set-car!")?.car = val;
        Ok(())
    }

    pub fn set_cdr(&mut self, target: Value, val: Value) -> BitsyResult<()> {
        self.mutable_cell(target, "set-cdr!")?.cdr = val;
        Ok(())
    }

    fn mutable_cell(&mut self, target: Value, op: &str) -> BitsyResult<&mut ConsCell> {
        if !target.is_pair() || target.is_nil() {
            return Err(BitsyError::TypeError(format!(
                "{} expects a non-nil pair",
                op
            )));
        }
        Ok(self.pairs.get_mut(target.as_pair().0))
    }

    /// A pair is a list node when its cdr is itself a pair. One hop only:
    /// the tail further down may still be improper. Nil is not a node.
    pub fn is_list(&self, val: Value) -> bool {
        val.is_pair() && !val.is_nil() && self.cdr(val).is_pair()
    }

    /// Collect a proper list into a Vec. Returns None if not a proper list.
    pub fn list_to_vec(&self, val: Value) -> Option<Vec<Value>> {
        let mut result = Vec::new();
        let mut current = val;
        loop {
            if current.is_nil() {
                return Some(result);
            }
            match current {
                Value::Pair(id) => {
                    let cell = self.cell(id);
                    result.push(cell.car);
                    current = cell.cdr;
                }
                _ => return None,
            }
        }
    }

    // === Symbols and sundries ===

    pub fn symbol_name(&self, val: Value) -> &str {
        self.symbols.name(val.as_symbol())
    }

    pub fn symbol_by_id(&self, id: SymbolId) -> &str {
        self.symbols.name(id)
    }

    pub fn sundry(&self, id: SundryId) -> &Sundry {
        self.sundries.get(id.0)
    }

    fn sundry_of(&self, val: Value) -> Option<&Sundry> {
        match val {
            Value::Sundry(id) => Some(self.sundry(id)),
            _ => None,
        }
    }

    pub fn is_boolean(&self, val: Value) -> bool {
        matches!(self.sundry_of(val), Some(Sundry::Boolean(_)))
    }

    pub fn as_boolean(&self, val: Value) -> bool {
        match self.sundry_of(val) {
            Some(Sundry::Boolean(b)) => *b,
            _ => panic!("as_boolean requires a boolean value, got {:?}", val),
        }
    }

    pub fn is_inert(&self, val: Value) -> bool {
        matches!(
            self.sundry_of(val),
            Some(Sundry::Singleton(SingletonKind::Inert))
        )
    }

    pub fn is_ignore(&self, val: Value) -> bool {
        matches!(
            self.sundry_of(val),
            Some(Sundry::Singleton(SingletonKind::Ignore))
        )
    }

    pub fn is_environment(&self, val: Value) -> bool {
        matches!(self.sundry_of(val), Some(Sundry::Environment(_)))
    }

    pub fn is_combiner(&self, val: Value) -> bool {
        matches!(self.sundry_of(val), Some(Sundry::Combiner(_)))
    }

    pub fn is_operative(&self, val: Value) -> bool {
        matches!(
            self.sundry_of(val),
            Some(Sundry::Combiner(Combiner::Operative(_)))
        )
    }

    pub fn is_applicative(&self, val: Value) -> bool {
        matches!(
            self.sundry_of(val),
            Some(Sundry::Combiner(Combiner::Applicative(_)))
        )
    }

    pub fn combiner(&self, val: Value) -> Option<Combiner> {
        match self.sundry_of(val) {
            Some(Sundry::Combiner(c)) => Some(*c),
            _ => None,
        }
    }

    /// Sundry slot of an environment value.
    pub fn environment_id(&self, val: Value) -> SundryId {
        match self.sundry_of(val) {
            Some(Sundry::Environment(_)) => val.as_sundry(),
            _ => panic!("as_environment requires an environment value, got {:?}", val),
        }
    }

    pub fn environment(&self, id: SundryId) -> &Environment {
        match self.sundries.get(id.0) {
            Sundry::Environment(env) => env,
            other => panic!("sundry {} is {}, not an environment", id.0, other.kind_name()),
        }
    }

    pub(crate) fn environment_mut(&mut self, id: SundryId) -> &mut Environment {
        match self.sundries.get_mut(id.0) {
            Sundry::Environment(env) => env,
            other => panic!("sundry {} is {}, not an environment", id.0, other.kind_name()),
        }
    }

    // === Application ===

    /// Apply a combiner to an already-evaluated argument list. Applicatives
    /// are unwrapped down to their underlying operative.
    pub fn call(&mut self, combiner: Value, args: Value) -> BitsyResult<Value> {
        let mut current = combiner;
        loop {
            match self.combiner(current) {
                Some(Combiner::Applicative(inner)) => current = inner,
                Some(Combiner::Operative(Operative::Primitive { func, .. })) => {
                    return func(self, args);
                }
                None => {
                    return Err(BitsyError::NotApplicable(
                        self.display(combiner).to_string(),
                    ))
                }
            }
        }
    }

    // === Encoding ===

    /// Integers built directly as `Value::Int` must still fit the payload;
    /// a wider one would alias another integer's word.
    pub fn pack(&self, val: Value) -> Word {
        let width = self.config.word_width;
        if let Value::Int(n) = val {
            assert!(
                width.contains(n as i64),
                "integer {} does not fit {} words",
                n,
                width
            );
        }
        word::tag(val.payload(), val.kind(), width)
    }

    pub fn unpack(&self, w: Word) -> Value {
        Value::from_parts(word::kind_of(w), word::untag(w, self.config.word_width))
    }

    // === Equality ===

    /// Identity: the tagged words are bit-identical.
    pub fn eq(&self, a: Value, b: Value) -> bool {
        self.pack(a) == self.pack(b)
    }

    /// Structural equality. Pairs compare car and cdr, integers by value,
    /// symbols and sundries by identity. Diverges on cyclic pairs unless the
    /// machine was configured with `cycle_guard`.
    pub fn equal(&self, a: Value, b: Value) -> bool {
        if self.config.cycle_guard {
            self.equal_guarded(a, b, &mut HashSet::new())
        } else {
            self.equal_unguarded(a, b)
        }
    }

    fn equal_unguarded(&self, a: Value, b: Value) -> bool {
        match (a, b) {
            // Nil's car and cdr are nil, so the same slot must stop here.
            (Value::Pair(x), Value::Pair(y)) if x == y => true,
            (Value::Pair(x), Value::Pair(y)) => {
                let (x, y) = (*self.cell(x), *self.cell(y));
                self.equal_unguarded(x.car, y.car) && self.equal_unguarded(x.cdr, y.cdr)
            }
            (Value::Int(_), Value::Int(_)) => self.eq(a, b),
            _ if a.kind() != b.kind() => false,
            _ => self.eq(a, b),
        }
    }

    // A pair comparison already in progress is assumed to hold. Any false
    // result short-circuits to the top, so the assumption only ever closes
    // a cycle.
    fn equal_guarded(&self, a: Value, b: Value, seen: &mut HashSet<(PairId, PairId)>) -> bool {
        match (a, b) {
            (Value::Pair(x), Value::Pair(y)) if x == y => true,
            (Value::Pair(x), Value::Pair(y)) => {
                if !seen.insert((x, y)) {
                    return true;
                }
                let (cx, cy) = (*self.cell(x), *self.cell(y));
                self.equal_guarded(cx.car, cy.car, seen) && self.equal_guarded(cx.cdr, cy.cdr, seen)
            }
            _ => self.equal_unguarded(a, b),
        }
    }

    // === Introspection ===

    pub fn stats(&self) -> Stats {
        Stats {
            pairs: self.pairs.len(),
            symbols: self.symbols.count(),
            sundries: self.sundries.len(),
        }
    }

    /// Human-readable listing of every arena slot.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Pairs:");
        for (i, cell) in self.pairs.iter() {
            let _ = writeln!(out, "[{}]: ({:?} . {:?})", i, cell.car, cell.cdr);
        }
        let _ = writeln!(out, "Symbols:");
        for (id, name) in self.symbols.iter() {
            let _ = writeln!(out, "[{}]: {}", id.0, name);
        }
        let _ = writeln!(out, "Sundries:");
        for (i, sundry) in self.sundries.iter() {
            let _ = writeln!(out, "[{}]: {:?}", i, sundry);
        }
        out
    }
}
