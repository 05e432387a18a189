use std::collections::HashSet;
use std::fmt;
use std::fmt::Write as _;

use crate::machine::Machine;
use crate::sundry::{Combiner, Operative, SingletonKind, Sundry};
use crate::value::{PairId, SundryId, Value};

/// Print a value to a string.
///
/// Lists print as `(a b c)`, an improper tail as `(a b . c)`, any other pair
/// as `(a . b)`, nil as `()`.
pub fn print_val(machine: &Machine, val: Value) -> String {
    let mut out = String::new();
    let mut path = machine.config().cycle_guard.then(HashSet::new);
    print_inner(machine, val, &mut out, &mut path);
    out
}

/// `Display` adapter returned by [`Machine::display`].
pub struct Printed<'a> {
    machine: &'a Machine,
    value: Value,
}

impl fmt::Display for Printed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_val(self.machine, self.value))
    }
}

impl Machine {
    pub fn display(&self, value: Value) -> Printed<'_> {
        Printed {
            machine: self,
            value,
        }
    }
}

// `path` holds the pairs currently being printed when the cycle guard is on.
fn print_inner(
    machine: &Machine,
    val: Value,
    out: &mut String,
    path: &mut Option<HashSet<PairId>>,
) {
    match val {
        Value::Int(n) => {
            let _ = write!(out, "{}", n);
        }
        Value::Symbol(id) => out.push_str(machine.symbol_by_id(id)),
        Value::Sundry(id) => print_sundry(machine, id, out),
        _ if val.is_nil() => out.push_str("()"),
        Value::Pair(id) => {
            if !enter(path, id) {
                out.push_str("...");
                return;
            }
            let mut entered = vec![id];

            out.push('(');
            let cell = *machine.cell(id);
            print_inner(machine, cell.car, out, path);

            let mut current = cell.cdr;
            loop {
                match current {
                    _ if current.is_nil() => break,
                    Value::Pair(next) => {
                        if !enter(path, next) {
                            out.push_str(" . ...");
                            break;
                        }
                        entered.push(next);
                        out.push(' ');
                        let next_cell = *machine.cell(next);
                        print_inner(machine, next_cell.car, out, path);
                        current = next_cell.cdr;
                    }
                    _ => {
                        out.push_str(" . ");
                        print_inner(machine, current, out, path);
                        break;
                    }
                }
            }
            out.push(')');

            if let Some(path) = path {
                for id in entered {
                    path.remove(&id);
                }
            }
        }
    }
}

/// Record `id` on the current path. False if it is already there.
fn enter(path: &mut Option<HashSet<PairId>>, id: PairId) -> bool {
    match path {
        Some(path) => path.insert(id),
        None => true,
    }
}

fn print_sundry(machine: &Machine, id: SundryId, out: &mut String) {
    match machine.sundry(id) {
        Sundry::Boolean(true) => out.push_str("#t"),
        Sundry::Boolean(false) => out.push_str("#f"),
        Sundry::Singleton(SingletonKind::Inert) => out.push_str("#inert"),
        Sundry::Singleton(SingletonKind::Ignore) => out.push_str("#ignore"),
        Sundry::Environment(_) => {
            let _ = write!(out, "#[environment {}]", id.0);
        }
        Sundry::Combiner(Combiner::Operative(Operative::Primitive { name, .. })) => {
            let _ = write!(out, "#[operative {}]", machine.symbol_by_id(*name));
        }
        Sundry::Combiner(Combiner::Applicative(inner)) => {
            out.push_str("#[applicative");
            if let Some(name) = primitive_name(machine, *inner) {
                out.push(' ');
                out.push_str(name);
            }
            out.push(']');
        }
    }
}

/// Name of the primitive at the bottom of a chain of applicatives.
fn primitive_name(machine: &Machine, mut val: Value) -> Option<&str> {
    loop {
        match machine.combiner(val)? {
            Combiner::Applicative(inner) => val = inner,
            Combiner::Operative(Operative::Primitive { name, .. }) => {
                return Some(machine.symbol_by_id(name));
            }
        }
    }
}
