use crate::error::{BitsyError, BitsyResult};
use crate::machine::Machine;
use crate::value::{SundryId, Value};

/// Resolve `key` in `env`, walking outward through enclosing scopes.
///
/// Keys compare with `eq`: interned symbols are arena-unique, so identity is
/// name equality. The first match wins, which is how inner bindings and later
/// `prepend_binding`s shadow everything behind them.
pub fn lookup(machine: &Machine, env: Value, key: Value) -> BitsyResult<Value> {
    let mut scope = Some(machine.environment_id(env));
    while let Some(id) = scope {
        if let Some(val) = lookup_local(machine, id, key) {
            return Ok(val);
        }
        scope = machine.environment(id).outer;
    }
    let name = match key {
        Value::Symbol(_) => machine.symbol_name(key).to_string(),
        other => machine.display(other).to_string(),
    };
    tracing::warn!(symbol = %name, "unbound symbol");
    Err(BitsyError::Unbound(name))
}

/// Search one scope's binding list front to back. Nodes whose car is not a
/// `(key . value)` pair are skipped; an improper tail ends the scan.
pub fn lookup_local(machine: &Machine, env: SundryId, key: Value) -> Option<Value> {
    let mut current = machine.environment(env).bindings;
    while current.is_pair() && !current.is_nil() {
        let node = *machine.cell(current.as_pair());
        if let Value::Pair(binding) = node.car {
            let binding = *machine.cell(binding);
            if machine.eq(binding.car, key) {
                return Some(binding.cdr);
            }
        }
        current = node.cdr;
    }
    None
}

/// Push `(key . value)` onto the front of `env`'s binding list and return the
/// new list.
pub fn prepend_binding(
    machine: &mut Machine,
    env: Value,
    key: Value,
    value: Value,
) -> BitsyResult<Value> {
    let id = machine.environment_id(env);
    let rest = machine.environment(id).bindings;
    let binding = machine.cons(key, value)?;
    let bindings = machine.cons(binding, rest)?;
    machine.environment_mut(id).bindings = bindings;
    Ok(bindings)
}

pub fn bindings(machine: &Machine, env: Value) -> Value {
    machine.environment(machine.environment_id(env)).bindings
}

/// The enclosing environment, or None at the outermost scope.
pub fn outer(machine: &Machine, env: Value) -> Option<Value> {
    machine
        .environment(machine.environment_id(env))
        .outer
        .map(Value::Sundry)
}
