use crate::env::prepend_binding;
use crate::error::{BitsyError, BitsyResult};
use crate::machine::Machine;
use crate::sundry::{Combiner, PrimitiveFn, SingletonKind};
use crate::value::Value;

/// Native combiners installed in the ground environment, grouped by the
/// section of the Kernel report they come from. `$if`, `$vau` and `eval`
/// need an evaluator and live with it.
pub const PRIMITIVES: &[(&str, PrimitiveFn)] = &[
    // 4.1 booleans
    ("boolean?", prim_boolean_p),
    // 4.2, 4.3 equivalence
    ("eq?", prim_eq_p),
    ("equal?", prim_equal_p),
    // 4.4 symbols
    ("symbol?", prim_symbol_p),
    // 4.5 control
    ("inert?", prim_inert_p),
    // 4.6 pairs and lists
    ("pair?", prim_pair_p),
    ("null?", prim_null_p),
    ("cons", prim_cons),
    ("car", prim_car),
    ("cdr", prim_cdr),
    // 4.7 pair mutation
    ("set-car!", prim_set_car),
    ("set-cdr!", prim_set_cdr),
    // 4.8 environments
    ("environment?", prim_environment_p),
    ("ignore?", prim_ignore_p),
    ("make-environment", prim_make_environment),
    // 4.10 combiners
    ("operative?", prim_operative_p),
    ("applicative?", prim_applicative_p),
    ("wrap", prim_wrap),
    ("unwrap", prim_unwrap),
];

/// Build a fresh outermost environment with every primitive bound to an
/// applicative wrapping it.
pub fn ground_environment(machine: &mut Machine) -> BitsyResult<Value> {
    let env = machine.make_environment(None)?;
    for &(name, func) in PRIMITIVES {
        bind_primitive(machine, env, name, func)?;
    }
    tracing::debug!(count = PRIMITIVES.len(), "primitives registered");
    Ok(env)
}

/// Outermost environment holding only the named primitives. Small arenas
/// cannot fit the whole table. An unknown name is reported as unbound.
pub fn environment_with(machine: &mut Machine, names: &[&str]) -> BitsyResult<Value> {
    let env = machine.make_environment(None)?;
    for &name in names {
        let &(_, func) = PRIMITIVES
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| BitsyError::Unbound(name.to_string()))?;
        bind_primitive(machine, env, name, func)?;
    }
    tracing::debug!(count = names.len(), "primitives registered");
    Ok(env)
}

fn bind_primitive(
    machine: &mut Machine,
    env: Value,
    name: &str,
    func: PrimitiveFn,
) -> BitsyResult<()> {
    let key = machine.intern(name)?;
    let operative = machine.make_primitive(name, func)?;
    let applicative = machine.make_applicative(operative)?;
    prepend_binding(machine, env, key, applicative)?;
    Ok(())
}

/// Destructure an argument list of exactly `N` elements.
fn args<const N: usize>(machine: &Machine, name: &str, params: Value) -> BitsyResult<[Value; N]> {
    let items = machine.list_to_vec(params).ok_or_else(|| {
        BitsyError::TypeError(format!("{}: argument list is not a proper list", name))
    })?;
    let got = items.len();
    items.try_into().map_err(|_| BitsyError::WrongArgs {
        name: name.to_string(),
        expected: N,
        got,
    })
}

/// Kernel type predicates are variadic: true when every argument qualifies.
fn all(
    machine: &Machine,
    name: &str,
    params: Value,
    pred: impl Fn(&Machine, Value) -> bool,
) -> BitsyResult<Value> {
    let items = machine.list_to_vec(params).ok_or_else(|| {
        BitsyError::TypeError(format!("{}: argument list is not a proper list", name))
    })?;
    Ok(machine.make_boolean(items.into_iter().all(|v| pred(machine, v))))
}

fn prim_boolean_p(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    all(m, "boolean?", params, Machine::is_boolean)
}

fn prim_eq_p(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    let [a, b] = args(m, "eq?", params)?;
    Ok(m.make_boolean(m.eq(a, b)))
}

fn prim_equal_p(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    let [a, b] = args(m, "equal?", params)?;
    Ok(m.make_boolean(m.equal(a, b)))
}

fn prim_symbol_p(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    all(m, "symbol?", params, |_, v| v.is_symbol())
}

fn prim_inert_p(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    all(m, "inert?", params, Machine::is_inert)
}

fn prim_pair_p(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    all(m, "pair?", params, |_, v| v.is_pair() && !v.is_nil())
}

fn prim_null_p(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    all(m, "null?", params, |_, v| v.is_nil())
}

fn prim_cons(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    let [car, cdr] = args(m, "cons", params)?;
    m.cons(car, cdr)
}

fn prim_car(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    let [pair] = args(m, "car", params)?;
    expect_pair(m, "car", pair)?;
    Ok(m.car(pair))
}

fn prim_cdr(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    let [pair] = args(m, "cdr", params)?;
    expect_pair(m, "cdr", pair)?;
    Ok(m.cdr(pair))
}

fn expect_pair(m: &Machine, name: &str, val: Value) -> BitsyResult<()> {
    if val.is_pair() {
        Ok(())
    } else {
        Err(BitsyError::TypeError(format!(
            "{} expects a pair, got {}",
            name,
            m.display(val)
        )))
    }
}

fn prim_set_car(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    let [pair, val] = args(m, "set-car!", params)?;
    m.set_car(pair, val)?;
    Ok(m.make_singleton(SingletonKind::Inert))
}

fn prim_set_cdr(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    let [pair, val] = args(m, "set-cdr!", params)?;
    m.set_cdr(pair, val)?;
    Ok(m.make_singleton(SingletonKind::Inert))
}

fn prim_environment_p(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    all(m, "environment?", params, Machine::is_environment)
}

fn prim_ignore_p(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    all(m, "ignore?", params, Machine::is_ignore)
}

/// Scopes have a single parent, so at most one argument.
fn prim_make_environment(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    let parents = m.list_to_vec(params).ok_or_else(|| {
        BitsyError::TypeError("make-environment: argument list is not a proper list".into())
    })?;
    match parents.as_slice() {
        [] => m.make_environment(None),
        [parent] if m.is_environment(*parent) => m.make_environment(Some(*parent)),
        [other] => Err(BitsyError::TypeError(format!(
            "make-environment expects an environment, got {}",
            m.display(*other)
        ))),
        _ => Err(BitsyError::WrongArgs {
            name: "make-environment".into(),
            expected: 1,
            got: parents.len(),
        }),
    }
}

fn prim_operative_p(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    all(m, "operative?", params, Machine::is_operative)
}

fn prim_applicative_p(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    all(m, "applicative?", params, Machine::is_applicative)
}

fn prim_wrap(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    let [combiner] = args(m, "wrap", params)?;
    m.make_applicative(combiner)
}

fn prim_unwrap(m: &mut Machine, params: Value) -> BitsyResult<Value> {
    let [applicative] = args(m, "unwrap", params)?;
    match m.combiner(applicative) {
        Some(Combiner::Applicative(inner)) => Ok(inner),
        _ => Err(BitsyError::TypeError(format!(
            "unwrap expects an applicative, got {}",
            m.display(applicative)
        ))),
    }
}
