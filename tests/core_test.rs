use bitsy::env::{lookup, outer, prepend_binding};
use bitsy::printer::print_val;
use bitsy::{ArenaKind, BitsyError, Config, Machine, Value};

fn machine() -> Machine {
    Machine::new(Config::default()).unwrap()
}

fn int(n: i16) -> Value {
    Value::Int(n)
}

// --- Identity and structural equality ---

#[test]
fn eq_is_reflexive() {
    let mut m = machine();
    let sym = m.intern("a").unwrap();
    let env = m.make_environment(None).unwrap();
    let pair = m.cons(int(1), int(2)).unwrap();
    for v in [int(0), int(-5), sym, env, pair, Value::NIL, m.make_boolean(true)] {
        assert!(m.eq(v, v));
    }
}

#[test]
fn distinct_cons_cells_are_equal_but_not_eq() {
    let mut m = machine();
    let a = m.cons(int(1), int(2)).unwrap();
    let b = m.cons(int(1), int(2)).unwrap();
    assert!(!m.eq(a, b));
    assert!(m.equal(a, b));
    assert!(m.equal(b, a));
}

#[test]
fn equal_requires_matching_kind() {
    let mut m = machine();
    let sym = m.intern("x").unwrap();
    let pair = m.cons(int(1), Value::NIL).unwrap();
    assert!(!m.equal(int(0), sym));
    assert!(!m.equal(pair, int(1)));
    assert!(!m.equal(m.make_boolean(false), int(0)));
}

#[test]
fn symbols_and_sundries_compare_by_identity() {
    let mut m = machine();
    let a = m.intern("x").unwrap();
    let b = m.make_uninterned("x").unwrap();
    assert!(m.equal(a, a));
    assert!(!m.equal(a, b));

    let e1 = m.make_environment(None).unwrap();
    let e2 = m.make_environment(None).unwrap();
    assert!(!m.equal(e1, e2));
    assert!(m.equal(e1, e1));
}

#[test]
fn nested_structural_equality() {
    let mut m = machine();
    let x = m.intern("x").unwrap();
    let inner_a = m.list(&[x, int(2)]).unwrap();
    let a = m.list(&[int(1), inner_a]).unwrap();
    let inner_b = m.list(&[x, int(2)]).unwrap();
    let b = m.list(&[int(1), inner_b]).unwrap();
    let inner_c = m.list(&[x, int(3)]).unwrap();
    let c = m.list(&[int(1), inner_c]).unwrap();
    assert!(m.equal(a, b));
    assert!(!m.equal(a, c));
}

#[test]
fn cycle_guard_terminates_on_cyclic_lists() {
    let mut m = Machine::new(Config::default().with_cycle_guard(true)).unwrap();
    let a = m.int_list(&[1, 2]).unwrap();
    let b = m.int_list(&[1, 2]).unwrap();
    let a_last = m.cdr(a);
    let b_last = m.cdr(b);
    m.set_cdr(a_last, a).unwrap();
    m.set_cdr(b_last, b).unwrap();
    assert!(m.equal(a, b));

    let c = m.int_list(&[1, 3]).unwrap();
    let c_last = m.cdr(c);
    m.set_cdr(c_last, c).unwrap();
    assert!(!m.equal(a, c));
}

#[test]
fn cycle_guard_does_not_change_acyclic_results() {
    let build = |m: &mut Machine| {
        let shared = m.int_list(&[4, 5]).unwrap();
        let a = m.list(&[shared, shared, int(1)]).unwrap();
        let b = m.list(&[shared, shared, int(1)]).unwrap();
        let tail = m.cons(int(6), int(7)).unwrap();
        let c = m.list(&[shared, tail, int(1)]).unwrap();
        (a, b, c)
    };
    for guard in [false, true] {
        let mut m = Machine::new(Config::default().with_cycle_guard(guard)).unwrap();
        let (a, b, c) = build(&mut m);
        assert!(m.equal(a, b), "guard = {}", guard);
        assert!(!m.equal(a, c), "guard = {}", guard);
        assert_eq!(print_val(&m, a), "((4 5) (4 5) 1)");
        assert_eq!(print_val(&m, c), "((4 5) (6 . 7) 1)");
    }
}

// --- Nil ---

#[test]
fn nil_is_the_first_pair() {
    let mut m = machine();
    assert_eq!(m.stats().pairs, 1);
    assert!(Value::NIL.is_nil());
    assert_eq!(m.car(Value::NIL), Value::NIL);
    assert_eq!(m.cdr(Value::NIL), Value::NIL);
    let p = m.cons(Value::NIL, Value::NIL).unwrap();
    assert!(!p.is_nil());
    assert!(!m.eq(p, Value::NIL));
    assert!(m.equal(p, p));
}

// --- Printing ---

#[test]
fn prints_proper_list() {
    let mut m = machine();
    let three = m.cons(int(3), Value::NIL).unwrap();
    let two = m.cons(int(2), three).unwrap();
    let one = m.cons(int(1), two).unwrap();
    assert_eq!(print_val(&m, one), "(1 2 3)");
}

#[test]
fn prints_dotted_pair() {
    let mut m = machine();
    let p = m.cons(int(1), int(2)).unwrap();
    assert_eq!(print_val(&m, p), "(1 . 2)");
}

#[test]
fn prints_improper_list() {
    let mut m = machine();
    let tail = m.cons(int(2), int(3)).unwrap();
    let l = m.cons(int(1), tail).unwrap();
    assert!(m.is_list(l));
    assert_eq!(print_val(&m, l), "(1 2 . 3)");
}

#[test]
fn prints_symbols_verbatim() {
    let mut m = machine();
    let items = ["$vau", "make-environment", "eq?"]
        .iter()
        .map(|n| m.intern(n).unwrap())
        .collect::<Vec<_>>();
    let l = m.list(&items).unwrap();
    let env = m.make_environment(None).unwrap();
    let tail = m.cons(int(-1), env).unwrap();
    assert_eq!(print_val(&m, l), "($vau make-environment eq?)");
    assert_eq!(print_val(&m, tail), "(-1 . #[environment 4])");
}

// --- Environments ---

#[test]
fn inner_binding_shadows_outer() {
    let mut m = machine();
    let x = m.intern("x").unwrap();
    let outer_env = m.make_environment(None).unwrap();
    prepend_binding(&mut m, outer_env, x, int(10)).unwrap();
    let inner_env = m.make_environment(Some(outer_env)).unwrap();
    prepend_binding(&mut m, inner_env, x, int(20)).unwrap();

    assert_eq!(lookup(&m, inner_env, x), Ok(int(20)));
    assert_eq!(lookup(&m, outer_env, x), Ok(int(10)));
    assert_eq!(outer(&m, inner_env), Some(outer_env));
}

#[test]
fn lookup_falls_through_to_outer_scope() {
    let mut m = machine();
    let x = m.intern("x").unwrap();
    let y = m.intern("y").unwrap();
    let outer_env = m.make_environment(None).unwrap();
    prepend_binding(&mut m, outer_env, x, int(10)).unwrap();
    let inner_env = m.make_environment(Some(outer_env)).unwrap();
    prepend_binding(&mut m, inner_env, y, int(1)).unwrap();

    assert_eq!(lookup(&m, inner_env, x), Ok(int(10)));
    assert_eq!(lookup(&m, inner_env, y), Ok(int(1)));
}

#[test]
fn unbound_symbol_is_a_typed_error() {
    let mut m = machine();
    let x = m.intern("x").unwrap();
    let y = m.intern("y").unwrap();
    let env = m.make_environment(None).unwrap();
    prepend_binding(&mut m, env, x, int(1)).unwrap();
    assert_eq!(lookup(&m, env, y), Err(BitsyError::Unbound("y".into())));
    assert_eq!(
        lookup(&m, env, y).unwrap_err().to_string(),
        "Error: unbound symbol 'y'"
    );
}

// --- Arena exhaustion ---

#[test]
fn pair_arena_refuses_allocation_past_capacity() {
    let capacity = 5;
    let mut m = Machine::new(Config::default().with_pair_capacity(capacity)).unwrap();
    // Slot 0 is nil.
    let mut last = Value::NIL;
    for n in 1..capacity {
        last = m.cons(int(n as i16), last).unwrap();
    }
    let err = m.cons(int(99), Value::NIL).unwrap_err();
    assert_eq!(
        err,
        BitsyError::ArenaExhausted {
            arena: ArenaKind::Pair,
            capacity
        }
    );
    assert_eq!(m.car(Value::NIL), Value::NIL);
    assert_eq!(m.cdr(Value::NIL), Value::NIL);
    assert_eq!(print_val(&m, last), "(4 3 2 1)");
}

#[test]
fn symbol_and_sundry_arenas_are_bounded() {
    let mut m = Machine::new(
        Config::default()
            .with_symbol_capacity(1)
            .with_sundry_capacity(5),
    )
    .unwrap();
    m.intern("a").unwrap();
    assert!(matches!(
        m.intern("b"),
        Err(BitsyError::ArenaExhausted {
            arena: ArenaKind::Symbol,
            ..
        })
    ));
    m.make_environment(None).unwrap();
    assert!(matches!(
        m.make_environment(None),
        Err(BitsyError::ArenaExhausted {
            arena: ArenaKind::Sundry,
            ..
        })
    ));
}

#[test]
fn tiny_machine_fills_every_index() {
    let mut m = Machine::new(Config::tiny()).unwrap();
    let mut last = Value::NIL;
    for _ in 1..32 {
        last = m.cons(int(31), last).unwrap();
    }
    assert_eq!(last.as_pair().0, 31);
    assert_eq!(m.unpack(m.pack(last)), last);
    assert!(m.cons(int(0), Value::NIL).is_err());
}

#[test]
fn invalid_config_is_rejected() {
    assert!(matches!(
        Machine::new(Config::tiny().with_symbol_capacity(64)),
        Err(BitsyError::Config(_))
    ));
}
