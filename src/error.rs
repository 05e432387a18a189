use std::fmt;

use crate::config::WordWidth;

/// Which fixed-capacity arena an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArenaKind {
    Pair,
    Symbol,
    Sundry,
}

impl fmt::Display for ArenaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArenaKind::Pair => write!(f, "pair"),
            ArenaKind::Symbol => write!(f, "symbol"),
            ArenaKind::Sundry => write!(f, "sundry"),
        }
    }
}

/// Errors raised by the runtime core.
///
/// Calling the wrong accessor on a value is a caller bug and panics instead
/// of producing one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BitsyError {
    /// An arena ran out of slots. Slots are never reclaimed, so this is terminal.
    ArenaExhausted { arena: ArenaKind, capacity: usize },

    /// Lookup walked off the outermost environment without a match.
    Unbound(String),

    /// Integer literal does not fit the payload of the configured word width.
    IntOutOfRange { value: i64, width: WordWidth },

    /// A primitive received an argument of the wrong kind.
    TypeError(String),

    /// A primitive received the wrong number of arguments.
    WrongArgs {
        name: String,
        expected: usize,
        got: usize,
    },

    /// Attempted to call something that is not a callable combiner.
    NotApplicable(String),

    /// Rejected configuration.
    Config(String),
}

impl fmt::Display for BitsyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitsyError::ArenaExhausted { arena, capacity } => write!(
                f,
                "Resource exhausted: {} arena is full ({} slots)",
                arena, capacity
            ),
            BitsyError::Unbound(name) => write!(f, "Error: unbound symbol '{}'", name),
            BitsyError::IntOutOfRange { value, width } => write!(
                f,
                "Error: integer {} out of range {}..={} for {}-bit words",
                value,
                width.min_payload(),
                width.max_payload(),
                width.bits()
            ),
            BitsyError::TypeError(msg) => write!(f, "Type error: {}", msg),
            BitsyError::WrongArgs {
                name,
                expected,
                got,
            } => write!(
                f,
                "Error: {} expects {} argument(s), got {}",
                name, expected, got
            ),
            BitsyError::NotApplicable(what) => write!(f, "Error: cannot apply {}", what),
            BitsyError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for BitsyError {}

pub type BitsyResult<T> = Result<T, BitsyError>;
