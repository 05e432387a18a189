//! Tagged value runtime core for Bitsy, a small interpreter for the Kernel
//! dialect of Lisp that keeps its data in fixed tables and refers to it by
//! index instead of by pointer.

pub mod config;
pub mod env;
pub mod error;
pub mod heap;
pub mod machine;
pub mod primitives;
pub mod printer;
pub mod sundry;
pub mod symbol;
pub mod value;
pub mod word;

pub use config::{Config, WordWidth};
pub use error::{ArenaKind, BitsyError, BitsyResult};
pub use machine::Machine;
pub use value::Value;
