use std::fmt;

use crate::error::{BitsyError, BitsyResult};

/// Width of a tagged value word. Two bits go to the kind tag; the rest is a
/// signed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordWidth {
    Eight,
    Sixteen,
}

impl WordWidth {
    pub fn bits(self) -> u32 {
        match self {
            WordWidth::Eight => 8,
            WordWidth::Sixteen => 16,
        }
    }

    pub fn payload_bits(self) -> u32 {
        self.bits() - 2
    }

    pub fn min_payload(self) -> i16 {
        -(1i16 << (self.payload_bits() - 1))
    }

    pub fn max_payload(self) -> i16 {
        (1i16 << (self.payload_bits() - 1)) - 1
    }

    /// Largest number of slots an arena can have while every index stays
    /// representable as a non-negative payload.
    pub fn max_slots(self) -> usize {
        self.max_payload() as usize + 1
    }

    pub fn contains(self, n: i64) -> bool {
        n >= self.min_payload() as i64 && n <= self.max_payload() as i64
    }
}

impl fmt::Display for WordWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Slots the machine fills before handing control to callers.
pub const STARTUP_PAIRS: usize = 1; // nil
pub const STARTUP_SUNDRIES: usize = 4; // #f #t #inert #ignore

/// Sizing and behaviour knobs for a [`Machine`](crate::machine::Machine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub word_width: WordWidth,
    pub pair_capacity: usize,
    pub symbol_capacity: usize,
    pub sundry_capacity: usize,
    /// Guard `equal` and the printer against cyclic pair graphs.
    pub cycle_guard: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            word_width: WordWidth::Sixteen,
            pair_capacity: 8192,
            symbol_capacity: 1000,
            sundry_capacity: 1000,
            cycle_guard: false,
        }
    }
}

impl Config {
    /// 8-bit words with every arena as large as a 6-bit payload allows.
    pub fn tiny() -> Self {
        let slots = WordWidth::Eight.max_slots();
        Config {
            word_width: WordWidth::Eight,
            pair_capacity: slots,
            symbol_capacity: slots,
            sundry_capacity: slots,
            cycle_guard: false,
        }
    }

    pub fn with_word_width(mut self, width: WordWidth) -> Self {
        self.word_width = width;
        self
    }

    pub fn with_pair_capacity(mut self, capacity: usize) -> Self {
        self.pair_capacity = capacity;
        self
    }

    pub fn with_symbol_capacity(mut self, capacity: usize) -> Self {
        self.symbol_capacity = capacity;
        self
    }

    pub fn with_sundry_capacity(mut self, capacity: usize) -> Self {
        self.sundry_capacity = capacity;
        self
    }

    pub fn with_cycle_guard(mut self, on: bool) -> Self {
        self.cycle_guard = on;
        self
    }

    pub fn validate(&self) -> BitsyResult<()> {
        let max = self.word_width.max_slots();
        let arenas = [
            ("pair", self.pair_capacity, STARTUP_PAIRS),
            ("symbol", self.symbol_capacity, 1),
            ("sundry", self.sundry_capacity, STARTUP_SUNDRIES),
        ];
        for (name, capacity, min) in arenas {
            if capacity < min {
                return Err(BitsyError::Config(format!(
                    "{} capacity {} is below the minimum of {}",
                    name, capacity, min
                )));
            }
            if capacity > max {
                return Err(BitsyError::Config(format!(
                    "{} capacity {} exceeds {} addressable slots of {} words",
                    name, capacity, max, self.word_width
                )));
            }
        }
        Ok(())
    }
}
