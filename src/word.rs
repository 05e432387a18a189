//! Bit-level encoding of tagged value words.
//!
//! A word is `payload << 2 | kind`, truncated to the configured width. The
//! payload comes back out through an arithmetic shift, so negative integers
//! survive the trip. Nothing here checks ranges: arenas never hand out an
//! index the payload cannot hold, and integer construction checks literals.

use std::fmt;

use crate::config::WordWidth;

pub const TAG_BITS: u32 = 2;
pub const TAG_MASK: u16 = 0b11;

/// The 2-bit discriminant in the low bits of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Sundry = 0,
    Int = 1,
    Pair = 2,
    Symbol = 3,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Sundry, Kind::Int, Kind::Pair, Kind::Symbol];

    fn from_bits(bits: u16) -> Kind {
        match bits & TAG_MASK {
            0 => Kind::Sundry,
            1 => Kind::Int,
            2 => Kind::Pair,
            _ => Kind::Symbol,
        }
    }
}

/// A raw tagged word. 8-bit words only use the low byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word(pub u16);

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word({:#06x})", self.0)
    }
}

#[inline]
pub fn tag(payload: i16, kind: Kind, width: WordWidth) -> Word {
    let raw = ((payload as u16) << TAG_BITS) | kind as u16;
    match width {
        WordWidth::Eight => Word(raw & 0xff),
        WordWidth::Sixteen => Word(raw),
    }
}

#[inline]
pub fn untag(word: Word, width: WordWidth) -> i16 {
    match width {
        WordWidth::Eight => (word.0 as u8 as i8 as i16) >> TAG_BITS,
        WordWidth::Sixteen => (word.0 as i16) >> TAG_BITS,
    }
}

#[inline]
pub fn kind_of(word: Word) -> Kind {
    Kind::from_bits(word.0)
}
