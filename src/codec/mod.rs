//! Character codec: a self-describing variable-length bit encoding for
//! digits and ASCII letters.
//!
//! This module knows nothing about audio. It turns characters into
//! [`BitPattern`]s and reads them back from a slice of bits.

pub mod bits;
pub mod charset;

pub use bits::{BitPattern, BitStream};
pub use charset::{
    decode_char, decode_char_at, encode_char, encode_char_at, encode_message, encoded_len,
    CharClass, DIGIT_BITS, LETTER_BITS,
};

use thiserror::Error;

/// Errors produced while encoding or decoding characters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Only `0-9`, `A-Z` and `a-z` can be encoded.
    #[error("Unsupported character {ch:?} at position {index}")]
    UnsupportedCharacter { ch: char, index: usize },

    /// A digit pattern carried a value in `10..=15`.
    #[error("Invalid digit value: {0}")]
    InvalidDigitValue(u8),

    /// A pattern at `position` does not map to any character.
    #[error("Corrupt bit stream at bit {position}")]
    CorruptStream { position: usize },

    /// Fewer bits remain than the pattern needs.
    #[error("Bit stream truncated: need {needed} bits, have {available}")]
    Truncated { needed: usize, available: usize },
}
