//! Bit containers used by the character codec.

use std::fmt;

/// The bit pattern of a single encoded character.
///
/// At most 7 bits are ever needed, so the pattern lives in a `u8`
/// with the first emitted bit in the highest used position.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitPattern {
    value: u8,
    len: u8,
}

impl BitPattern {
    /// Builds a pattern from the low `len` bits of `value`, most significant first.
    pub(crate) const fn new(value: u8, len: u8) -> Self {
        Self {
            value: value & ((1u16 << len as u32) - 1) as u8,
            len,
        }
    }

    /// Number of bits in the pattern.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over the bits in transmission order.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).rev().map(move |shift| (self.value >> shift) & 1 == 1)
    }
}

impl fmt::Debug for BitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitPattern({})", self)
    }
}

impl fmt::Display for BitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// An owned, growable sequence of bits.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BitStream {
    bits: Vec<bool>,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Appends every bit of `pattern`.
    pub fn push_pattern(&mut self, pattern: BitPattern) {
        self.bits.extend(pattern.bits());
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }
}

impl fmt::Debug for BitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitStream({})", self)
    }
}

impl fmt::Display for BitStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Reads `width` bits from `bits` starting at `start` as an unsigned integer,
/// most significant bit first. The caller guarantees the range is in bounds.
pub(crate) fn read_uint(bits: &[bool], start: usize, width: usize) -> u8 {
    bits[start..start + width]
        .iter()
        .fold(0u8, |acc, &bit| (acc << 1) | bit as u8)
}
