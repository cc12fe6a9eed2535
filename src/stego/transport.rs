//! LSB transport: maps an encoded message onto the low bits of a byte buffer.
//!
//! Layout: `[char pattern]* 11111111`, one bit per byte, starting at byte 0.
//! Bytes past the last payload bit are never touched.
//!
//! Extraction checks for the terminator before decoding each character.
//! A letter pattern can never start with seven `1` bits (that would be
//! offset 31), so a stream produced by [`embed`] cannot end early.

use thiserror::Error;

use crate::codec::{decode_char_at, encode_message, encoded_len, BitPattern, CodecError};
use crate::codec::{DIGIT_BITS, LETTER_BITS};

/// End-of-message marker appended after the last character.
pub const TERMINATOR: BitPattern = BitPattern::new(0xFF, 8);

/// Width of [`TERMINATOR`] in bits.
pub const TERMINATOR_BITS: usize = 8;

/// Errors that can occur while embedding or extracting a message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StegoError {
    #[error("Unsupported character {ch:?} at position {index} (only 0-9, A-Z, a-z allowed)")]
    UnsupportedCharacter { ch: char, index: usize },

    #[error("Message is too large to hide: need {needed} sample bytes, have {available}")]
    CapacityExceeded { needed: usize, available: usize },

    #[error("Invalid digit value {0} in hidden data")]
    InvalidDigitValue(u8),

    #[error("Corrupt hidden data at bit {position}")]
    CorruptStream { position: usize },

    #[error("No end-of-message marker found; the audio holds no message or was modified")]
    TerminatorNotFound,
}

impl From<CodecError> for StegoError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::UnsupportedCharacter { ch, index } => {
                StegoError::UnsupportedCharacter { ch, index }
            }
            CodecError::InvalidDigitValue(value) => StegoError::InvalidDigitValue(value),
            CodecError::CorruptStream { position } => StegoError::CorruptStream { position },
            // Running out of bits mid-pattern means the marker was never reached.
            CodecError::Truncated { .. } => StegoError::TerminatorNotFound,
        }
    }
}

/// Number of sample bytes needed to hide `message`, terminator included.
pub fn required_bits(message: &str) -> Result<usize, StegoError> {
    Ok(encoded_len(message)? + TERMINATOR_BITS)
}

/// Hides `message` in the least significant bits of `samples`, in place.
///
/// Either every payload bit is written or the buffer is left untouched:
/// unsupported characters and insufficient capacity are detected before
/// the first byte changes. Returns the number of bytes carrying payload.
pub fn embed(samples: &mut [u8], message: &str) -> Result<usize, StegoError> {
    let mut stream = encode_message(message)?;
    stream.push_pattern(TERMINATOR);

    if stream.len() > samples.len() {
        return Err(StegoError::CapacityExceeded {
            needed: stream.len(),
            available: samples.len(),
        });
    }

    for (sample, bit) in samples.iter_mut().zip(stream.iter()) {
        *sample = (*sample & !1) | bit as u8;
    }

    Ok(stream.len())
}

/// Recovers a message previously hidden with [`embed`].
///
/// Never returns a partial message: any decode failure or a missing
/// terminator is an error.
pub fn extract(samples: &[u8]) -> Result<String, StegoError> {
    let bits: Vec<bool> = samples.iter().map(|sample| sample & 1 == 1).collect();

    let mut message = String::new();
    let mut position = 0;
    loop {
        if is_terminator(&bits, position) {
            return Ok(message);
        }
        if position >= bits.len() {
            return Err(StegoError::TerminatorNotFound);
        }

        let (ch, consumed) = decode_char_at(&bits, position)?;
        message.push(ch);
        position += consumed;
    }
}

fn is_terminator(bits: &[bool], position: usize) -> bool {
    bits.get(position..position + TERMINATOR_BITS)
        .is_some_and(|window| window.iter().all(|&bit| bit))
}

/// How much text a buffer of a given size can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// One bit per sample byte.
    pub total_bits: usize,
    /// Bits left for characters once the terminator is reserved.
    pub payload_bits: usize,
}

impl Capacity {
    /// Capacity of a buffer holding `sample_bytes` bytes.
    pub fn for_len(sample_bytes: usize) -> Self {
        Self {
            total_bits: sample_bytes,
            payload_bits: sample_bytes.saturating_sub(TERMINATOR_BITS),
        }
    }

    /// Longest message that always fits, i.e. one made only of letters.
    pub fn min_chars(&self) -> usize {
        self.payload_bits / LETTER_BITS
    }

    /// Longest message that can fit, i.e. one made only of digits.
    pub fn max_chars(&self) -> usize {
        self.payload_bits / DIGIT_BITS
    }

    /// Whether `message` fits. Fails if it holds unsupported characters.
    pub fn fits(&self, message: &str) -> Result<bool, StegoError> {
        Ok(required_bits(message)? <= self.total_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_char;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn noise(len: usize, seed: u64) -> Vec<u8> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen()).collect()
    }

    fn lsb_buffer(pattern: &str) -> Vec<u8> {
        pattern
            .chars()
            .map(|c| if c == '1' { 0x41 } else { 0x40 })
            .collect()
    }

    #[test]
    fn test_roundtrip() {
        for (seed, message) in ["Hello", "abc123XYZ", "0", "Z", "zzzzzzzz", "2026Oct19"]
            .iter()
            .enumerate()
        {
            let mut samples = noise(512, seed as u64);
            embed(&mut samples, message).unwrap();
            assert_eq!(extract(&samples).unwrap(), *message);
        }
    }

    #[test]
    fn test_embed_returns_bits_used() {
        let mut samples = noise(64, 1);
        // 'A' (7) + '1' (5) + terminator (8)
        assert_eq!(embed(&mut samples, "A1").unwrap(), 20);
        assert_eq!(required_bits("A1").unwrap(), 20);
    }

    #[test]
    fn test_bytes_past_payload_untouched() {
        let original = noise(256, 7);
        let mut samples = original.clone();
        let used = embed(&mut samples, "Secret42").unwrap();

        assert_eq!(used, required_bits("Secret42").unwrap());
        assert_eq!(&samples[used..], &original[used..]);
    }

    #[test]
    fn test_only_lsb_changes() {
        let original = noise(256, 11);
        let mut samples = original.clone();
        embed(&mut samples, "UpperBitsStay").unwrap();

        for (before, after) in original.iter().zip(&samples) {
            assert_eq!(before & !1, after & !1);
        }
    }

    #[test]
    fn test_payload_bits_written_in_order() {
        let mut samples = vec![0u8; 20];
        embed(&mut samples, "5A").unwrap();
        let lsbs: String = samples
            .iter()
            .map(|s| if s & 1 == 1 { '1' } else { '0' })
            .collect();
        assert_eq!(lsbs, "00101100000011111111");
    }

    #[test]
    fn test_capacity_boundary() {
        let message = "Ab3";
        let needed = required_bits(message).unwrap();

        let mut exact = noise(needed, 3);
        embed(&mut exact, message).unwrap();
        assert_eq!(extract(&exact).unwrap(), message);

        let original = noise(needed - 1, 3);
        let mut short = original.clone();
        assert_eq!(
            embed(&mut short, message),
            Err(StegoError::CapacityExceeded {
                needed,
                available: needed - 1
            })
        );
        assert_eq!(short, original);
    }

    #[test]
    fn test_unsupported_character_leaves_buffer_unchanged() {
        let original = noise(512, 5);
        let mut samples = original.clone();
        assert_eq!(
            embed(&mut samples, "hello world"),
            Err(StegoError::UnsupportedCharacter { ch: ' ', index: 5 })
        );
        assert_eq!(samples, original);
    }

    #[test]
    fn test_empty_message() {
        let mut samples = noise(32, 9);
        assert_eq!(embed(&mut samples, "").unwrap(), TERMINATOR_BITS);
        assert!(samples[..8].iter().all(|s| s & 1 == 1));
        assert_eq!(extract(&samples).unwrap(), "");
    }

    #[test]
    fn test_empty_buffer() {
        assert_eq!(extract(&[]), Err(StegoError::TerminatorNotFound));
        assert_eq!(
            embed(&mut [], ""),
            Err(StegoError::CapacityExceeded {
                needed: 8,
                available: 0
            })
        );
    }

    #[test]
    fn test_no_terminator_all_zero_lsbs() {
        // Decodes as a run of '0' digits until the bits run out.
        assert_eq!(extract(&[0u8; 100]), Err(StegoError::TerminatorNotFound));
        assert_eq!(extract(&[2u8; 103]), Err(StegoError::TerminatorNotFound));
    }

    #[test]
    fn test_seven_ones_is_not_a_terminator() {
        // Too short for the marker, so it is read as lowercase offset 31.
        let samples = lsb_buffer("1111111");
        assert_eq!(
            extract(&samples),
            Err(StegoError::CorruptStream { position: 0 })
        );
    }

    #[test]
    fn test_invalid_digit_value() {
        let samples = lsb_buffer("01100");
        assert_eq!(extract(&samples), Err(StegoError::InvalidDigitValue(12)));
    }

    #[test]
    fn test_invalid_letter_offset_is_corrupt() {
        // 'a' then an uppercase pattern with offset 27
        let samples = lsb_buffer("1100000101101111111111");
        assert_eq!(
            extract(&samples),
            Err(StegoError::CorruptStream { position: 7 })
        );
    }

    #[test]
    fn test_terminator_checked_before_decode() {
        // '1' followed by eight ones at a pattern start.
        let samples = lsb_buffer("00001111111110000");
        assert_eq!(extract(&samples).unwrap(), "1");
    }

    #[test]
    fn test_extract_stops_at_first_terminator() {
        let mut samples = noise(128, 21);
        let used = embed(&mut samples, "first").unwrap();
        embed(&mut samples[used..], "second").unwrap();
        assert_eq!(extract(&samples).unwrap(), "first");
    }

    /// Every two-character message is checked for an early terminator match.
    /// The corpus of colliding messages is empty: a terminator at a pattern
    /// boundary would need a letter offset of 31.
    #[test]
    fn test_terminator_collision_corpus_is_empty() {
        let alphabet: Vec<char> = ('0'..='9').chain('A'..='Z').chain('a'..='z').collect();
        let mut collisions = Vec::new();
        let mut samples = vec![0u8; 32];

        for &first in &alphabet {
            for &second in &alphabet {
                let message: String = [first, second].iter().collect();
                samples.fill(0);
                embed(&mut samples, &message).unwrap();
                if extract(&samples).as_deref() != Ok(message.as_str()) {
                    collisions.push(message);
                }
            }
        }

        assert_eq!(collisions, Vec::<String>::new());
    }

    #[test]
    fn test_ones_run_across_boundary_is_not_a_terminator() {
        // 'p' ends in four ones and 'z' starts with four.
        let stream = format!("{}{}", encode_char('p').unwrap(), encode_char('z').unwrap());
        assert!(stream.contains("11111111"));

        let mut samples = vec![0u8; 64];
        embed(&mut samples, "pz").unwrap();
        assert_eq!(extract(&samples).unwrap(), "pz");
    }

    #[test]
    fn test_capacity_report() {
        let capacity = Capacity::for_len(78);
        assert_eq!(capacity.total_bits, 78);
        assert_eq!(capacity.payload_bits, 70);
        assert_eq!(capacity.min_chars(), 10);
        assert_eq!(capacity.max_chars(), 14);

        assert!(capacity.fits(&"a".repeat(10)).unwrap());
        assert!(!capacity.fits(&"a".repeat(11)).unwrap());
        assert!(capacity.fits(&"9".repeat(14)).unwrap());
        assert!(capacity.fits("no way").is_err());

        assert_eq!(Capacity::for_len(3).payload_bits, 0);
    }
}
