//! Variable-length prefix code for digits and ASCII letters.
//!
//! | Class  | Marker | Payload | Total |
//! |--------|--------|---------|-------|
//! | Digit  | `0`    | 4 bits  | 5     |
//! | Upper  | `10`   | 5 bits  | 7     |
//! | Lower  | `11`   | 5 bits  | 7     |
//!
//! Reading one bit, then at most one more, identifies the class.

use super::bits::{read_uint, BitPattern, BitStream};
use super::CodecError;

/// Width of a digit pattern (marker + value).
pub const DIGIT_BITS: usize = 5;

/// Width of a letter pattern (marker + offset).
pub const LETTER_BITS: usize = 7;

/// Number of letters in each alphabet.
const ALPHABET_LEN: u8 = 26;

/// The class a supported character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// `0`-`9`
    Digit,
    /// `A`-`Z`
    UpperLetter,
    /// `a`-`z`
    LowerLetter,
}

impl CharClass {
    /// Classifies `c`, returning `None` for anything outside the three classes.
    pub fn of(c: char) -> Option<Self> {
        if c.is_ascii_digit() {
            Some(CharClass::Digit)
        } else if c.is_ascii_uppercase() {
            Some(CharClass::UpperLetter)
        } else if c.is_ascii_lowercase() {
            Some(CharClass::LowerLetter)
        } else {
            None
        }
    }

    /// Total width in bits of a pattern of this class.
    pub fn width(self) -> usize {
        match self {
            CharClass::Digit => DIGIT_BITS,
            CharClass::UpperLetter | CharClass::LowerLetter => LETTER_BITS,
        }
    }

    fn base(self) -> u8 {
        match self {
            CharClass::Digit => b'0',
            CharClass::UpperLetter => b'A',
            CharClass::LowerLetter => b'a',
        }
    }
}

/// Encodes a single character into its bit pattern.
///
/// `index` is the position of `c` in the surrounding message and is only
/// used to make the error useful.
pub fn encode_char_at(c: char, index: usize) -> Result<BitPattern, CodecError> {
    let class = CharClass::of(c).ok_or(CodecError::UnsupportedCharacter { ch: c, index })?;
    // Classified characters are ASCII, so the cast is lossless.
    let payload = c as u8 - class.base();

    let pattern = match class {
        CharClass::Digit => BitPattern::new(payload, 5),
        CharClass::UpperLetter => BitPattern::new(0b10_00000 | payload, 7),
        CharClass::LowerLetter => BitPattern::new(0b11_00000 | payload, 7),
    };
    Ok(pattern)
}

/// Encodes a single character into its bit pattern.
pub fn encode_char(c: char) -> Result<BitPattern, CodecError> {
    encode_char_at(c, 0)
}

/// Decodes the character whose pattern starts at `bits[0]`.
///
/// Returns the character and the number of bits it occupied.
pub fn decode_char(bits: &[bool]) -> Result<(char, usize), CodecError> {
    decode_char_at(bits, 0)
}

/// Decodes the character whose pattern starts at `bits[start]`.
pub fn decode_char_at(bits: &[bool], start: usize) -> Result<(char, usize), CodecError> {
    let available = bits.len().saturating_sub(start);
    let class = match bits.get(start..).unwrap_or(&[]) {
        [] => {
            return Err(CodecError::Truncated {
                needed: 1,
                available,
            })
        }
        [false, ..] => CharClass::Digit,
        [true, false, ..] => CharClass::UpperLetter,
        [true, true, ..] => CharClass::LowerLetter,
        [true] => {
            return Err(CodecError::Truncated {
                needed: 2,
                available,
            })
        }
    };

    let width = class.width();
    if available < width {
        return Err(CodecError::Truncated {
            needed: width,
            available,
        });
    }

    let char_value = match class {
        CharClass::Digit => {
            let value = read_uint(bits, start + 1, 4);
            if value > 9 {
                return Err(CodecError::InvalidDigitValue(value));
            }
            value
        }
        CharClass::UpperLetter | CharClass::LowerLetter => {
            let offset = read_uint(bits, start + 2, 5);
            if offset >= ALPHABET_LEN {
                return Err(CodecError::CorruptStream { position: start });
            }
            offset
        }
    };

    Ok(((class.base() + char_value) as char, width))
}

/// Encodes every character of `message` in order.
///
/// Fails on the first unsupported character; nothing partial is returned.
pub fn encode_message(message: &str) -> Result<BitStream, CodecError> {
    let mut stream = BitStream::with_capacity(message.len() * LETTER_BITS);
    for (index, c) in message.chars().enumerate() {
        stream.push_pattern(encode_char_at(c, index)?);
    }
    Ok(stream)
}

/// Number of bits `message` occupies once encoded, without the terminator.
pub fn encoded_len(message: &str) -> Result<usize, CodecError> {
    message
        .chars()
        .enumerate()
        .map(|(index, c)| {
            CharClass::of(c)
                .map(CharClass::width)
                .ok_or(CodecError::UnsupportedCharacter { ch: c, index })
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_encode_known_vectors() {
        assert_eq!(encode_char('5').unwrap().to_string(), "00101");
        assert_eq!(encode_char('A').unwrap().to_string(), "1000000");
        assert_eq!(encode_char('z').unwrap().to_string(), "1111001");
    }

    #[test]
    fn test_decode_known_vectors() {
        assert_eq!(decode_char(&bits("00101")).unwrap(), ('5', 5));
        assert_eq!(decode_char(&bits("1000000")).unwrap(), ('A', 7));
        assert_eq!(decode_char(&bits("1111001")).unwrap(), ('z', 7));
    }

    #[test]
    fn test_every_supported_char_roundtrips() {
        let alphabet = ('0'..='9').chain('A'..='Z').chain('a'..='z');
        for c in alphabet {
            let pattern = encode_char(c).unwrap();
            let encoded: Vec<bool> = pattern.bits().collect();
            assert_eq!(decode_char(&encoded).unwrap(), (c, pattern.len()), "char {c:?}");
        }
    }

    #[test]
    fn test_unsupported_characters_rejected() {
        for c in [' ', '!', '\n', '-', 'é', 'Ω', '٣', '😀'] {
            assert!(
                matches!(encode_char(c), Err(CodecError::UnsupportedCharacter { ch, .. }) if ch == c),
                "char {c:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_encode_message_reports_offending_index() {
        let err = encode_message("ab3 x").unwrap_err();
        assert_eq!(err, CodecError::UnsupportedCharacter { ch: ' ', index: 3 });
    }

    #[test]
    fn test_encode_message_concatenates() {
        let stream = encode_message("a1").unwrap();
        assert_eq!(stream.to_string(), "110000000001");
    }

    #[test]
    fn test_encoded_len_matches_stream() {
        let message = "Hello2026World";
        assert_eq!(
            encoded_len(message).unwrap(),
            encode_message(message).unwrap().len()
        );
        assert_eq!(encoded_len("").unwrap(), 0);
        assert!(encoded_len("no spaces").is_err());
    }

    #[test]
    fn test_decode_rejects_digit_values_above_nine() {
        for value in 10u8..=15 {
            let pattern = format!("0{value:04b}");
            assert_eq!(
                decode_char(&bits(&pattern)),
                Err(CodecError::InvalidDigitValue(value))
            );
        }
    }

    #[test]
    fn test_decode_rejects_letter_offsets_past_z() {
        assert_eq!(
            decode_char(&bits("1011010")),
            Err(CodecError::CorruptStream { position: 0 })
        );
        assert_eq!(
            decode_char_at(&bits("001111111110"), 5),
            Err(CodecError::CorruptStream { position: 5 })
        );
    }

    #[test]
    fn test_decode_truncated_patterns() {
        assert_eq!(
            decode_char(&[]),
            Err(CodecError::Truncated { needed: 1, available: 0 })
        );
        assert_eq!(
            decode_char(&bits("1")),
            Err(CodecError::Truncated { needed: 2, available: 1 })
        );
        assert_eq!(
            decode_char(&bits("0010")),
            Err(CodecError::Truncated { needed: 5, available: 4 })
        );
        assert_eq!(
            decode_char(&bits("110000")),
            Err(CodecError::Truncated { needed: 7, available: 6 })
        );
    }

    #[test]
    fn test_decode_ignores_trailing_bits() {
        assert_eq!(decode_char(&bits("001111111")), Ok(('7', 5)));
    }
}
