//! # wavsteg - hide text in WAV audio
//!
//! wavsteg hides a short alphanumeric message in the least significant bits
//! of the sample bytes of an uncompressed PCM WAV file, and recovers it later.
//!
//! ## Overview
//!
//! - Each character becomes a self-describing bit pattern:
//!   digits take 5 bits (`0` + value), letters take 7 (`10`/`11` + offset)
//! - The patterns are followed by the end marker `11111111`
//! - Bit `i` of that stream replaces the lowest bit of sample byte `i`
//! - Embedding is all-or-nothing: bad characters or too little audio leave
//!   the buffer untouched
//!
//! No encryption and no error correction: any re-encoding of the audio
//! destroys the message.
//!
//! ## Example Usage
//!
//! ```rust
//! use wavsteg::{embed, extract};
//!
//! let mut samples = vec![0x80u8; 256];
//! let used = embed(&mut samples, "Meet2Nite").unwrap();
//! assert_eq!(used, 8 * 7 + 5 + 8);
//!
//! assert_eq!(extract(&samples).unwrap(), "Meet2Nite");
//! ```
//!
//! ## Modules
//!
//! - [`codec`]: Character to bit pattern encoding
//! - [`stego`]: LSB transport and WAV container access
//! - [`config`]: User settings for the command line front end

pub mod codec;
pub mod config;
pub mod stego;

// Re-export commonly used types at the crate root
pub use codec::{decode_char, encode_char, BitPattern, BitStream, CharClass, CodecError};
pub use config::{ConfigError, Settings};
pub use stego::{
    embed, extract, required_bits, AudioError, Capacity, FormatParams, StegoError, WavContainer,
};
