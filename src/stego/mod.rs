//! Steganography module for hiding text in PCM audio.
//!
//! - [`transport`]: LSB embedding and extraction over a raw byte buffer
//! - [`audio`]: WAV container loading and saving

pub mod audio;
pub mod transport;

pub use audio::{AudioError, FormatParams, WavContainer};
pub use transport::{
    embed, extract, required_bits, Capacity, StegoError, TERMINATOR, TERMINATOR_BITS,
};
