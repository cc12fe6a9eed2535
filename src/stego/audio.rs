//! WAV container access for LSB steganography.
//!
//! Exposes the PCM data chunk of a WAV file as a flat byte buffer, laid out
//! exactly as stored on disk, and writes it back with the source format.
//! Supports integer PCM (8, 16, 24 and 32 bit) and 32-bit float.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::transport::{self, Capacity, StegoError};

/// Errors that can occur while loading, saving or modifying a WAV container.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Audio load error: {0}")]
    AudioLoadError(String),

    #[error("Audio save error: {0}")]
    AudioSaveError(String),

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Stego(#[from] StegoError),
}

/// Format parameters copied verbatim from the source container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatParams {
    /// Number of interleaved channels.
    pub channels: u16,
    /// Bytes per sample.
    pub sample_width: u16,
    /// Frames per second.
    pub frame_rate: u32,
}

impl From<&WavSpec> for FormatParams {
    fn from(spec: &WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_width: spec.bits_per_sample / 8,
            frame_rate: spec.sample_rate,
        }
    }
}

/// How a sample is laid out in the data chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SampleLayout {
    /// 8-bit, stored unsigned (offset binary).
    U8,
    I16,
    I24,
    I32,
    F32,
}

impl SampleLayout {
    fn of(spec: &WavSpec) -> Result<Self, AudioError> {
        match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Int, 8) => Ok(SampleLayout::U8),
            (SampleFormat::Int, 16) => Ok(SampleLayout::I16),
            (SampleFormat::Int, 24) => Ok(SampleLayout::I24),
            (SampleFormat::Int, 32) => Ok(SampleLayout::I32),
            (SampleFormat::Float, 32) => Ok(SampleLayout::F32),
            (format, bits) => Err(AudioError::UnsupportedFormat(format!(
                "{} bits {:?} (supported: 8/16/24/32-bit PCM, 32-bit float)",
                bits, format
            ))),
        }
    }

    fn width(self) -> usize {
        match self {
            SampleLayout::U8 => 1,
            SampleLayout::I16 => 2,
            SampleLayout::I24 => 3,
            SampleLayout::I32 | SampleLayout::F32 => 4,
        }
    }
}

/// A WAV file held in memory as format parameters plus raw sample bytes.
#[derive(Debug, Clone)]
pub struct WavContainer {
    /// Audio specification (sample rate, channels, etc.)
    spec: WavSpec,
    /// Sample data exactly as stored in the data chunk.
    samples: Vec<u8>,
}

impl WavContainer {
    /// Builds a container from a spec and raw sample bytes.
    ///
    /// The byte count must be a whole number of samples.
    pub fn new(spec: WavSpec, samples: Vec<u8>) -> Result<Self, AudioError> {
        let layout = SampleLayout::of(&spec)?;
        if samples.len() % layout.width() != 0 {
            return Err(AudioError::UnsupportedFormat(format!(
                "{} sample bytes is not a multiple of the {}-byte sample width",
                samples.len(),
                layout.width()
            )));
        }
        Ok(Self { spec, samples })
    }

    /// Loads a WAV file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let reader =
            WavReader::open(path).map_err(|e| AudioError::AudioLoadError(e.to_string()))?;

        let container = Self::from_reader(reader)?;
        debug!(
            path = %path.display(),
            sample_bytes = container.samples.len(),
            params = ?container.params(),
            "loaded wav container"
        );
        Ok(container)
    }

    /// Loads a WAV file from an in-memory byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AudioError> {
        let reader = WavReader::new(Cursor::new(bytes))
            .map_err(|e| AudioError::AudioLoadError(e.to_string()))?;

        Self::from_reader(reader)
    }

    fn from_reader<R: Read>(reader: WavReader<R>) -> Result<Self, AudioError> {
        let spec = reader.spec();
        let layout = SampleLayout::of(&spec)?;
        let load_err = |e: hound::Error| AudioError::AudioLoadError(e.to_string());

        let mut samples = Vec::with_capacity(reader.len() as usize * layout.width());
        match layout {
            SampleLayout::F32 => {
                for sample in reader.into_samples::<f32>() {
                    samples.extend_from_slice(&sample.map_err(load_err)?.to_le_bytes());
                }
            }
            _ => {
                for sample in reader.into_samples::<i32>() {
                    push_int_sample(&mut samples, layout, sample.map_err(load_err)?);
                }
            }
        }

        Ok(Self { spec, samples })
    }

    /// Format parameters of the container.
    pub fn params(&self) -> FormatParams {
        FormatParams::from(&self.spec)
    }

    /// Returns the audio specification.
    pub fn spec(&self) -> &WavSpec {
        &self.spec
    }

    /// Raw sample bytes.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Number of samples across all channels.
    pub fn sample_count(&self) -> usize {
        self.samples.len() / (self.spec.bits_per_sample as usize / 8)
    }

    /// Returns the duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        let frames = self.sample_count() / self.spec.channels.max(1) as usize;
        frames as f64 / self.spec.sample_rate as f64
    }

    /// How much text this container can carry.
    pub fn capacity(&self) -> Capacity {
        Capacity::for_len(self.samples.len())
    }

    /// Hides `message` in the sample bytes. See [`transport::embed`].
    pub fn embed(&mut self, message: &str) -> Result<usize, AudioError> {
        Ok(transport::embed(&mut self.samples, message)?)
    }

    /// Recovers a hidden message. See [`transport::extract`].
    pub fn extract(&self) -> Result<String, AudioError> {
        Ok(transport::extract(&self.samples)?)
    }

    /// Saves the audio to a WAV file with the source format.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AudioError> {
        let path = path.as_ref();
        let writer = WavWriter::create(path, self.spec)
            .map_err(|e| AudioError::AudioSaveError(e.to_string()))?;
        self.write_samples(writer)?;

        debug!(
            path = %path.display(),
            sample_bytes = self.samples.len(),
            "saved wav container"
        );
        Ok(())
    }

    /// Returns the audio as WAV bytes.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, AudioError> {
        let mut bytes = Vec::new();
        {
            let writer = WavWriter::new(Cursor::new(&mut bytes), self.spec)
                .map_err(|e| AudioError::AudioSaveError(e.to_string()))?;
            self.write_samples(writer)?;
        }
        Ok(bytes)
    }

    fn write_samples<W: Write + Seek>(&self, mut writer: WavWriter<W>) -> Result<(), AudioError> {
        let save_err = |e: hound::Error| AudioError::AudioSaveError(e.to_string());
        let layout = SampleLayout::of(&self.spec)?;

        for chunk in self.samples.chunks_exact(layout.width()) {
            match layout {
                SampleLayout::F32 => {
                    let value = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                    writer.write_sample(value).map_err(save_err)?;
                }
                _ => writer
                    .write_sample(read_int_sample(layout, chunk))
                    .map_err(save_err)?,
            }
        }

        writer.finalize().map_err(save_err)
    }
}

/// Appends the on-disk bytes of one integer sample decoded by hound.
fn push_int_sample(out: &mut Vec<u8>, layout: SampleLayout, value: i32) {
    let le = value.to_le_bytes();
    match layout {
        // hound recentres unsigned 8-bit samples around zero.
        SampleLayout::U8 => out.push((value as i8 as u8) ^ 0x80),
        SampleLayout::I16 => out.extend_from_slice(&le[..2]),
        SampleLayout::I24 => out.extend_from_slice(&le[..3]),
        SampleLayout::I32 | SampleLayout::F32 => out.extend_from_slice(&le),
    }
}

/// Inverse of [`push_int_sample`] for one sample-width chunk.
fn read_int_sample(layout: SampleLayout, chunk: &[u8]) -> i32 {
    match layout {
        SampleLayout::U8 => (chunk[0] ^ 0x80) as i8 as i32,
        SampleLayout::I16 => i16::from_le_bytes([chunk[0], chunk[1]]) as i32,
        // Place the 24 bits high, then shift back down to sign-extend.
        SampleLayout::I24 => i32::from_le_bytes([0, chunk[0], chunk[1], chunk[2]]) >> 8,
        SampleLayout::I32 | SampleLayout::F32 => {
            i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
        }
    }
}

/// Creates a simple test WAV audio.
#[cfg(test)]
pub(crate) fn create_test_audio(frames: usize, channels: u16, bits_per_sample: u16) -> WavContainer {
    let spec = WavSpec {
        channels,
        sample_rate: 44100,
        bits_per_sample,
        sample_format: SampleFormat::Int,
    };
    let layout = SampleLayout::of(&spec).unwrap();
    let amplitude = ((1i64 << (bits_per_sample - 1)) - 1) as f64 * 0.5;

    // Generate a simple sine wave
    let mut samples = Vec::new();
    for i in 0..frames * channels as usize {
        let t = (i / channels as usize) as f64 / 44100.0;
        let value = (f64::sin(2.0 * std::f64::consts::PI * 440.0 * t) * amplitude) as i32;
        push_int_sample(&mut samples, layout, value);
    }

    WavContainer { spec, samples }
}
