//! PCM16 to WAV encoding for devices that hand back raw samples.

use std::io::Cursor;

use crate::{Error, Result};

/// Layout of interleaved PCM16 samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmFormat {
    /// PCM sample rate in Hz.
    pub sample_rate_hz: u32,
    /// Number of interleaved audio channels.
    pub channels: u16,
}

impl Default for PcmFormat {
    fn default() -> Self {
        Self {
            sample_rate_hz: 16_000,
            channels: 1,
        }
    }
}

impl PcmFormat {
    fn validate(self) -> Result<Self> {
        if self.sample_rate_hz == 0 {
            return Err(Error::InvalidInput(
                "PCM sample_rate_hz must be greater than zero".to_string(),
            ));
        }
        if self.channels == 0 {
            return Err(Error::InvalidInput(
                "PCM channels must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Encode interleaved PCM16 samples as a WAV byte buffer.
pub fn encode_wav(samples_pcm16: &[i16], format: PcmFormat) -> Result<Vec<u8>> {
    let format = format.validate()?;

    let spec = hound::WavSpec {
        channels: format.channels,
        sample_rate: format.sample_rate_hz,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).map_err(|error| {
            Error::InvalidInput(format!("Failed to initialize WAV writer: {error}"))
        })?;

        for &sample in samples_pcm16 {
            writer.write_sample(sample).map_err(|error| {
                Error::InvalidInput(format!("Failed to write WAV sample: {error}"))
            })?;
        }

        writer.finalize().map_err(|error| {
            Error::InvalidInput(format!("Failed to finalize WAV data: {error}"))
        })?;
    }

    Ok(cursor.into_inner())
}

/// Decode little-endian PCM16 bytes; a trailing odd byte is dropped.
pub fn pcm16_from_le_bytes(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Duration in milliseconds of `sample_count` interleaved samples.
pub fn pcm_duration_ms(sample_count: usize, format: PcmFormat) -> Result<u64> {
    let format = format.validate()?;
    let channels = usize::from(format.channels);

    let frame_count = sample_count / channels;
    let duration_ms = (frame_count as u128)
        .saturating_mul(1_000)
        .saturating_div(u128::from(format.sample_rate_hz));

    Ok(u64::try_from(duration_ms).unwrap_or(u64::MAX))
}
