//! Voice capture: device seams, encoded payloads and the capture pipeline.

mod pipeline;
mod wav;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;

use crate::error::CaptureError;
use crate::Result;

pub use pipeline::{CaptureState, VoicePipeline};
pub use wav::{encode_wav, pcm16_from_le_bytes, pcm_duration_ms, PcmFormat};

#[cfg(test)]
pub(crate) use pipeline::tests::FakeDevice;

/// Encoded audio delivered by a finished capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAudio {
    /// MIME type produced by the recorder, e.g. `audio/wav`.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl EncodedAudio {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// WAV-encode raw PCM16 samples.
    pub fn wav_from_pcm16(samples: &[i16], format: PcmFormat) -> Result<Self> {
        Ok(Self::new("audio/wav", encode_wav(samples, format)?))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Self-contained `data:` URL embedding the payload as base64.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        let mime_type = if self.mime_type.trim().is_empty() {
            "audio/webm"
        } else {
            self.mime_type.trim()
        };
        format!(
            "data:{mime_type};base64,{}",
            BASE64_STANDARD.encode(&self.bytes)
        )
    }
}

/// Audio input capability.
#[allow(async_fn_in_trait)]
pub trait AudioDevice {
    type Session: CaptureSession;

    /// Open a capture session and start recording.
    ///
    /// Fails with [`CaptureError::Unsupported`] when there is no capture
    /// capability and [`CaptureError::PermissionDenied`] when access is refused.
    async fn open(&mut self) -> std::result::Result<Self::Session, CaptureError>;
}

/// One open connection to the audio input.
#[allow(async_fn_in_trait)]
pub trait CaptureSession {
    /// Stop recording and deliver the encoded payload.
    async fn stop(&mut self) -> std::result::Result<EncodedAudio, CaptureError>;

    /// Free the underlying device. Must be safe to call more than once.
    fn release(&mut self);
}
