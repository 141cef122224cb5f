//! Capture device reading raw PCM16 from stdin.
//!
//! Pipe a recorder into `sid record`, e.g.
//! `arecord -q -f S16_LE -r 16000 -c 1 | sid record`.

use std::io::{self, IsTerminal, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use sid_core::voice::{pcm16_from_le_bytes, pcm_duration_ms, PcmFormat};
use sid_core::{AudioDevice, CaptureError, CaptureSession, EncodedAudio};
use tokio::sync::Notify;

const READ_CHUNK_BYTES: usize = 4096;

/// Audio device backed by the process's standard input.
pub struct StdinPcmDevice {
    format: PcmFormat,
    input_closed: Arc<Notify>,
}

impl StdinPcmDevice {
    pub fn new(format: PcmFormat) -> Self {
        Self {
            format,
            input_closed: Arc::new(Notify::new()),
        }
    }

    /// Signalled once stdin reaches end of input.
    pub fn input_closed(&self) -> Arc<Notify> {
        Arc::clone(&self.input_closed)
    }
}

impl Default for StdinPcmDevice {
    fn default() -> Self {
        Self::new(PcmFormat::default())
    }
}

impl AudioDevice for StdinPcmDevice {
    type Session = PcmSession;

    async fn open(&mut self) -> Result<PcmSession, CaptureError> {
        if io::stdin().is_terminal() {
            return Err(CaptureError::Unsupported);
        }
        PcmSession::spawn(io::stdin(), self.format, Arc::clone(&self.input_closed))
    }
}

/// Bytes collected by a detached reader thread.
///
/// The reader is never joined: a read blocked on a silent producer must not
/// keep the process alive once the session is released.
pub struct PcmSession {
    format: PcmFormat,
    buffer: Arc<Mutex<Vec<u8>>>,
    stopped: Arc<AtomicBool>,
}

impl PcmSession {
    pub fn spawn<R>(
        source: R,
        format: PcmFormat,
        input_closed: Arc<Notify>,
    ) -> Result<Self, CaptureError>
    where
        R: Read + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let stopped = Arc::new(AtomicBool::new(false));

        let reader_buffer = Arc::clone(&buffer);
        let reader_stopped = Arc::clone(&stopped);
        thread::Builder::new()
            .name("sid-pcm-reader".to_string())
            .spawn(move || {
                read_until_closed(source, &reader_buffer, &reader_stopped);
                input_closed.notify_one();
            })
            .map_err(|error| CaptureError::Device(error.to_string()))?;

        Ok(Self {
            format,
            buffer,
            stopped,
        })
    }

    pub fn is_released(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn buffered_bytes(&self) -> usize {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl CaptureSession for PcmSession {
    async fn stop(&mut self) -> Result<EncodedAudio, CaptureError> {
        self.stopped.store(true, Ordering::SeqCst);
        let bytes = std::mem::take(
            &mut *self
                .buffer
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );

        let samples = pcm16_from_le_bytes(&bytes);
        if samples.is_empty() {
            return Ok(EncodedAudio::new("audio/wav", Vec::new()));
        }
        if let Ok(audio_ms) = pcm_duration_ms(samples.len(), self.format) {
            tracing::debug!(audio_ms, "Captured PCM from stdin");
        }

        EncodedAudio::wav_from_pcm16(&samples, self.format)
            .map_err(|error| CaptureError::Device(error.to_string()))
    }

    fn release(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

fn read_until_closed<R: Read>(mut source: R, buffer: &Mutex<Vec<u8>>, stopped: &AtomicBool) {
    let mut chunk = [0_u8; READ_CHUNK_BYTES];

    while !stopped.load(Ordering::SeqCst) {
        match source.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => {
                if stopped.load(Ordering::SeqCst) {
                    break;
                }
                buffer
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend_from_slice(&chunk[..read]);
            }
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => {
                tracing::warn!("Failed to read audio: {error}");
                break;
            }
        }
    }
}
