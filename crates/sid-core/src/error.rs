//! Error types for sid-core

use thiserror::Error;

/// Result type alias using sid-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sid-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry or clip not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Voice capture could not start or finish
    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Failures raised by the audio-capture device.
///
/// These are surfaced to the user as a short transient message; the journal
/// stays usable for text entry whatever happens here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The platform exposes no audio-capture capability.
    #[error("voice not supported")]
    Unsupported,

    /// The user declined access or the device is unavailable.
    #[error("mic permission needed")]
    PermissionDenied(String),

    /// A capture session is already open.
    #[error("already recording")]
    AlreadyRecording,

    /// Capture was requested while the journal is in chat mode.
    #[error("switch to voice mode to record")]
    NotInVoiceMode,

    /// The device failed while recording or encoding.
    #[error("recording failed: {0}")]
    Device(String),
}

impl CaptureError {
    /// Short message suitable for a transient status line.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
