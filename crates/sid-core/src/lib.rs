//! sid-core - Core library for sid
//!
//! This crate contains the journal models, the entry store with its autosave
//! and delete timers, the voice capture pipeline, font rotation, the countdown
//! timer and local persistence used by every sid interface.

pub mod clock;
pub mod error;
pub mod fonts;
pub mod journal;
pub mod models;
pub mod storage;
pub mod store;
pub mod timer;
pub mod util;
pub mod voice;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CaptureError, Error, Result};
pub use fonts::{FontChoice, FontRotation, RANDOM_FONTS};
pub use journal::{FireOutcome, Journal};
pub use models::{ClipId, Entry, EntryId, FontOption, InputMode, Settings, VoiceClip};
pub use storage::{FileStore, KeyValueStore, MemoryStore, PersistenceGateway};
pub use timer::{TimerState, DEFAULT_TIMER_SECONDS, TIMER_TICK};
pub use voice::{AudioDevice, CaptureSession, CaptureState, EncodedAudio};
