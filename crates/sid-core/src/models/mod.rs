//! Data models for sid

mod entry;
mod settings;
mod voice_clip;

pub use entry::{Entry, EntryId};
pub use settings::{FontOption, InputMode, Settings, FONT_SIZES};
pub use voice_clip::{ClipId, VoiceClip, MIN_CLIP_DURATION_MS};
