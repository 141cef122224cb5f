//! Load-on-start / save-on-change bridge between journal state and the store.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::KeyValueStore;
use crate::models::{Entry, Settings, VoiceClip};

pub const ENTRIES_KEY: &str = "sid-journal-entries";
pub const VOICE_CLIPS_KEY: &str = "sid-journal-voice-clips";
pub const SETTINGS_KEY: &str = "sid-journal-settings";

/// One independently persisted piece of state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    Entries,
    VoiceClips,
    Settings,
}

impl Slice {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Entries => ENTRIES_KEY,
            Self::VoiceClips => VOICE_CLIPS_KEY,
            Self::Settings => SETTINGS_KEY,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Entries => 0,
            Self::VoiceClips => 1,
            Self::Settings => 2,
        }
    }
}

/// Mirrors each slice to the store.
///
/// A slice must be loaded before it may be written; a write against unloaded
/// state would overwrite whatever was persisted before.
#[derive(Debug)]
pub struct PersistenceGateway<S> {
    store: S,
    loaded: [bool; 3],
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub const fn new(store: S) -> Self {
        Self {
            store,
            loaded: [false; 3],
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub const fn is_loaded(&self, slice: Slice) -> bool {
        self.loaded[slice.index()]
    }

    pub fn load_entries(&mut self) -> Vec<Entry> {
        self.load_slice(Slice::Entries)
    }

    pub fn load_voice_clips(&mut self) -> Vec<VoiceClip> {
        self.load_slice(Slice::VoiceClips)
    }

    /// Settings come back with the mode forced to `Chat`.
    pub fn load_settings(&mut self) -> Settings {
        self.load_slice::<Settings>(Slice::Settings).into_loaded()
    }

    pub fn save_entries(&mut self, entries: &[Entry]) -> bool {
        self.save_slice(Slice::Entries, &entries)
    }

    pub fn save_voice_clips(&mut self, clips: &[VoiceClip]) -> bool {
        self.save_slice(Slice::VoiceClips, &clips)
    }

    pub fn save_settings(&mut self, settings: &Settings) -> bool {
        self.save_slice(Slice::Settings, settings)
    }

    /// Read a slice, falling back to its default when absent or malformed.
    ///
    /// A malformed blob is cleared from the store so it is not read again.
    fn load_slice<T: DeserializeOwned + Default>(&mut self, slice: Slice) -> T {
        let key = slice.key();
        let value = match self.store.load(key) {
            Some(raw) if !raw.trim().is_empty() => match serde_json::from_str::<T>(&raw) {
                Ok(value) => value,
                Err(error) => {
                    tracing::warn!("Discarding corrupt stored data under {key}: {error}");
                    self.store.remove(key);
                    T::default()
                }
            },
            _ => T::default(),
        };
        self.loaded[slice.index()] = true;
        value
    }

    fn save_slice<T: Serialize + ?Sized>(&mut self, slice: Slice, value: &T) -> bool {
        let key = slice.key();
        if !self.is_loaded(slice) {
            tracing::warn!("Refusing to write {key} before it has been loaded");
            return false;
        }
        match serde_json::to_string(value) {
            Ok(raw) => {
                self.store.save(key, &raw);
                true
            }
            Err(error) => {
                tracing::warn!("Failed to serialize {key}: {error}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FontOption, InputMode};
    use crate::storage::MemoryStore;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn reopen(store: MemoryStore) -> PersistenceGateway<MemoryStore> {
        PersistenceGateway::new(store)
    }

    #[test]
    fn writes_before_load_are_refused() {
        let mut gateway = PersistenceGateway::new(MemoryStore::with_value(ENTRIES_KEY, "[]"));
        let entries = vec![Entry::new("early", Utc::now())];

        assert!(!gateway.save_entries(&entries));
        assert_eq!(gateway.store().load(ENTRIES_KEY).as_deref(), Some("[]"));

        gateway.load_entries();
        assert!(gateway.save_entries(&entries));
    }

    #[test]
    fn missing_keys_load_defaults() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        assert!(gateway.load_entries().is_empty());
        assert!(gateway.load_voice_clips().is_empty());
        assert_eq!(gateway.load_settings(), Settings::default());
        assert!(gateway.is_loaded(Slice::Entries));
        assert!(gateway.is_loaded(Slice::VoiceClips));
        assert!(gateway.is_loaded(Slice::Settings));
    }

    #[test]
    fn corrupt_blob_is_cleared_and_defaulted() {
        let mut gateway =
            PersistenceGateway::new(MemoryStore::with_value(VOICE_CLIPS_KEY, "{not json"));

        assert!(gateway.load_voice_clips().is_empty());
        assert!(!gateway.store().contains(VOICE_CLIPS_KEY));
        assert!(gateway.is_loaded(Slice::VoiceClips));
    }

    #[test]
    fn wrong_shape_counts_as_corrupt() {
        let mut gateway =
            PersistenceGateway::new(MemoryStore::with_value(ENTRIES_KEY, r#"{"text":"x"}"#));
        assert!(gateway.load_entries().is_empty());
        assert!(!gateway.store().contains(ENTRIES_KEY));
    }

    #[test]
    fn entries_round_trip_empty_and_populated() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        gateway.load_entries();
        gateway.save_entries(&[]);
        let mut reopened = reopen(gateway.into_inner());
        assert!(reopened.load_entries().is_empty());

        let entries = vec![
            Entry::new("newer", Utc::now()),
            Entry::new("older", Utc::now()),
        ];
        reopened.save_entries(&entries);
        let mut reopened = reopen(reopened.into_inner());
        assert_eq!(reopened.load_entries(), entries);
    }

    #[test]
    fn voice_clips_round_trip_empty_and_populated() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        gateway.load_voice_clips();
        assert!(gateway.save_voice_clips(&[]));
        assert_eq!(gateway.store().load(VOICE_CLIPS_KEY).as_deref(), Some("[]"));
        let mut reopened = reopen(gateway.into_inner());
        assert!(reopened.load_voice_clips().is_empty());

        let clips = vec![VoiceClip::new(
            Utc::now(),
            1_250,
            "data:audio/wav;base64,UklGRg==".to_string(),
        )];
        reopened.save_voice_clips(&clips);

        let mut reopened = reopen(reopened.into_inner());
        assert_eq!(reopened.load_voice_clips(), clips);
    }

    #[test]
    fn default_settings_round_trip() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        gateway.load_settings();
        assert!(gateway.save_settings(&Settings::default()));
        assert!(gateway.store().contains(SETTINGS_KEY));

        let mut reopened = reopen(gateway.into_inner());
        assert_eq!(reopened.load_settings(), Settings::default());
    }

    #[test]
    fn settings_round_trip_resets_mode() {
        let mut gateway = PersistenceGateway::new(MemoryStore::new());
        gateway.load_settings();
        let mut settings = Settings {
            font_size: 32,
            font_option: FontOption::Random,
            random_font_name: "Lora".to_string(),
            random_font_family: "Lora, Georgia, serif".to_string(),
            backspace_on: false,
            dark_mode: true,
            ..Settings::default()
        };
        settings.timer.remaining_seconds = 42;
        settings.timer.is_running = true;
        gateway.save_settings(&settings);

        let mut reopened = reopen(gateway.into_inner());
        assert_eq!(reopened.load_settings(), settings);

        settings.mode = InputMode::Voice;
        reopened.save_settings(&settings);
        let mut reopened = reopen(reopened.into_inner());
        assert_eq!(reopened.load_settings().mode, InputMode::Chat);
    }

    #[test]
    fn stored_settings_from_the_web_build_load() {
        let raw = r#"{"fontSize":22,"fontOption":"Serif","randomFontFamily":"Lato, Manrope, sans-serif","randomFontName":"","mode":"Voice","backspaceOn":true,"darkMode":true,"timerSeconds":600,"timerRunning":false}"#;
        let mut gateway = PersistenceGateway::new(MemoryStore::with_value(SETTINGS_KEY, raw));
        let settings = gateway.load_settings();

        assert_eq!(settings.font_size, 22);
        assert_eq!(settings.font_option, FontOption::Serif);
        assert_eq!(settings.mode, InputMode::Chat);
        assert_eq!(settings.timer.remaining_seconds, 600);
        assert!(settings.dark_mode);
    }
}
