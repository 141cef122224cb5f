//! The journal session: every slice of state plus the timers that drive it.
//!
//! All handlers run to completion on one logical thread. Timed work (autosave,
//! delete settling, timer ticks) is explicit: callers ask for
//! [`Journal::next_deadline`] and call [`Journal::fire_due`] once it passes.

use std::time::Instant;

use chrono::TimeZone;

use crate::clock::{Clock, SystemClock};
use crate::error::CaptureError;
use crate::fonts::FontRotation;
use crate::models::{ClipId, Entry, EntryId, FontOption, InputMode, Settings, VoiceClip};
use crate::storage::{KeyValueStore, PersistenceGateway};
use crate::store::{
    group_by_day, AutosaveOutcome, DeadlineTimer, DeleteRequest, EntryStore, HistoryGroup,
};
use crate::timer::TIMER_TICK;
use crate::voice::{AudioDevice, CaptureState, VoicePipeline};
use crate::Result;

/// Summary of the timed work done by one [`Journal::fire_due`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FireOutcome {
    pub autosaves: Vec<AutosaveOutcome>,
    pub removed: Vec<EntryId>,
    pub ticks: u32,
}

impl FireOutcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.autosaves.is_empty() && self.removed.is_empty() && self.ticks == 0
    }
}

/// A journal backed by a key-value store, a clock and an audio device.
pub struct Journal<S: KeyValueStore, C: Clock, D: AudioDevice> {
    gateway: PersistenceGateway<S>,
    clock: C,
    settings: Settings,
    entries: EntryStore,
    voice: VoicePipeline<D>,
    fonts: FontRotation<'static>,
    ticker: DeadlineTimer,
}

impl<S: KeyValueStore, C: Clock, D: AudioDevice> Journal<S, C, D> {
    /// Load every slice from `store` and resume a running timer.
    pub fn open(store: S, clock: C, device: D) -> Self {
        let mut gateway = PersistenceGateway::new(store);
        let entries = gateway.load_entries();
        let clips = gateway.load_voice_clips();
        let settings = gateway.load_settings();
        tracing::debug!(
            entries = entries.len(),
            clips = clips.len(),
            "Journal loaded"
        );

        let mut ticker = DeadlineTimer::new();
        if settings.timer.is_running {
            ticker.arm(clock.now(), TIMER_TICK);
        }

        Self {
            gateway,
            clock,
            settings,
            entries: EntryStore::with_entries(entries),
            voice: VoicePipeline::with_clips(device, clips),
            fonts: FontRotation::default(),
            ticker,
        }
    }

    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn entries(&self) -> &[Entry] {
        self.entries.entries()
    }

    pub fn entry(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn draft(&self) -> &str {
        self.entries.draft()
    }

    pub const fn active_entry_id(&self) -> Option<EntryId> {
        self.entries.active_id()
    }

    pub const fn staged_delete(&self) -> Option<EntryId> {
        self.entries.staged_delete()
    }

    pub fn clips(&self) -> &[VoiceClip] {
        self.voice.clips()
    }

    pub fn capture_state(&self) -> CaptureState {
        self.voice.state()
    }

    /// Transient message from the last failed capture attempt.
    pub fn voice_message(&self) -> Option<String> {
        self.voice.last_error().map(CaptureError::user_message)
    }

    pub const fn clock(&self) -> &C {
        &self.clock
    }

    pub const fn store(&self) -> &S {
        self.gateway.store()
    }

    /// Entries grouped by local calendar day in `tz`, newest day first.
    pub fn history_groups<Tz: TimeZone>(&self, tz: &Tz) -> Vec<HistoryGroup<'_>> {
        group_by_day(self.entries.entries(), tz)
    }

    // ----- entries -----

    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        let now = self.clock.now();
        self.entries.set_draft_text(text, now);
    }

    /// Delete the last draft character. Does nothing while backspace is
    /// switched off in settings.
    pub fn backspace(&mut self) -> bool {
        if !self.settings.backspace_on {
            tracing::debug!("Backspace is off; draft left unchanged");
            return false;
        }
        let now = self.clock.now();
        self.entries.delete_backward(now)
    }

    /// Save the draft now and start a fresh one.
    pub fn commit_now(&mut self) -> Option<EntryId> {
        let written = self.entries.commit_now(self.clock.wall_now());
        if written.is_some() {
            self.persist_entries();
        }
        written
    }

    /// Stage an entry for deletion; see [`EntryStore::request_delete`].
    pub fn request_delete(&mut self, id: &EntryId) -> Result<DeleteRequest> {
        let now = self.clock.now();
        self.entries.request_delete(id, now)
    }

    pub fn select_for_editing(&mut self, id: &EntryId) -> Result<()> {
        let now = self.clock.now();
        self.entries.select_for_editing(id, now)
    }

    // ----- voice -----

    /// Start recording. Only allowed in voice mode.
    pub async fn start_capture(&mut self) -> std::result::Result<(), CaptureError> {
        if self.settings.mode != InputMode::Voice {
            return Err(CaptureError::NotInVoiceMode);
        }
        self.voice.start_capture(&self.clock).await
    }

    /// Stop recording and store the clip, if one was produced.
    pub async fn stop_capture(&mut self) -> std::result::Result<Option<ClipId>, CaptureError> {
        let stopped = self.voice.stop_capture(&self.clock).await?;
        if stopped.is_some() {
            self.persist_clips();
        }
        Ok(stopped)
    }

    pub fn delete_clip(&mut self, id: &ClipId) -> bool {
        let removed = self.voice.delete_clip(id);
        if removed {
            self.persist_clips();
        }
        removed
    }

    /// Switch input mode. Leaving voice mode stops an open capture first.
    pub async fn set_mode(&mut self, mode: InputMode) -> Option<ClipId> {
        if self.settings.mode == mode {
            return None;
        }

        let mut saved = None;
        if mode != InputMode::Voice && self.voice.state() == CaptureState::Recording {
            match self.stop_capture().await {
                Ok(clip) => saved = clip,
                Err(error) => tracing::warn!("Capture ended with an error on mode switch: {error}"),
            }
        }

        self.settings.mode = mode;
        self.persist_settings();
        saved
    }

    pub async fn toggle_mode(&mut self) -> InputMode {
        let next = match self.settings.mode {
            InputMode::Chat => InputMode::Voice,
            InputMode::Voice => InputMode::Chat,
        };
        self.set_mode(next).await;
        next
    }

    // ----- settings -----

    /// Choose a font option. `Random` takes the next pick from the rotation.
    pub fn select_font(&mut self, option: FontOption) {
        if option == FontOption::Random {
            let pick = self.fonts.next_random();
            self.settings.apply_random_font(&pick);
        } else {
            self.settings.apply_named_font(option);
            self.fonts.note_explicit_choice();
        }
        self.persist_settings();
    }

    pub fn cycle_font_size(&mut self) -> u32 {
        let size = self.settings.cycle_font_size();
        self.persist_settings();
        size
    }

    pub fn toggle_backspace(&mut self) -> bool {
        let on = self.settings.toggle_backspace();
        self.persist_settings();
        on
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        let dark = self.settings.toggle_dark_mode();
        self.persist_settings();
        dark
    }

    pub fn toggle_timer(&mut self) {
        self.settings.timer.toggle();
        self.sync_ticker();
        self.persist_settings();
    }

    pub fn reset_timer(&mut self) {
        self.settings.timer.reset();
        self.sync_ticker();
        self.persist_settings();
    }

    // ----- timed work -----

    /// Earliest pending deadline across autosave, delete settling and ticks.
    pub fn next_deadline(&self) -> Option<Instant> {
        earliest(self.entries.next_deadline(), self.ticker.deadline())
    }

    /// Earliest pending deadline, ignoring timer ticks.
    pub fn next_entry_deadline(&self) -> Option<Instant> {
        self.entries.next_deadline()
    }

    /// Run every handler whose deadline has passed, earliest first.
    pub fn fire_due(&mut self) -> FireOutcome {
        let now = self.clock.now();
        let mut outcome = FireOutcome::default();

        while let Some(due) = self.next_deadline().filter(|deadline| *deadline <= now) {
            if self.ticker.deadline() == Some(due) {
                self.fire_tick(due);
                outcome.ticks += 1;
                continue;
            }

            let polled = self.entries.poll(due, self.clock.wall_now());
            if polled.changed_entries() {
                self.persist_entries();
            }
            outcome.autosaves.extend(polled.autosave);
            outcome.removed.extend(polled.removed);
        }

        outcome
    }

    fn fire_tick(&mut self, due: Instant) {
        self.ticker.cancel();
        if self.settings.timer.tick() {
            self.persist_settings();
        }
        if self.settings.timer.is_running {
            self.ticker.arm(due, TIMER_TICK);
        } else {
            tracing::info!("Timer finished");
        }
    }

    fn sync_ticker(&mut self) {
        if self.settings.timer.is_running {
            if !self.ticker.is_armed() {
                self.ticker.arm(self.clock.now(), TIMER_TICK);
            }
        } else {
            self.ticker.cancel();
        }
    }

    fn persist_entries(&mut self) {
        self.gateway.save_entries(self.entries.entries());
    }

    fn persist_clips(&mut self) {
        self.gateway.save_voice_clips(self.voice.clips());
    }

    fn persist_settings(&mut self) {
        self.gateway.save_settings(&self.settings);
    }
}

impl<S: KeyValueStore, D: AudioDevice> Journal<S, SystemClock, D> {
    /// Sleep through pending autosave and delete deadlines until none remain.
    ///
    /// Timer ticks are left pending. Needs a clock that moves on its own, so it
    /// is only offered with [`SystemClock`].
    pub async fn run_until_idle(&mut self) -> FireOutcome {
        let mut total = FireOutcome::default();
        while let Some(deadline) = self.next_entry_deadline() {
            let wait = deadline.saturating_duration_since(self.clock.now());
            tokio::time::sleep(wait).await;
            let outcome = self.fire_due();
            total.autosaves.extend(outcome.autosaves);
            total.removed.extend(outcome.removed);
            total.ticks += outcome.ticks;
        }
        total
    }
}

fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}
