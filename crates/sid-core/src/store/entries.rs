//! Entry store: draft buffer, debounced autosave and staged deletion.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use super::DeadlineTimer;
use crate::models::{Entry, EntryId};
use crate::util::normalize_draft;
use crate::{Error, Result};

/// Quiet period after the last draft change before autosave runs.
pub const AUTOSAVE_DEBOUNCE: Duration = Duration::from_millis(350);

/// Delay between staging a delete and removing the entry.
pub const DELETE_SETTLE_DELAY: Duration = Duration::from_millis(780);

/// What an autosave did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveOutcome {
    /// A new entry was prepended and became active.
    Created(EntryId),
    /// The active entry's text was replaced.
    Updated(EntryId),
    /// The active entry already held the trimmed draft.
    Unchanged,
    /// The draft was empty.
    Skipped,
}

impl AutosaveOutcome {
    /// Whether the entry collection was mutated.
    #[must_use]
    pub const fn changed_entries(self) -> bool {
        matches!(self, Self::Created(_) | Self::Updated(_))
    }
}

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRequest {
    /// The entry will be removed once the settle delay passes.
    Staged,
    /// Another delete is still settling; this request was dropped.
    Ignored,
}

/// Timed work the store performed during [`EntryStore::poll`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollOutcome {
    pub autosave: Option<AutosaveOutcome>,
    pub removed: Option<EntryId>,
}

impl PollOutcome {
    #[must_use]
    pub fn changed_entries(&self) -> bool {
        self.removed.is_some() || self.autosave.is_some_and(AutosaveOutcome::changed_entries)
    }
}

/// Ordered (newest-first) collection of entries plus the composing state.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
    draft: String,
    active: Option<EntryId>,
    autosave: DeadlineTimer,
    staged_delete: Option<EntryId>,
    settle: DeadlineTimer,
}

impl EntryStore {
    /// Store over previously persisted entries, with an empty draft.
    #[must_use]
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == *id)
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// The entry ongoing edits merge into, if any.
    #[must_use]
    pub const fn active_id(&self) -> Option<EntryId> {
        self.active
    }

    /// The entry waiting out the settle delay, if any.
    #[must_use]
    pub const fn staged_delete(&self) -> Option<EntryId> {
        self.staged_delete
    }

    /// Replace the draft and restart the autosave debounce.
    ///
    /// A whitespace-only draft cancels the pending autosave instead; autosave
    /// never deletes.
    pub fn set_draft_text(&mut self, text: impl Into<String>, now: Instant) {
        self.draft = text.into();
        if normalize_draft(&self.draft).is_some() {
            self.autosave.arm(now, AUTOSAVE_DEBOUNCE);
        } else {
            self.autosave.cancel();
        }
    }

    /// Drop the last character of the draft, restarting the debounce like any
    /// other edit. Returns `false` when the draft is already empty.
    pub fn delete_backward(&mut self, now: Instant) -> bool {
        let mut text = std::mem::take(&mut self.draft);
        let removed = text.pop().is_some();
        self.set_draft_text(text, now);
        removed
    }

    /// Save the draft immediately and start a fresh one.
    ///
    /// Returns the id of the entry written, if any. The active pointer and the
    /// draft are cleared whether or not anything was saved.
    pub fn commit_now(&mut self, created_at: DateTime<Utc>) -> Option<EntryId> {
        let written = normalize_draft(&self.draft).map(str::to_owned).map(|text| {
            if let Some(entry) = self.active_entry_mut() {
                entry.text = text;
                entry.id
            } else {
                let entry = Entry::new(text, created_at);
                let id = entry.id;
                self.entries.insert(0, entry);
                id
            }
        });

        self.clear_draft();
        tracing::debug!(?written, "Committed draft");
        written
    }

    /// Stage an entry for removal after [`DELETE_SETTLE_DELAY`].
    ///
    /// Only one delete may be settling at a time; further requests are ignored
    /// until it completes.
    pub fn request_delete(&mut self, id: &EntryId, now: Instant) -> Result<DeleteRequest> {
        if self.staged_delete.is_some() {
            tracing::debug!(%id, "Delete already staged, ignoring request");
            return Ok(DeleteRequest::Ignored);
        }
        if self.get(id).is_none() {
            return Err(Error::NotFound(id.to_string()));
        }

        self.staged_delete = Some(*id);
        self.settle.arm(now, DELETE_SETTLE_DELAY);
        tracing::debug!(%id, "Staged entry delete");
        Ok(DeleteRequest::Staged)
    }

    /// Load an entry into the draft and make it the active entry.
    pub fn select_for_editing(&mut self, id: &EntryId, now: Instant) -> Result<()> {
        let text = self
            .get(id)
            .map(|entry| entry.text.clone())
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        self.active = Some(*id);
        self.set_draft_text(text, now);
        Ok(())
    }

    /// Earliest pending deadline (autosave or settle).
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.autosave.deadline(), self.settle.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Run every timer whose deadline has passed, earliest first.
    pub fn poll(&mut self, now: Instant, wall: DateTime<Utc>) -> PollOutcome {
        let mut outcome = PollOutcome::default();

        let settle_first = match (self.autosave.deadline(), self.settle.deadline()) {
            (Some(autosave), Some(settle)) => settle < autosave,
            _ => true,
        };

        if settle_first {
            outcome.removed = self.fire_settle(now);
            outcome.autosave = self.fire_autosave(now, wall);
        } else {
            outcome.autosave = self.fire_autosave(now, wall);
            outcome.removed = self.fire_settle(now);
        }

        outcome
    }

    fn fire_autosave(&mut self, now: Instant, wall: DateTime<Utc>) -> Option<AutosaveOutcome> {
        self.autosave
            .take_if_due(now)
            .then(|| self.autosave_draft(wall))
    }

    fn fire_settle(&mut self, now: Instant) -> Option<EntryId> {
        if !self.settle.take_if_due(now) {
            return None;
        }
        let id = self.staged_delete.take()?;
        self.remove(&id);
        Some(id)
    }

    fn autosave_draft(&mut self, created_at: DateTime<Utc>) -> AutosaveOutcome {
        let Some(trimmed) = normalize_draft(&self.draft).map(str::to_owned) else {
            return AutosaveOutcome::Skipped;
        };

        let outcome = match self.active {
            Some(active) => match self.active_entry_mut() {
                Some(entry) if entry.text != trimmed => {
                    entry.text = trimmed;
                    AutosaveOutcome::Updated(active)
                }
                _ => AutosaveOutcome::Unchanged,
            },
            None => {
                let entry = Entry::new(trimmed, created_at);
                let id = entry.id;
                self.entries.insert(0, entry);
                self.active = Some(id);
                AutosaveOutcome::Created(id)
            }
        };

        tracing::debug!(?outcome, "Autosaved draft");
        outcome
    }

    fn remove(&mut self, id: &EntryId) {
        self.entries.retain(|entry| entry.id != *id);
        if self.active == Some(*id) {
            self.clear_draft();
        }
        tracing::info!(%id, "Deleted entry");
    }

    fn clear_draft(&mut self) {
        self.draft.clear();
        self.active = None;
        self.autosave.cancel();
    }

    fn active_entry_mut(&mut self) -> Option<&mut Entry> {
        let active = self.active?;
        self.entries.iter_mut().find(|entry| entry.id == active)
    }
}
