//! In-memory journal state: entries, the draft and their timers.

mod debounce;
mod entries;
mod history;

pub use debounce::DeadlineTimer;
pub use entries::{
    AutosaveOutcome, DeleteRequest, EntryStore, PollOutcome, AUTOSAVE_DEBOUNCE,
    DELETE_SETTLE_DELAY,
};
pub use history::{group_by_day, HistoryGroup};
