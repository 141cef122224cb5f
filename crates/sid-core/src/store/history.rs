//! Day-grouped history view over the entry collection.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};

use crate::models::Entry;

/// Entries created on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryGroup<'a> {
    /// Local calendar day
    pub day: NaiveDate,
    /// Short display label, e.g. `Oct 19`
    pub label: String,
    /// Entries in collection order (newest first)
    pub entries: Vec<&'a Entry>,
}

impl HistoryGroup<'_> {
    /// Sortable `YYYY-MM-DD` key.
    #[must_use]
    pub fn key(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }
}

/// Partition entries by local calendar day in `tz`, newest day first.
///
/// Within a day the entries keep their order in `entries`.
pub fn group_by_day<'a, Tz: TimeZone>(entries: &'a [Entry], tz: &Tz) -> Vec<HistoryGroup<'a>> {
    let mut days: BTreeMap<NaiveDate, Vec<&'a Entry>> = BTreeMap::new();
    for entry in entries {
        let day = entry.created_at.with_timezone(tz).date_naive();
        days.entry(day).or_default().push(entry);
    }

    days.into_iter()
        .rev()
        .map(|(day, entries)| HistoryGroup {
            day,
            label: day.format("%b %-d").to_string(),
            entries,
        })
        .collect()
}
