//! Email history entries and the fixed four-slot projection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::ReportZone;
use crate::utils::dates::{DateWindow, epoch_millis};
use crate::utils::text;

/// Number of history slots on every report row.
pub const HISTORY_SLOTS: usize = 4;

/// One history entry from the remote `/history` listing.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub chronicle_date: Option<i64>,
    pub email_direction: String,
    pub id: String,
}

impl HistoryEntry {
    pub fn from_remote(raw: &Value) -> Self {
        Self {
            chronicle_date: raw.get("chronicleDate").and_then(epoch_millis),
            email_direction: text(raw.get("emailDirection")),
            id: text(raw.get("id")),
        }
    }
}

/// A rendered history slot; all fields empty for padding.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistorySlot {
    pub date: String,
    pub direction: String,
    #[serde(rename = "hisID")]
    pub his_id: String,
}

impl HistorySlot {
    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.direction.is_empty() && self.his_id.is_empty()
    }
}

/// Keep entries dated inside `window`, oldest first, rendered into exactly
/// [`HISTORY_SLOTS`] slots.
pub fn select_history(
    entries: &[HistoryEntry],
    window: DateWindow,
    zone: ReportZone,
) -> [HistorySlot; HISTORY_SLOTS] {
    let mut dated: Vec<(i64, &HistoryEntry)> = entries
        .iter()
        .filter_map(|entry| entry.chronicle_date.map(|ms| (ms, entry)))
        .filter(|(ms, _)| window.contains(*ms))
        .collect();
    dated.sort_by_key(|(ms, _)| *ms);

    let mut slots: [HistorySlot; HISTORY_SLOTS] = Default::default();
    for (slot, (ms, entry)) in slots.iter_mut().zip(dated) {
        *slot = HistorySlot {
            date: zone.format_date(&Value::from(ms)),
            direction: entry.email_direction.clone(),
            his_id: entry.id.clone(),
        };
    }
    slots
}
