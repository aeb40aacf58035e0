//! Saved-slip list: snapshots of the live record kept for later recall.

use uuid::Uuid;

use crate::model::{SalaryRecord, SavedSlip};

/// Explicit answer to "unsaved edits / this entry will be lost, continue?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum SlipOutcome<T> {
    Done(T),
    Cancelled,
    NotFound,
}

pub fn slip_title(record: &SalaryRecord) -> String {
    let name = record.employee_name.trim();
    let period = record.period.trim();
    format!(
        "{} - {}",
        if name.is_empty() { "Tanpa Nama" } else { name },
        if period.is_empty() { "Tanpa Periode" } else { period }
    )
}

/// Snapshot `record` at `timestamp_ms` and put it first in the list.
pub fn save(list: &mut Vec<SavedSlip>, record: &SalaryRecord, timestamp_ms: i64) -> SavedSlip {
    let slip = SavedSlip {
        id: Uuid::new_v4().to_string(),
        title: slip_title(record),
        timestamp: timestamp_ms,
        data: record.clone(),
    };
    list.insert(0, slip.clone());
    slip
}

/// Copy of the snapshot's record, to replace the live one with. The list is
/// left as is.
pub fn load(list: &[SavedSlip], id: &str, confirmation: Confirmation) -> SlipOutcome<SalaryRecord> {
    let Some(slip) = list.iter().find(|s| s.id == id) else {
        return SlipOutcome::NotFound;
    };
    match confirmation {
        Confirmation::Confirmed => SlipOutcome::Done(slip.data.clone()),
        Confirmation::Declined => SlipOutcome::Cancelled,
    }
}

/// Remove exactly the entry with `id`; the others keep their order.
pub fn delete(list: &mut Vec<SavedSlip>, id: &str, confirmation: Confirmation) -> SlipOutcome<SavedSlip> {
    let Some(pos) = list.iter().position(|s| s.id == id) else {
        return SlipOutcome::NotFound;
    };
    match confirmation {
        Confirmation::Confirmed => SlipOutcome::Done(list.remove(pos)),
        Confirmation::Declined => SlipOutcome::Cancelled,
    }
}
