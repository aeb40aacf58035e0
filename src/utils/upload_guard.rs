use std::sync::atomic::{AtomicU64, Ordering};

use crate::model::ImageSlot;

/// Identifies one upload into one image slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    pub slot: ImageSlot,
    seq: u64,
}

/// Per-slot sequence numbers. Starting an upload (or clearing the slot)
/// supersedes every ticket handed out before it for that slot.
#[derive(Debug, Default)]
pub struct UploadGuard {
    latest: [AtomicU64; 3],
}

impl UploadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, slot: ImageSlot) -> UploadTicket {
        let seq = self.latest[slot.index()].fetch_add(1, Ordering::AcqRel) + 1;
        UploadTicket { slot, seq }
    }

    /// Supersede pending uploads without starting a new one.
    pub fn invalidate(&self, slot: ImageSlot) {
        self.latest[slot.index()].fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_current(&self, ticket: &UploadTicket) -> bool {
        self.latest[ticket.slot.index()].load(Ordering::Acquire) == ticket.seq
    }
}
