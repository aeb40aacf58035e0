//! Application-state container shared with every handler through
//! `web::Data`. The live record and the saved list sit behind one lock, so
//! there is a single writer at a time.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::export::{DocumentExporter, ExportTracker};
use crate::model::{ImageSlot, LineItem, LineItemKind, LineItemPatch, RecordPatch, SalaryRecord, SavedSlip};
use crate::slips::{self, Confirmation, SlipOutcome};
use crate::store::{StickyState, Storage};
use crate::utils::id_gen::IdGenerator;
use crate::utils::upload_guard::{UploadGuard, UploadTicket};

pub struct Session {
    record: StickyState<SalaryRecord>,
    saved: StickyState<Vec<SavedSlip>>,
}

impl Session {
    pub fn open(storage: Arc<dyn Storage>, record_key: &str, saved_key: &str) -> Self {
        let record = StickyState::load_with(
            storage.clone(),
            record_key,
            SalaryRecord::default(),
            SalaryRecord::decode_stored,
        );
        let saved = StickyState::load_with(storage, saved_key, Vec::<SavedSlip>::new(), |_, stored| {
            SavedSlip::decode_list(stored)
        });

        info!(
            record_key,
            saved_key,
            saved_slips = saved.get().len(),
            "Session state loaded"
        );

        Self { record, saved }
    }

    pub fn record(&self) -> &SalaryRecord {
        self.record.get()
    }

    pub fn saved(&self) -> &[SavedSlip] {
        self.saved.get()
    }

    pub fn replace_record(&mut self, record: SalaryRecord) {
        self.record.set(record);
    }

    pub fn patch_record(&mut self, patch: &RecordPatch) -> SalaryRecord {
        self.record.update(|r| {
            patch.apply(r);
            r.clone()
        })
    }

    pub fn add_item(&mut self, kind: LineItemKind, ids: &IdGenerator) -> LineItem {
        self.record.update(|r| {
            let items = r.items_mut(kind);
            let mut id = ids.next_id();
            while items.iter().any(|i| i.id == id) {
                id = ids.next_id();
            }
            let item = LineItem::new(id, kind.default_name(), 0);
            items.push(item.clone());
            item
        })
    }

    pub fn update_item(&mut self, kind: LineItemKind, id: &str, patch: &LineItemPatch) -> Result<LineItem, AppError> {
        self.record.try_update(|r| {
            let item = r
                .items_mut(kind)
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| item_not_found(kind, id))?;
            patch.apply(item);
            Ok(item.clone())
        })
    }

    pub fn remove_item(&mut self, kind: LineItemKind, id: &str) -> Result<LineItem, AppError> {
        self.record.try_update(|r| {
            let items = r.items_mut(kind);
            let pos = items
                .iter()
                .position(|i| i.id == id)
                .ok_or_else(|| item_not_found(kind, id))?;
            Ok(items.remove(pos))
        })
    }

    pub fn set_image(&mut self, slot: ImageSlot, data_uri: Option<String>) {
        self.record.update(|r| r.set_image(slot, data_uri));
    }

    /// Snapshot the live record. Only the saved list changes.
    pub fn save_slip(&mut self, timestamp_ms: i64) -> SavedSlip {
        let record = self.record.get();
        self.saved.update(|list| slips::save(list, record, timestamp_ms))
    }

    /// Replace the live record with a saved snapshot. Only the live record
    /// changes; the record being replaced is not saved.
    pub fn load_slip(&mut self, id: &str, confirmation: Confirmation) -> SlipOutcome<SalaryRecord> {
        let outcome = slips::load(self.saved.get(), id, confirmation);
        if let SlipOutcome::Done(data) = &outcome {
            self.record.set(data.clone());
        }
        outcome
    }

    /// Only a confirmed delete of an existing slip writes the list.
    pub fn delete_slip(&mut self, id: &str, confirmation: Confirmation) -> SlipOutcome<SavedSlip> {
        self.saved
            .try_update(|list| match slips::delete(list, id, confirmation) {
                SlipOutcome::Done(removed) => Ok(removed),
                skipped => Err(skipped),
            })
            .map_or_else(|skipped| skipped, SlipOutcome::Done)
    }
}

fn item_not_found(kind: LineItemKind, id: &str) -> AppError {
    AppError::NotFound(format!("No {kind} item with id {id}"))
}

pub struct AppState {
    session: Mutex<Session>,
    pub ids: IdGenerator,
    pub uploads: UploadGuard,
    pub export: Arc<ExportTracker>,
    pub exporter: Arc<dyn DocumentExporter>,
    pub export_delay: Duration,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, config: &Config, exporter: Arc<dyn DocumentExporter>) -> Self {
        Self {
            session: Mutex::new(Session::open(storage, &config.record_key, &config.saved_slips_key)),
            ids: IdGenerator::new(),
            uploads: UploadGuard::new(),
            export: Arc::new(ExportTracker::new(config.export_cooldown)),
            exporter,
            export_delay: config.export_delay,
        }
    }

    pub fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store an encoded image unless a newer upload or a clear for the same
    /// slot started after `ticket` was taken. The check runs under the
    /// session lock.
    pub fn commit_upload(&self, ticket: UploadTicket, data_uri: String) -> Result<(), AppError> {
        let mut session = self.session();
        if !self.uploads.is_current(&ticket) {
            warn!(slot = %ticket.slot, "Discarding superseded image upload");
            return Err(AppError::Conflict(format!(
                "A newer {} upload replaced this one",
                ticket.slot
            )));
        }
        session.set_image(ticket.slot, Some(data_uri));
        Ok(())
    }

    /// Remove the slot's image and supersede any upload still in flight.
    pub fn clear_image(&self, slot: ImageSlot) {
        let mut session = self.session();
        self.uploads.invalidate(slot);
        session.set_image(slot, None);
    }
}
