pub mod image_slot;
pub mod line_item;
pub mod salary_record;
pub mod saved_slip;

pub use image_slot::ImageSlot;
pub use line_item::{LineItem, LineItemKind, LineItemPatch};
pub use salary_record::{RecordPatch, SalaryRecord};
pub use saved_slip::SavedSlip;
