pub mod export;
pub mod format;
pub mod images;
pub mod line_items;
pub mod preview;
pub mod record;
pub mod saved_slips;
