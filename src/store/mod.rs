pub mod sticky;
pub mod storage;

pub use sticky::StickyState;
pub use storage::{FileStorage, MemoryStorage, Storage};
