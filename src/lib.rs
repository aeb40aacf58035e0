pub mod api;
pub mod config;
pub mod docs;
pub mod error;
pub mod export;
pub mod format;
pub mod model;
pub mod render;
pub mod routes;
pub mod slips;
pub mod state;
pub mod store;
pub mod totals;
pub mod utils;
