pub mod data_uri;
pub mod id_gen;
pub mod totals_cache;
pub mod upload_guard;
