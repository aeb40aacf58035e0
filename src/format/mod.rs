pub mod currency;
pub mod date;
pub mod terbilang;

pub use currency::{format_currency, format_number};
pub use date::format_long_date;
pub use terbilang::{amount_in_words, words_from_number};
