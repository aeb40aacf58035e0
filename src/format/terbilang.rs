//! Indonesian amount-in-words ("terbilang").

const WORDS: [&str; 12] = [
    "",
    "Satu",
    "Dua",
    "Tiga",
    "Empat",
    "Lima",
    "Enam",
    "Tujuh",
    "Delapan",
    "Sembilan",
    "Sepuluh",
    "Sebelas",
];

const RIBU: u64 = 1_000;
const JUTA: u64 = 1_000_000;
const MILYAR: u64 = 1_000_000_000;
/// Values from here on are not spelled out.
pub const CEILING: u64 = 1_000_000_000_000;

/// Each fragment carries its own leading space; only the caller trims.
fn spell(n: u64) -> String {
    match n {
        0 => String::new(),
        1..=11 => format!(" {}", WORDS[n as usize]),
        12..=19 => spell(n - 10) + " Belas",
        20..=99 => spell(n / 10) + " Puluh" + &spell(n % 10),
        100..=199 => " Seratus".to_string() + &spell(n - 100),
        200..=999 => spell(n / 100) + " Ratus" + &spell(n % 100),
        1_000..=1_999 => " Seribu".to_string() + &spell(n - RIBU),
        2_000..=999_999 => spell(n / RIBU) + " Ribu" + &spell(n % RIBU),
        1_000_000..=999_999_999 => spell(n / JUTA) + " Juta" + &spell(n % JUTA),
        1_000_000_000..=999_999_999_999 => spell(n / MILYAR) + " Milyar" + &spell(n % MILYAR),
        _ => String::new(),
    }
}

/// Spell a number in Indonesian words. The sign is dropped; zero and anything
/// at or beyond one trillion ([`CEILING`]) give an empty string.
pub fn words_from_number(n: i64) -> String {
    spell(n.unsigned_abs()).trim().to_string()
}

/// `"<words> Rupiah"`, as printed under the net income.
pub fn amount_in_words(n: i64) -> String {
    format!("{} Rupiah", words_from_number(n)).trim().to_string()
}
