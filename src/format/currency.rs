/// Separator between `Rp` and the digits, as `id-ID` currency formatting
/// emits it.
pub const RUPIAH_SEPARATOR: char = '\u{a0}';

fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

/// Dot-grouped digits, e.g. `5.000.000`. Negative values keep their sign.
pub fn format_number(n: i64) -> String {
    let sign = if n < 0 { "-" } else { "" };
    format!("{sign}{}", group_digits(n.unsigned_abs()))
}

/// Whole-Rupiah currency string: `Rp 5.000.000` (no-break space), never
/// with decimals. Negative amounts render as `-Rp 5.000`.
pub fn format_currency(n: i64) -> String {
    let sign = if n < 0 { "-" } else { "" };
    format!("{sign}Rp{RUPIAH_SEPARATOR}{}", group_digits(n.unsigned_abs()))
}
