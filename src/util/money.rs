//! Money formatting helpers
//!
//! Every artifact renders money with exactly two decimals so output is
//! byte-stable across runs and platforms. `format_grouped` adds thousands
//! separators for headline figures; it never consults the system locale.

/// Formats an amount with two decimals and no grouping.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Formats an amount with comma thousands separators and two decimals.
pub fn format_grouped(value: f64) -> String {
    let rendered = format!("{:.2}", value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some(parts) => parts,
        None => (rendered.as_str(), "00"),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}
