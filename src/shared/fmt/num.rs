//! Number formatting for summary cards.
//!
//! Prices always carry two decimals; thousands are comma-separated.

/// Placeholder shown when a value is not known yet.
pub const UNKNOWN: &str = "--";

/// Insert thousands separators into the integer part of a formatted number.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let grouped = integer
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `50000.0` → `"50,000.00"`; `None` → `"--"`.
pub fn format_usd(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() => group_thousands(&format!("{:.2}", p)),
        _ => UNKNOWN.to_string(),
    }
}

/// `2.5` → `"↑ 2.50%"`, `-1.2` → `"↓ 1.20%"`, `None` → `"--"`.
pub fn format_change(change_pct: Option<f64>) -> String {
    match change_pct {
        Some(c) if c.is_finite() => {
            let arrow = if c >= 0.0 { '↑' } else { '↓' };
            format!("{} {:.2}%", arrow, c.abs())
        }
        _ => UNKNOWN.to_string(),
    }
}
