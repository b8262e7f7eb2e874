//! Display strings for dashboard figures.
//!
//! Missing figures render as [`NOT_AVAILABLE`].

pub const NOT_AVAILABLE: &str = "N/A";

/// `$3.20t`, `$412.50b`, `$8.10m`, otherwise a grouped dollar amount.
pub fn compact_currency(value: Option<f64>) -> String {
    let Some(value) = value.filter(|value| value.is_finite()) else {
        return NOT_AVAILABLE.to_owned();
    };
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    if magnitude >= 1e12 {
        format!("{sign}${:.2}t", magnitude / 1e12)
    } else if magnitude >= 1e9 {
        format!("{sign}${:.2}b", magnitude / 1e9)
    } else if magnitude >= 1e6 {
        format!("{sign}${:.2}m", magnitude / 1e6)
    } else {
        format!("{sign}${}", grouped_decimal(magnitude))
    }
}

/// Short axis label: `$1.2b`, `$450.0m`, `$12k`, otherwise two decimals.
pub fn axis_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("{sign}${:.1}b", magnitude / 1e9)
    } else if magnitude >= 1e6 {
        format!("{sign}${:.1}m", magnitude / 1e6)
    } else if magnitude >= 1e3 {
        format!("{sign}${:.0}k", magnitude / 1e3)
    } else {
        format!("{sign}${magnitude:.2}")
    }
}

/// Ratio rendered as a percentage: `0.1234` → `12.34%`.
pub fn percent(ratio: Option<f64>) -> String {
    match ratio.filter(|value| value.is_finite()) {
        Some(ratio) => format!("{:.2}%", ratio * 100.0),
        None => NOT_AVAILABLE.to_owned(),
    }
}

/// Already-scaled percentage with an explicit sign: `+1.25%`, `-0.40%`.
pub fn signed_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{value:.2}%")
    } else {
        format!("{value:.2}%")
    }
}

pub fn decimal(value: Option<f64>) -> String {
    match value.filter(|value| value.is_finite()) {
        Some(value) => format!("{value:.2}"),
        None => NOT_AVAILABLE.to_owned(),
    }
}

/// Rounded to a whole number with thousands separators: `1,234,567`.
pub fn grouped_integer(value: f64) -> String {
    let rounded = value.round();
    let digits = group_digits(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Grouped integer part with up to two decimals, trailing zeros trimmed.
fn grouped_decimal(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        group_digits(whole)
    } else {
        format!("{}.{fraction}", group_digits(whole))
    }
}

fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
