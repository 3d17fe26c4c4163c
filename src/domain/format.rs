//! Display formatting for prices and evaluation metrics.

/// Format a number with comma thousands separators and a fixed number of decimals.
///
/// `format_grouped(1234567.891, 2)` yields `"1,234,567.89"`.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(fixed.len() + digits.len() / 3 + 1);
    // Rounding can turn e.g. -0.001 into "0.00"; don't print "-0.00".
    if value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Format a price as a dollar amount, e.g. `$1,234,567.89`.
pub fn format_currency(value: f64) -> String {
    let grouped = format_grouped(value, 2);
    match grouped.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${grouped}"),
    }
}

/// Floor a raw model output at zero; negative prices are not meaningful.
pub fn clamp_price(raw: f64) -> f64 {
    // `f64::max` may keep the sign of a negative zero.
    if raw > 0.0 {
        raw
    } else {
        0.0
    }
}
