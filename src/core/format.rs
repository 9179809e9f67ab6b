//! Display helpers for whole-unit currency amounts, en-US grouping.

pub fn currency_symbol(currency_code: &str) -> Option<&'static str> {
    match currency_code.to_ascii_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Rounds to whole units. Non-finite amounts render as `-`.
pub fn format_currency(amount: f64, currency_code: &str) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = group_thousands(rounded.abs());
    match currency_symbol(currency_code) {
        Some(symbol) => format!("{sign}{symbol}{digits}"),
        None => format!("{sign}{} {digits}", currency_code.to_ascii_uppercase()),
    }
}

pub fn format_number(amount: f64, fraction_digits: usize) -> String {
    if !amount.is_finite() {
        return "-".to_string();
    }
    let text = format!("{:.*}", fraction_digits, amount.abs());
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction.trim_end_matches('0'))),
        None => (text.as_str(), None),
    };
    let whole = whole.parse::<f64>().map(group_thousands).unwrap_or_default();
    let sign = if amount < 0.0 && text.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(fraction) if !fraction.is_empty() => format!("{sign}{whole}.{fraction}"),
        _ => format!("{sign}{whole}"),
    }
}

pub fn format_multiplier(multiplier: f64) -> String {
    format!("{multiplier:.2}x")
}

fn group_thousands(whole: f64) -> String {
    let raw = format!("{whole:.0}");
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
