use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NBSP: char = '\u{a0}';

fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Up to three fraction digits, trailing zeros dropped.
fn grouped_number(value: f64, thousands: char, decimal: char) -> String {
    let rounded = format!("{:.3}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && (int_part != "0" || !frac.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, thousands));
    if !frac.is_empty() {
        out.push(decimal);
        out.push_str(frac);
    }
    out
}

/// Subscription price in Uzbek notation: `150 000` (non-breaking space).
pub fn format_price(price: f64) -> String {
    grouped_number(price, NBSP, ',')
}

/// Transaction amount as sent by the backend (`"150000.00"`) -> `150,000`.
pub fn format_amount(amount: &str) -> String {
    match amount.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => grouped_number(value, ',', '.'),
        _ => amount.to_string(),
    }
}

/// `created_at` as `dd/mm/yyyy`; anything unparseable is shown as is.
pub fn format_date(created_at: &str) -> String {
    let date = DateTime::parse_from_rfc3339(created_at)
        .map(|dt| dt.date_naive())
        .or_else(|_| {
            NaiveDateTime::parse_from_str(created_at, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date())
        })
        .or_else(|_| NaiveDate::parse_from_str(created_at, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%d/%m/%Y").to_string(),
        Err(_) => created_at.to_string(),
    }
}
