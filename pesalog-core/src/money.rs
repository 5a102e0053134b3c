//! Exact-decimal parsing for amounts printed as "Ksh5,000.00" / "KES 1,200.50".

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a monetary capture into an exact decimal.
///
/// Strips an optional currency prefix and thousands separators. Signed or
/// otherwise non-numeric captures are rejected so the caller can omit the
/// field instead of propagating a bad value.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let mut s = raw.trim();

    let lower = s.to_ascii_lowercase();
    for prefix in ["kshs", "ksh", "kes"] {
        if lower.starts_with(prefix) {
            s = s[prefix.len()..].trim_start();
            break;
        }
    }

    let cleaned: String = s.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() || cleaned.starts_with('+') || cleaned.starts_with('-') {
        return None;
    }

    let amount = Decimal::from_str(&cleaned).ok()?;
    if amount.is_sign_negative() {
        return None;
    }
    Some(amount)
}

/// Format an amount the way the notifications print it: "Ksh5,000.00".
/// Negative values (net positions, not message amounts) keep their sign.
pub fn format_kes(amount: Decimal) -> String {
    if amount.is_sign_negative() {
        return format!("-{}", format_kes(-amount));
    }
    let fixed = format!("{:.2}", amount);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("Ksh{}.{}", grouped, frac_part)
}
