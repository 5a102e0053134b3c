//! Kenyan MSISDN normalization.

/// Normalize a phone capture to a canonical digit string with the 254
/// country code, e.g. "0712 345 678" -> "254712345678".
///
/// Accepts local (leading 0) and international (leading 254 / +254)
/// forms. Anything that fails the length or prefix check is dropped
/// rather than passed through malformed.
pub fn normalize_msisdn(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    let canonical = if digits.len() == 10 && digits.starts_with('0') {
        format!("254{}", &digits[1..])
    } else if digits.len() == 12 && digits.starts_with("254") {
        digits
    } else {
        return None;
    };

    // Kenyan mobile ranges: 2547xx (Safaricom/Airtel classic) and 2541xx.
    if canonical.starts_with("2547") || canonical.starts_with("2541") {
        Some(canonical)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_and_international_agree() {
        assert_eq!(
            normalize_msisdn("0712345678"),
            normalize_msisdn("254712345678")
        );
        assert_eq!(normalize_msisdn("0712345678").unwrap(), "254712345678");
    }

    #[test]
    fn test_plus_prefix_and_spacing() {
        assert_eq!(normalize_msisdn("+254 712 345 678").unwrap(), "254712345678");
        assert_eq!(normalize_msisdn("0110 123456").unwrap(), "254110123456");
    }

    #[test]
    fn test_malformed_dropped() {
        assert_eq!(normalize_msisdn("12345"), None);
        assert_eq!(normalize_msisdn("0812345678"), None); // not a Kenyan mobile range
        assert_eq!(normalize_msisdn("2547123456789"), None); // too long
        assert_eq!(normalize_msisdn(""), None);
    }
}
