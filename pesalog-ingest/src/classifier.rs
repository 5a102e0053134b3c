//! Kind and provider classification over raw notification text.

use pesalog_core::{Provider, TransactionType};

use crate::patterns::{AIRTEL_INDICATORS, ANCHORS, BANK_INDICATORS, MPESA_INDICATORS};

/// Determine which transaction kind, if any, the text matches.
///
/// Pure function of the input. Anchors are tried in a fixed priority
/// order (see `patterns::ANCHORS`); a miss on every entry is `Unknown`.
pub fn classify(text: &str) -> TransactionType {
    let t = text.to_lowercase();
    for (kind, anchors) in ANCHORS {
        if anchors.iter().all(|anchor| t.contains(anchor)) {
            return *kind;
        }
    }
    TransactionType::Unknown
}

/// Detect the service provider from indicator keywords, independent of
/// the transaction kind.
///
/// Paybill/till notices never name M-PESA outright, so a leading
/// "Confirmed" together with the Ksh currency marker counts as M-Pesa.
pub fn detect_provider(text: &str) -> Provider {
    let t = text.to_lowercase();

    if AIRTEL_INDICATORS.iter().any(|i| t.contains(i)) {
        return Provider::AirtelMoney;
    }
    if MPESA_INDICATORS.iter().any(|i| t.contains(i))
        || (t.contains("confirmed") && t.contains("ksh"))
    {
        return Provider::Mpesa;
    }
    if BANK_INDICATORS.iter().any(|i| t.contains(i)) {
        return Provider::Bank;
    }
    Provider::Unknown
}
