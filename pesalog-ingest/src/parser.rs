//! Single-message parse entry point.

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use pesalog_core::ParsedTransaction;

use crate::classifier::classify;
use crate::extract::extract;

/// Parse one SMS body into a transaction record.
///
/// Unrecognized formats degrade to an `unknown` record rather than
/// failing; the only hard error is input with nothing to classify.
/// `received_at` is used for `occurred_at` when the text itself carries
/// no date.
pub fn parse_message(text: &str, received_at: Option<DateTime<Utc>>) -> Result<ParsedTransaction> {
    if text.trim().is_empty() {
        bail!("SMS text is empty");
    }
    let kind = classify(text);
    Ok(extract(kind, text, received_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pesalog_core::{ParseStatus, Provider, TimestampSource, TransactionType};
    use rust_decimal_macros::dec;

    #[test]
    fn test_received_full_parse() {
        let text = "RB12KLM Confirmed. You have received Ksh5,000.00 from JOHN DOE 254712345678 on 18/11/2025 at 10:30 AM. New M-PESA balance is Ksh15,000.00. Transaction cost, Ksh0.00.";
        let record = parse_message(text, None).unwrap();

        assert_eq!(record.transaction_type, TransactionType::Received);
        assert_eq!(record.parse_status, ParseStatus::Full);
        assert_eq!(record.provider, Provider::Mpesa);
        assert_eq!(record.amount, Some(dec!(5000.00)));
        assert_eq!(record.counterparty_name.as_deref(), Some("JOHN DOE"));
        assert_eq!(record.counterparty_phone.as_deref(), Some("254712345678"));
        assert_eq!(record.reference_code.as_deref(), Some("RB12KLM"));
        assert_eq!(record.balance_after, Some(dec!(15000.00)));
        assert_eq!(record.transaction_cost, dec!(0.00));
        assert_eq!(record.time_source, TimestampSource::Message);
        assert_eq!(
            record.occurred_at.unwrap().to_rfc3339(),
            "2025-11-18T07:30:00+00:00"
        );
        assert_eq!(record.raw_text, text);
    }

    #[test]
    fn test_sent_full_parse() {
        let text = "QC34XYZ Confirmed. Ksh2,500.00 sent to JANE WANJIRU 254723456789 on 18/11/2025 at 2:15 PM. New M-PESA balance is Ksh12,475.00. Transaction cost, Ksh25.00.";
        let record = parse_message(text, None).unwrap();

        assert_eq!(record.transaction_type, TransactionType::Sent);
        assert_eq!(record.parse_status, ParseStatus::Full);
        assert_eq!(record.amount, Some(dec!(2500.00)));
        assert_eq!(record.counterparty_name.as_deref(), Some("JANE WANJIRU"));
        assert_eq!(record.counterparty_phone.as_deref(), Some("254723456789"));
        assert_eq!(record.transaction_cost, dec!(25.00));
        assert_eq!(record.balance_after, Some(dec!(12475.00)));
    }

    #[test]
    fn test_paybill_full_parse() {
        let text = "RF45ABC Confirmed. You have paid Ksh1,200.00 to KENYA POWER for account 123456 on 19/11/2025 at 9:05 AM. New balance is Ksh11,275.00. Transaction cost, Ksh0.00.";
        let record = parse_message(text, None).unwrap();

        assert_eq!(record.transaction_type, TransactionType::PaybillPayment);
        assert_eq!(record.parse_status, ParseStatus::Full);
        assert_eq!(record.amount, Some(dec!(1200.00)));
        assert_eq!(record.counterparty_name.as_deref(), Some("KENYA POWER"));
        assert_eq!(record.account_number.as_deref(), Some("123456"));
        assert_eq!(record.reference_code.as_deref(), Some("RF45ABC"));
    }

    #[test]
    fn test_till_full_parse() {
        let text = "TG67QWE Confirmed. Ksh850.00 paid to JAVA HOUSE Till Number 832909 on 19/11/2025 at 1:05 PM. New balance is Ksh10,425.00. Transaction cost, Ksh0.00.";
        let record = parse_message(text, None).unwrap();

        assert_eq!(record.transaction_type, TransactionType::TillPayment);
        assert_eq!(record.parse_status, ParseStatus::Full);
        assert_eq!(record.counterparty_name.as_deref(), Some("JAVA HOUSE"));
        assert_eq!(record.account_number.as_deref(), Some("832909"));
    }

    #[test]
    fn test_withdrawal_full_parse() {
        let text = "HJ89RTY Confirmed. You have withdrawn Ksh3,000.00 from M-PESA Agent PETER OTIENO 254745678901 on 20/11/2025 at 4:45 PM. New balance is Ksh7,389.00. Transaction cost, Ksh36.00.";
        let record = parse_message(text, None).unwrap();

        assert_eq!(record.transaction_type, TransactionType::Withdrawal);
        assert_eq!(record.parse_status, ParseStatus::Full);
        assert_eq!(record.counterparty_name.as_deref(), Some("PETER OTIENO"));
        assert_eq!(record.counterparty_phone.as_deref(), Some("254745678901"));
        assert_eq!(record.transaction_cost, dec!(36.00));
    }

    #[test]
    fn test_airtime_full_parse() {
        let text = "KL23UIO Confirmed. You bought Ksh100.00 airtime for 254712345678 on 21/11/2025 at 8:00 AM. New balance is Ksh7,289.00. Transaction cost, Ksh0.00.";
        let record = parse_message(text, None).unwrap();

        assert_eq!(record.transaction_type, TransactionType::AirtimePurchase);
        assert_eq!(record.parse_status, ParseStatus::Full);
        assert_eq!(record.amount, Some(dec!(100.00)));
        assert_eq!(record.counterparty_phone.as_deref(), Some("254712345678"));
        assert_eq!(record.counterparty_name, None);
    }

    #[test]
    fn test_reversal_links_original_reference() {
        let text = "MN45PAS Confirmed. Transaction QC34XYZ has been reversed. Ksh2,500.00 is credited to your M-PESA account on 21/11/2025 at 11:20 AM. New M-PESA balance is Ksh9,789.00.";
        let record = parse_message(text, None).unwrap();

        assert_eq!(record.transaction_type, TransactionType::Reversal);
        assert_eq!(record.parse_status, ParseStatus::Full);
        // The reversed transaction's code, not the notice's own leading code.
        assert_eq!(record.reference_code.as_deref(), Some("QC34XYZ"));
        assert_eq!(record.amount, Some(dec!(2500.00)));
        assert_eq!(record.balance_after, Some(dec!(9789.00)));
    }

    #[test]
    fn test_bank_deposit_full_parse() {
        let text = "KCB: Acc XXXX5678 credited with KES 10,000.00 on 22-Nov-2025. Balance: KES 45,000.00. Ref: 1234567890";
        let record = parse_message(text, None).unwrap();

        assert_eq!(record.transaction_type, TransactionType::BankDeposit);
        assert_eq!(record.parse_status, ParseStatus::Full);
        assert_eq!(record.provider, Provider::Bank);
        assert_eq!(record.amount, Some(dec!(10000.00)));
        assert_eq!(record.counterparty_name.as_deref(), Some("KCB"));
        assert_eq!(record.account_number.as_deref(), Some("XXXX5678"));
        assert_eq!(record.reference_code.as_deref(), Some("1234567890"));
        assert_eq!(record.balance_after, Some(dec!(45000.00)));
    }

    #[test]
    fn test_bank_withdrawal_full_parse() {
        let text = "Equity Bank: Acc XXXX5678 debited KES 5,000.00 on 23-Nov-2025. Balance: KES 40,000.00. Ref: 2345678901";
        let record = parse_message(text, None).unwrap();

        assert_eq!(record.transaction_type, TransactionType::BankWithdrawal);
        assert_eq!(record.parse_status, ParseStatus::Full);
        assert_eq!(record.counterparty_name.as_deref(), Some("Equity Bank"));
        assert_eq!(record.amount, Some(dec!(5000.00)));
    }

    #[test]
    fn test_bank_transfer_full_parse() {
        let text = "NCBA: Transfer of KES 7,500.00 to MARY WAMBUI successful. Acc XXXX5678 Balance: KES 32,500.00. Ref: 3456789012 on 24-Nov-2025";
        let record = parse_message(text, None).unwrap();

        assert_eq!(record.transaction_type, TransactionType::BankTransfer);
        assert_eq!(record.parse_status, ParseStatus::Full);
        assert_eq!(record.counterparty_name.as_deref(), Some("MARY WAMBUI"));
        assert_eq!(
            record.occurred_at.unwrap().to_rfc3339(),
            "2025-11-23T21:00:00+00:00"
        );
    }

    #[test]
    fn test_unknown_fallback_keeps_raw_text_only() {
        let record = parse_message("Hello, how are you?", None).unwrap();
        assert_eq!(record.transaction_type, TransactionType::Unknown);
        assert_eq!(record.parse_status, ParseStatus::Unknown);
        assert_eq!(record.amount, None);
        assert_eq!(record.counterparty_name, None);
        assert_eq!(record.reference_code, None);
        assert_eq!(record.occurred_at, None);
        assert_eq!(record.raw_text, "Hello, how are you?");
    }

    #[test]
    fn test_empty_input_is_a_hard_error() {
        assert!(parse_message("", None).is_err());
        assert!(parse_message("   \n ", None).is_err());
    }

    #[test]
    fn test_idempotent_reparse() {
        let text = "RB12KLM Confirmed. You have received Ksh5,000.00 from JOHN DOE 254712345678 on 18/11/2025 at 10:30 AM. New M-PESA balance is Ksh15,000.00. Transaction cost, Ksh0.00.";
        let first = parse_message(text, None).unwrap();
        let second = parse_message(text, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_date_falls_back_to_receipt_time() {
        let received = Utc.with_ymd_and_hms(2025, 11, 18, 7, 31, 0).unwrap();
        let text = "RB12KLM Confirmed. You have received Ksh5,000.00 from JOHN DOE 254712345678. New M-PESA balance is Ksh15,000.00.";
        let record = parse_message(text, Some(received)).unwrap();

        assert_eq!(record.transaction_type, TransactionType::Received);
        assert_eq!(record.occurred_at, Some(received));
        assert_eq!(record.time_source, TimestampSource::Receipt);
        // A flagged fallback is not a parse defect.
        assert_eq!(record.parse_status, ParseStatus::Full);
    }

    #[test]
    fn test_missing_date_without_receipt_is_partial() {
        let text = "RB12KLM Confirmed. You have received Ksh5,000.00 from JOHN DOE 254712345678. New M-PESA balance is Ksh15,000.00.";
        let record = parse_message(text, None).unwrap();

        assert_eq!(record.occurred_at, None);
        assert_eq!(record.time_source, TimestampSource::Missing);
        assert_eq!(record.parse_status, ParseStatus::Partial);
    }

    #[test]
    fn test_local_phone_format_normalized() {
        let text = "RB12KLM Confirmed. You have received Ksh5,000.00 from JOHN DOE 0712345678 on 18/11/2025 at 10:30 AM. New M-PESA balance is Ksh15,000.00.";
        let record = parse_message(text, None).unwrap();
        assert_eq!(record.counterparty_phone.as_deref(), Some("254712345678"));
    }
}
