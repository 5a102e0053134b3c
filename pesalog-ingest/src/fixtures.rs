//! Golden-fixture loading for the synthetic SMS dataset.
//!
//! Column layout:
//! id,sms_text,transaction_type,amount,reference,date,balance,sender_recipient,phone

use anyhow::{Context, Result};
use pesalog_core::TransactionType;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// One row of the golden dataset: the raw SMS plus the fields a correct
/// parse is expected to recover.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenRecord {
    pub id: u32,
    pub sms_text: String,
    pub transaction_type: String,
    pub amount: Decimal,
    pub reference: String,
    pub date: String,
    pub balance: Decimal,
    pub sender_recipient: String,
    pub phone: String,
}

impl GoldenRecord {
    /// Golden label as a typed kind.
    pub fn expected_type(&self) -> TransactionType {
        match self.transaction_type.as_str() {
            "received" => TransactionType::Received,
            "sent" => TransactionType::Sent,
            "paybill_payment" => TransactionType::PaybillPayment,
            "till_payment" => TransactionType::TillPayment,
            "withdrawal" => TransactionType::Withdrawal,
            "airtime_purchase" => TransactionType::AirtimePurchase,
            "reversal" => TransactionType::Reversal,
            "bank_deposit" => TransactionType::BankDeposit,
            "bank_withdrawal" => TransactionType::BankWithdrawal,
            "bank_transfer" => TransactionType::BankTransfer,
            _ => TransactionType::Unknown,
        }
    }
}

/// Load a golden CSV, one record per row.
pub fn load_golden_csv(path: impl AsRef<Path>) -> Result<Vec<GoldenRecord>> {
    let mut reader = csv::Reader::from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: GoldenRecord =
            result.with_context(|| format!("reading {}", path.as_ref().display()))?;
        rows.push(row);
    }
    Ok(rows)
}
