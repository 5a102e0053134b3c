//! Normalized output of the SMS parsers (provider-agnostic)

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Closed set of recognized transaction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Received,
    Sent,
    PaybillPayment,
    TillPayment,
    Withdrawal,
    AirtimePurchase,
    Reversal,
    BankDeposit,
    BankWithdrawal,
    BankTransfer,
    Unknown,
}

impl TransactionType {
    /// All kinds in classifier priority order, `Unknown` last.
    pub const ALL: [TransactionType; 11] = [
        TransactionType::Reversal,
        TransactionType::TillPayment,
        TransactionType::PaybillPayment,
        TransactionType::Withdrawal,
        TransactionType::AirtimePurchase,
        TransactionType::Received,
        TransactionType::Sent,
        TransactionType::BankDeposit,
        TransactionType::BankWithdrawal,
        TransactionType::BankTransfer,
        TransactionType::Unknown,
    ];

    /// Stable snake_case label, matching the serde tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Received => "received",
            TransactionType::Sent => "sent",
            TransactionType::PaybillPayment => "paybill_payment",
            TransactionType::TillPayment => "till_payment",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::AirtimePurchase => "airtime_purchase",
            TransactionType::Reversal => "reversal",
            TransactionType::BankDeposit => "bank_deposit",
            TransactionType::BankWithdrawal => "bank_withdrawal",
            TransactionType::BankTransfer => "bank_transfer",
            TransactionType::Unknown => "unknown",
        }
    }

    /// Funds moving into the account.
    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            TransactionType::Received | TransactionType::Reversal | TransactionType::BankDeposit
        )
    }

    /// Funds moving out of the account.
    pub fn is_debit(&self) -> bool {
        !self.is_credit() && *self != TransactionType::Unknown
    }
}

/// Mobile-money service provider detected from indicator keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Mpesa,
    AirtelMoney,
    Bank,
    Unknown,
}

/// How much of the message the extractor accounted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStatus {
    /// Kind matched and every expected field extracted.
    Full,
    /// Kind matched but one or more expected fields could not be parsed.
    Partial,
    /// No pattern's anchors were satisfied.
    Unknown,
}

impl ParseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseStatus::Full => "full",
            ParseStatus::Partial => "partial",
            ParseStatus::Unknown => "unknown",
        }
    }
}

/// Where `occurred_at` came from, so callers can tell authoritative
/// message timestamps from inferred ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampSource {
    /// Parsed from the date/time embedded in the message text.
    Message,
    /// Fallback to the receipt timestamp supplied by the caller.
    Receipt,
    /// Neither the message nor the caller provided a usable time.
    Missing,
}

/// A single parsed mobile-money or bank notification.
///
/// Created by one parse call, immutable afterwards. Irregularities are
/// absorbed into `parse_status` rather than surfaced as errors; only
/// empty input fails a parse outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    pub transaction_type: TransactionType,
    pub provider: Provider,
    /// Non-negative, currency-exact (KES). `None` only for `unknown`
    /// records or partial records whose amount capture failed.
    pub amount: Option<Decimal>,
    /// Sender / recipient / merchant / agent name as printed.
    pub counterparty_name: Option<String>,
    /// Canonical digit string with country code, e.g. "254712345678".
    pub counterparty_phone: Option<String>,
    /// Paybill account, till number, or masked bank account.
    pub account_number: Option<String>,
    /// Unique alphanumeric transaction code. For reversals this is the
    /// code of the transaction being reversed.
    pub reference_code: Option<String>,
    /// Zero when the message states no cost.
    pub transaction_cost: Decimal,
    pub balance_after: Option<Decimal>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub time_source: TimestampSource,
    pub parse_status: ParseStatus,
    /// Original input, retained for audit.
    pub raw_text: String,
}

impl ParsedTransaction {
    /// Record for a message that matched no known pattern. Everything
    /// except the raw text stays absent.
    pub fn unknown(raw_text: impl Into<String>) -> Self {
        Self {
            transaction_type: TransactionType::Unknown,
            provider: Provider::Unknown,
            amount: None,
            counterparty_name: None,
            counterparty_phone: None,
            account_number: None,
            reference_code: None,
            transaction_cost: Decimal::ZERO,
            balance_after: None,
            occurred_at: None,
            time_source: TimestampSource::Missing,
            parse_status: ParseStatus::Unknown,
            raw_text: raw_text.into(),
        }
    }

    /// Returns true unless the message fell through to `unknown`.
    pub fn is_recognized(&self) -> bool {
        self.transaction_type != TransactionType::Unknown
    }

    /// One-line human summary for CLI reports.
    pub fn describe(&self) -> String {
        let amount = self
            .amount
            .map(crate::money::format_kes)
            .unwrap_or_else(|| "?".to_string());
        match &self.counterparty_name {
            Some(name) => format!("{} {} | {}", self.transaction_type.as_str(), amount, name),
            None => format!("{} {}", self.transaction_type.as_str(), amount),
        }
    }
}
