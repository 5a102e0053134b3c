//! Compiled-once pattern tables for the supported notification formats.
//!
//! Expected shapes:
//!   RB12KLM Confirmed. You have received Ksh5,000.00 from JOHN KAMAU 254712345678
//!   on 18/11/2025 at 10:30 AM. New M-PESA balance is Ksh15,000.00. Transaction cost, Ksh0.00.
//!
//!   KCB: Acc XXXX5678 credited with KES 10,000.00 on 18-Nov-2025.
//!   Balance: KES 45,000.00. Ref: 1234567890

use std::sync::LazyLock;

use pesalog_core::TransactionType;
use regex::Regex;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("pattern compiles")
}

// --- Kind-specific core patterns ---

pub static RECEIVED: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)you\s+have\s+received\s+ksh\s*(?P<amt>[\d,]+(?:\.\d{1,2})?)\s+from\s+(?P<name>.+?)\s+(?P<phone>(?:\+?254|0)\d{9})\b")
});

pub static SENT: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)ksh\s*(?P<amt>[\d,]+(?:\.\d{1,2})?)\s+sent\s+to\s+(?P<name>.+?)\s+(?P<phone>(?:\+?254|0)\d{9})\b")
});

pub static PAYBILL: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)you\s+have\s+paid\s+ksh\s*(?P<amt>[\d,]+(?:\.\d{1,2})?)\s+to\s+(?P<name>.+?)\s+for\s+account\s+(?P<acct>[A-Za-z0-9-]+)")
});

pub static TILL: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)ksh\s*(?P<amt>[\d,]+(?:\.\d{1,2})?)\s+paid\s+to\s+(?P<name>.+?)\s+till\s+number\s+(?P<acct>\d+)")
});

pub static WITHDRAWAL: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)you\s+have\s+withdrawn\s+ksh\s*(?P<amt>[\d,]+(?:\.\d{1,2})?)\s+from\s+(?:m-pesa\s+)?agent\s+(?P<name>.+?)\s+(?P<phone>(?:\+?254|0)\d{9})\b")
});

pub static AIRTIME: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)bought\s+ksh\s*(?P<amt>[\d,]+(?:\.\d{1,2})?)\s+(?:of\s+)?airtime\s+for\s+(?P<phone>(?:\+?254|0)\d{9})\b")
});

pub static REVERSAL: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)transaction\s+(?P<orig>[A-Z0-9]{6,12})\s+has\s+been\s+reversed")
});

pub static REVERSAL_CREDIT: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)ksh\s*(?P<amt>[\d,]+(?:\.\d{1,2})?)\s+is\s+credited")
});

pub static BANK_DEPOSIT: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)^\s*(?P<bank>[^:]+):\s*acc\s+(?P<acct>\S+)\s+credited\s+with\s+kes\s*(?P<amt>[\d,]+(?:\.\d{1,2})?)")
});

pub static BANK_WITHDRAWAL: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)^\s*(?P<bank>[^:]+):\s*acc\s+(?P<acct>\S+)\s+debited\s+(?:with\s+)?kes\s*(?P<amt>[\d,]+(?:\.\d{1,2})?)")
});

pub static BANK_TRANSFER: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)^\s*(?P<bank>[^:]+):\s*transfer\s+of\s+kes\s*(?P<amt>[\d,]+(?:\.\d{1,2})?)\s+to\s+(?P<name>.+?)\s+successful\b")
});

pub static BANK_TRANSFER_ACC: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\bacc\s+(?P<acct>\S+)\s+balance"));

// --- Shared field patterns ---

/// Leading M-Pesa reference code, e.g. "RB12KLM Confirmed."
pub static REF_CODE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)^\s*(?P<ref>[A-Z0-9]{6,12})\s+confirmed\b"));

pub static MPESA_DATETIME: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)\bon\s+(?P<date>\d{1,2}/\d{1,2}/\d{4})(?:\s+at\s+(?P<time>\d{1,2}:\d{2}\s*[AP]\.?M\.?))?")
});

pub static BANK_DATE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\bon\s+(?P<date>\d{1,2}-[A-Za-z]{3}-\d{4})"));

pub static BALANCE: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)(?:new\s+(?:m-pesa\s+)?balance\s+is\s+ksh\s*|balance:\s*kes\s*)(?P<bal>[\d,]+(?:\.\d{1,2})?)")
});

pub static COST: LazyLock<Regex> = LazyLock::new(|| {
    re(r"(?i)transaction\s+cost,?\s*ksh\s*(?P<cost>[\d,]+(?:\.\d{1,2})?)")
});

pub static BANK_REF: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\bref:\s*(?P<ref>[A-Z0-9]+)"));

/// First currency token anywhere, for best-effort sweeps.
pub static ANY_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\b(?:ksh|kes)\s*(?P<amt>[\d,]+(?:\.\d{1,2})?)"));

pub static ANY_PHONE: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?:\+?254|0)\d{9}\b"));

// --- Classification anchors ---

/// Ordered anchor table: first entry whose anchors are all present wins.
/// "reversed" is checked first because reversal notices otherwise
/// resemble the transaction they undo; till/paybill come before the
/// generic sent/received shapes.
pub const ANCHORS: &[(TransactionType, &[&str])] = &[
    (TransactionType::Reversal, &["reversed"]),
    (
        TransactionType::TillPayment,
        &["confirmed", "paid to", "till number"],
    ),
    (
        TransactionType::PaybillPayment,
        &["confirmed", "you have paid", "for account"],
    ),
    (
        TransactionType::Withdrawal,
        &["confirmed", "you have withdrawn"],
    ),
    (
        TransactionType::AirtimePurchase,
        &["confirmed", "airtime for"],
    ),
    (
        TransactionType::Received,
        &["confirmed", "you have received", "from"],
    ),
    (TransactionType::Sent, &["confirmed", "sent to"]),
    (TransactionType::BankDeposit, &["credited with kes"]),
    (TransactionType::BankWithdrawal, &["debited kes"]),
    (
        TransactionType::BankTransfer,
        &["transfer of kes", "successful"],
    ),
];

// --- Provider indicators ---

pub const MPESA_INDICATORS: &[&str] = &["m-pesa", "mpesa", "safaricom"];
pub const AIRTEL_INDICATORS: &[&str] = &["airtel money", "airtelmoney", "airtel"];
pub const BANK_INDICATORS: &[&str] = &["credited with kes", "debited kes", "transfer of kes"];
