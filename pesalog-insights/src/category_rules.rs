//! Deterministic category rules for parsed transactions.
//!
//! No model calls needed — kind checks plus merchant keywords cover the
//! Kenyan SME corpus.

use pesalog_core::{ParsedTransaction, TransactionType};
use serde::{Deserialize, Serialize};

/// Spending/income categories for Kenyan SME reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Utilities,
    Fuel,
    Groceries,
    Restaurant,
    Transport,
    Entertainment,
    Airtime,
    CashWithdrawal,
    PersonalTransfer,
    Income,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Utilities => "utilities",
            Category::Fuel => "fuel",
            Category::Groceries => "groceries",
            Category::Restaurant => "restaurant",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Airtime => "airtime",
            Category::CashWithdrawal => "cash_withdrawal",
            Category::PersonalTransfer => "personal_transfer",
            Category::Income => "income",
            Category::Other => "other",
        }
    }
}

/// Merchant keyword table for the Kenyan market. Matched against the
/// uppercased counterparty name; first hit wins.
const MERCHANT_RULES: &[(&str, Category)] = &[
    // Utilities
    ("KENYA POWER", Category::Utilities),
    ("KPLC", Category::Utilities),
    ("NAIROBI WATER", Category::Utilities),
    ("KENGEN", Category::Utilities),
    // Fuel
    ("SHELL", Category::Fuel),
    ("TOTAL", Category::Fuel),
    ("RUBIS", Category::Fuel),
    ("KENOL", Category::Fuel),
    // Groceries
    ("NAIVAS", Category::Groceries),
    ("CARREFOUR", Category::Groceries),
    ("CHANDARANA", Category::Groceries),
    ("QUICKMART", Category::Groceries),
    ("TUSKYS", Category::Groceries),
    ("UCHUMI", Category::Groceries),
    ("CLEANSHELF", Category::Groceries),
    // Restaurants
    ("JAVA", Category::Restaurant),
    ("ARTCAFFE", Category::Restaurant),
    ("KFC", Category::Restaurant),
    ("DOMINOS", Category::Restaurant),
    ("PIZZA INN", Category::Restaurant),
    // Transport
    ("UBER", Category::Transport),
    ("BOLT", Category::Transport),
    ("LITTLE CAB", Category::Transport),
    // Entertainment
    ("IMAX", Category::Entertainment),
    ("CENTURY CINEMAX", Category::Entertainment),
    // Airtime resellers
    ("SAFARICOM", Category::Airtime),
    ("AIRTEL", Category::Airtime),
];

/// Deterministically categorize a parsed transaction.
/// Priority: transaction kind > merchant keywords > Other.
pub fn categorize(record: &ParsedTransaction) -> Category {
    match record.transaction_type {
        TransactionType::Received | TransactionType::BankDeposit | TransactionType::Reversal => {
            return Category::Income;
        }
        TransactionType::Withdrawal | TransactionType::BankWithdrawal => {
            return Category::CashWithdrawal;
        }
        TransactionType::AirtimePurchase => return Category::Airtime,
        TransactionType::Sent | TransactionType::BankTransfer => {
            return Category::PersonalTransfer;
        }
        TransactionType::PaybillPayment
        | TransactionType::TillPayment
        | TransactionType::Unknown => {}
    }

    if let Some(name) = &record.counterparty_name {
        let name = name.to_uppercase();
        for (keyword, category) in MERCHANT_RULES {
            if name.contains(keyword) {
                return *category;
            }
        }
    }

    Category::Other
}
