//! pesalog-core: shared record types and normalizers for mobile-money SMS parsing.

pub mod money;
pub mod phone;
pub mod time;
pub mod transaction;

pub use money::{format_kes, parse_amount};
pub use phone::normalize_msisdn;
pub use time::{parse_bank_date, parse_mpesa_datetime};
pub use transaction::{
    ParseStatus, ParsedTransaction, Provider, TimestampSource, TransactionType,
};
