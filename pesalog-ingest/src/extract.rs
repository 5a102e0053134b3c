//! Field extraction for classified messages.
//!
//! Extraction never fails for a matched kind: a field that cannot be
//! parsed is left absent and the record is downgraded to `partial`.
//! Only a total classification miss produces an `unknown` record.

use chrono::{DateTime, Utc};
use pesalog_core::{
    ParseStatus, ParsedTransaction, TimestampSource, TransactionType, normalize_msisdn,
    parse_amount, parse_bank_date, parse_mpesa_datetime,
};

use crate::classifier::detect_provider;
use crate::patterns;

/// Build the output record for a classified message.
pub fn extract(
    kind: TransactionType,
    text: &str,
    received_at: Option<DateTime<Utc>>,
) -> ParsedTransaction {
    if kind == TransactionType::Unknown {
        return ParsedTransaction::unknown(text);
    }

    let mut record = ParsedTransaction::unknown(text);
    record.transaction_type = kind;
    record.provider = detect_provider(text);

    let mut complete = match kind {
        TransactionType::Received => extract_received(&mut record, text),
        TransactionType::Sent => extract_sent(&mut record, text),
        TransactionType::PaybillPayment => extract_paybill(&mut record, text),
        TransactionType::TillPayment => extract_till(&mut record, text),
        TransactionType::Withdrawal => extract_withdrawal(&mut record, text),
        TransactionType::AirtimePurchase => extract_airtime(&mut record, text),
        TransactionType::Reversal => extract_reversal(&mut record, text),
        TransactionType::BankDeposit | TransactionType::BankWithdrawal => {
            extract_bank_movement(kind, &mut record, text)
        }
        TransactionType::BankTransfer => extract_bank_transfer(&mut record, text),
        TransactionType::Unknown => unreachable!("handled above"),
    };

    // Reference code. Reversals set theirs above (the code of the
    // transaction being undone), so the leading code is not re-read.
    match kind {
        TransactionType::Reversal => {}
        TransactionType::BankDeposit
        | TransactionType::BankWithdrawal
        | TransactionType::BankTransfer => {
            record.reference_code = patterns::BANK_REF
                .captures(text)
                .map(|c| c["ref"].to_string());
            complete &= record.reference_code.is_some();
        }
        _ => {
            record.reference_code = patterns::REF_CODE
                .captures(text)
                .map(|c| c["ref"].to_uppercase());
            complete &= record.reference_code.is_some();
        }
    }

    // Timestamp: embedded date wins; the receipt time is a flagged
    // fallback; neither present downgrades the record.
    let embedded = match kind {
        TransactionType::BankDeposit
        | TransactionType::BankWithdrawal
        | TransactionType::BankTransfer => patterns::BANK_DATE
            .captures(text)
            .and_then(|c| parse_bank_date(&c["date"])),
        _ => patterns::MPESA_DATETIME.captures(text).and_then(|c| {
            let time = c.name("time").map(|m| m.as_str());
            parse_mpesa_datetime(&c["date"], time)
        }),
    };
    match (embedded, received_at) {
        (Some(ts), _) => {
            record.occurred_at = Some(ts);
            record.time_source = TimestampSource::Message;
        }
        (None, Some(ts)) => {
            record.occurred_at = Some(ts);
            record.time_source = TimestampSource::Receipt;
        }
        (None, None) => {
            record.time_source = TimestampSource::Missing;
            complete = false;
        }
    }

    // Balance and cost are optional in some variants; absence alone is
    // not a downgrade.
    record.balance_after = patterns::BALANCE
        .captures(text)
        .and_then(|c| parse_amount(&c["bal"]));
    if let Some(caps) = patterns::COST.captures(text) {
        if let Some(cost) = parse_amount(&caps["cost"]) {
            record.transaction_cost = cost;
        }
    }

    record.parse_status = if complete {
        ParseStatus::Full
    } else {
        ParseStatus::Partial
    };
    record
}

fn extract_received(record: &mut ParsedTransaction, text: &str) -> bool {
    let Some(caps) = patterns::RECEIVED.captures(text) else {
        sweep(record, text);
        return false;
    };
    record.amount = parse_amount(&caps["amt"]);
    record.counterparty_name = Some(caps["name"].trim().to_string());
    record.counterparty_phone = normalize_msisdn(&caps["phone"]);
    record.amount.is_some() && record.counterparty_phone.is_some()
}

fn extract_sent(record: &mut ParsedTransaction, text: &str) -> bool {
    let Some(caps) = patterns::SENT.captures(text) else {
        sweep(record, text);
        return false;
    };
    record.amount = parse_amount(&caps["amt"]);
    record.counterparty_name = Some(caps["name"].trim().to_string());
    record.counterparty_phone = normalize_msisdn(&caps["phone"]);
    record.amount.is_some() && record.counterparty_phone.is_some()
}

fn extract_paybill(record: &mut ParsedTransaction, text: &str) -> bool {
    let Some(caps) = patterns::PAYBILL.captures(text) else {
        sweep(record, text);
        return false;
    };
    record.amount = parse_amount(&caps["amt"]);
    record.counterparty_name = Some(caps["name"].trim().to_string());
    record.account_number = Some(caps["acct"].to_string());
    record.amount.is_some()
}

fn extract_till(record: &mut ParsedTransaction, text: &str) -> bool {
    let Some(caps) = patterns::TILL.captures(text) else {
        sweep(record, text);
        return false;
    };
    record.amount = parse_amount(&caps["amt"]);
    record.counterparty_name = Some(caps["name"].trim().to_string());
    record.account_number = Some(caps["acct"].to_string());
    record.amount.is_some()
}

fn extract_withdrawal(record: &mut ParsedTransaction, text: &str) -> bool {
    let Some(caps) = patterns::WITHDRAWAL.captures(text) else {
        sweep(record, text);
        return false;
    };
    record.amount = parse_amount(&caps["amt"]);
    record.counterparty_name = Some(caps["name"].trim().to_string());
    record.counterparty_phone = normalize_msisdn(&caps["phone"]);
    record.amount.is_some() && record.counterparty_phone.is_some()
}

fn extract_airtime(record: &mut ParsedTransaction, text: &str) -> bool {
    let Some(caps) = patterns::AIRTIME.captures(text) else {
        sweep(record, text);
        return false;
    };
    record.amount = parse_amount(&caps["amt"]);
    record.counterparty_phone = normalize_msisdn(&caps["phone"]);
    record.amount.is_some() && record.counterparty_phone.is_some()
}

fn extract_reversal(record: &mut ParsedTransaction, text: &str) -> bool {
    record.reference_code = patterns::REVERSAL
        .captures(text)
        .map(|c| c["orig"].to_uppercase());
    record.amount = patterns::REVERSAL_CREDIT
        .captures(text)
        .or_else(|| patterns::ANY_AMOUNT.captures(text))
        .and_then(|c| parse_amount(&c["amt"]));
    record.reference_code.is_some() && record.amount.is_some()
}

fn extract_bank_movement(
    kind: TransactionType,
    record: &mut ParsedTransaction,
    text: &str,
) -> bool {
    let pattern = if kind == TransactionType::BankDeposit {
        &patterns::BANK_DEPOSIT
    } else {
        &patterns::BANK_WITHDRAWAL
    };
    let Some(caps) = pattern.captures(text) else {
        sweep(record, text);
        return false;
    };
    record.amount = parse_amount(&caps["amt"]);
    record.counterparty_name = Some(caps["bank"].trim().to_string());
    record.account_number = Some(caps["acct"].to_string());
    record.amount.is_some()
}

fn extract_bank_transfer(record: &mut ParsedTransaction, text: &str) -> bool {
    let Some(caps) = patterns::BANK_TRANSFER.captures(text) else {
        sweep(record, text);
        return false;
    };
    record.amount = parse_amount(&caps["amt"]);
    record.counterparty_name = Some(caps["name"].trim().to_string());
    record.account_number = patterns::BANK_TRANSFER_ACC
        .captures(text)
        .map(|c| c["acct"].to_string());
    record.amount.is_some()
}

/// Best-effort sweep when the kind-specific shape fails: keep whatever
/// generic tokens are still recognizable.
fn sweep(record: &mut ParsedTransaction, text: &str) {
    record.amount = patterns::ANY_AMOUNT
        .captures(text)
        .and_then(|c| parse_amount(&c["amt"]));
    record.counterparty_phone = patterns::ANY_PHONE
        .find(text)
        .and_then(|m| normalize_msisdn(m.as_str()));
}
