//! Cash-flow aggregation over parsed transactions.

use chrono::{DateTime, Utc};
use pesalog_core::ParsedTransaction;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use std::collections::HashMap;

use crate::category_rules::{Category, categorize};

/// Per-category slice of the expense side.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub total: Decimal,
    pub count: usize,
    /// Share of total expenses, 0.0..=1.0.
    pub share: f64,
}

/// Income/expense totals over a window of parsed records.
#[derive(Debug, Clone, Serialize)]
pub struct CashFlow {
    pub money_in: Decimal,
    pub money_out: Decimal,
    /// Transaction costs across all recognized records.
    pub fees: Decimal,
    pub net: Decimal,
    /// Recognized records included in the window.
    pub transactions: usize,
    /// Expense categories, largest first.
    pub breakdown: Vec<CategoryBreakdown>,
}

/// Aggregate cash flow, optionally restricted to `[from, to)`.
///
/// Unknown records and records with no extracted amount are skipped;
/// when a window is given, records without a usable timestamp are
/// skipped as well.
pub fn analyze_cash_flow(
    records: &[ParsedTransaction],
    window: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> CashFlow {
    let mut money_in = Decimal::ZERO;
    let mut money_out = Decimal::ZERO;
    let mut fees = Decimal::ZERO;
    let mut transactions = 0usize;
    let mut per_category: HashMap<Category, (Decimal, usize)> = HashMap::new();

    for record in records {
        let Some(amount) = record.amount else {
            continue;
        };
        if !record.is_recognized() {
            continue;
        }
        if let Some((from, to)) = window {
            match record.occurred_at {
                Some(at) if at >= from && at < to => {}
                _ => continue,
            }
        }

        transactions += 1;
        fees += record.transaction_cost;

        if record.transaction_type.is_credit() {
            money_in += amount;
        } else {
            money_out += amount;
            let entry = per_category
                .entry(categorize(record))
                .or_insert((Decimal::ZERO, 0));
            entry.0 += amount;
            entry.1 += 1;
        }
    }

    let expense_total = money_out;
    let mut breakdown: Vec<CategoryBreakdown> = per_category
        .into_iter()
        .map(|(category, (total, count))| {
            let share = if expense_total.is_zero() {
                0.0
            } else {
                (total / expense_total).to_f64().unwrap_or(0.0)
            };
            CategoryBreakdown {
                category,
                total,
                count,
                share,
            }
        })
        .collect();
    breakdown.sort_by(|a, b| b.total.cmp(&a.total));

    CashFlow {
        money_in,
        money_out,
        fees,
        net: money_in - money_out - fees,
        transactions,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pesalog_ingest::parse_message;
    use rust_decimal_macros::dec;

    fn records() -> Vec<ParsedTransaction> {
        [
            "RB12KLM Confirmed. You have received Ksh5,000.00 from JOHN KAMAU 254712345678 on 18/11/2025 at 10:30 AM. New M-PESA balance is Ksh15,000.00. Transaction cost, Ksh0.00.",
            "QC34XYZ Confirmed. Ksh2,500.00 sent to JANE WANJIRU 254723456789 on 18/11/2025 at 2:15 PM. New M-PESA balance is Ksh12,475.00. Transaction cost, Ksh25.00.",
            "RF45ABC Confirmed. You have paid Ksh1,200.00 to KENYA POWER for account 123456 on 19/11/2025 at 9:05 AM. New balance is Ksh11,275.00. Transaction cost, Ksh0.00.",
            "Hello, how are you?",
        ]
        .iter()
        .map(|text| parse_message(text, None).unwrap())
        .collect()
    }

    #[test]
    fn test_in_out_and_net() {
        let flow = analyze_cash_flow(&records(), None);
        assert_eq!(flow.money_in, dec!(5000.00));
        assert_eq!(flow.money_out, dec!(3700.00));
        assert_eq!(flow.fees, dec!(25.00));
        assert_eq!(flow.net, dec!(1275.00));
        assert_eq!(flow.transactions, 3); // unknown row skipped
    }

    #[test]
    fn test_breakdown_sorted_and_shares_sum() {
        let flow = analyze_cash_flow(&records(), None);
        assert_eq!(flow.breakdown.len(), 2);
        assert!(flow.breakdown[0].total >= flow.breakdown[1].total);

        let share_sum: f64 = flow.breakdown.iter().map(|b| b.share).sum();
        assert!((share_sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_filters_by_occurred_at() {
        let from = "2025-11-19T00:00:00+00:00".parse().unwrap();
        let to = "2025-11-20T00:00:00+00:00".parse().unwrap();
        let flow = analyze_cash_flow(&records(), Some((from, to)));

        // Only the paybill payment falls on the 19th.
        assert_eq!(flow.transactions, 1);
        assert_eq!(flow.money_out, dec!(1200.00));
        assert_eq!(flow.money_in, dec!(0));
    }
}
