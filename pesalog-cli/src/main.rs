use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use pesalog_core::{ParseStatus, TransactionType, format_kes};
use pesalog_ingest::{GoldenRecord, RawMessage, load_golden_csv, parse_batch, parse_message};
use pesalog_insights::{analyze_cash_flow, link_reversals};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pesalog",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PESALOG_BUILD_SHA"), ")"),
    about = "Mobile-money SMS parsing and reporting"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse one SMS body and print the record as JSON
    Parse {
        /// Raw SMS text
        text: String,

        /// Receipt timestamp (RFC3339), used when the text has no date
        #[arg(long)]
        received_at: Option<String>,
    },

    /// Parse a golden CSV and report coverage + accuracy against it
    Batch {
        /// Path to golden CSV (defaults to ./data/sms.csv)
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Show up to N non-full parses (default: 5)
        #[arg(long, default_value_t = 5)]
        show_failures: usize,
    },

    /// Cash-flow summary over a golden CSV
    Insights {
        /// Path to golden CSV (defaults to ./data/sms.csv)
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse { text, received_at } => {
            let received = received_at
                .map(|raw| {
                    DateTime::parse_from_rfc3339(&raw)
                        .map(|dt| dt.with_timezone(&Utc))
                        .with_context(|| format!("invalid --received-at: {raw}"))
                })
                .transpose()?;

            let record = parse_message(&text, received)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Command::Batch { csv, show_failures } => {
            let rows = load_rows(csv)?;
            run_batch(&rows, show_failures);
        }

        Command::Insights { csv } => {
            let rows = load_rows(csv)?;
            run_insights(&rows);
        }
    }

    Ok(())
}

fn default_sms_csv() -> PathBuf {
    // Prefer the repo-root fixture when running from the workspace
    PathBuf::from("data/sms.csv")
}

fn load_rows(csv: Option<PathBuf>) -> Result<Vec<GoldenRecord>> {
    let csv_path = csv.unwrap_or_else(default_sms_csv);
    if !csv_path.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", csv_path.display());
    }
    load_golden_csv(&csv_path).with_context(|| format!("parsing {}", csv_path.display()))
}

fn run_batch(rows: &[GoldenRecord], show_failures: usize) {
    let result = parse_batch(rows.iter().map(|r| RawMessage::new(&r.sms_text)));
    let summary = &result.summary;

    println!("Parsed {} messages", summary.total);
    println!(
        "full: {}  partial: {}  unknown: {}",
        summary.status_count(ParseStatus::Full),
        summary.status_count(ParseStatus::Partial),
        summary.status_count(ParseStatus::Unknown),
    );
    println!(
        "Total amount (recognized): {}\n",
        format_kes(summary.total_amount)
    );

    println!("By type:");
    for kind in TransactionType::ALL {
        let count = summary.count_for(kind);
        if count > 0 {
            println!("  {:18} {}", kind.as_str(), count);
        }
    }

    // Accuracy against the golden columns
    let mut type_ok = 0usize;
    let mut amount_ok = 0usize;
    let mut reference_ok = 0usize;
    for (row, record) in rows.iter().zip(&result.records) {
        if record.transaction_type == row.expected_type() {
            type_ok += 1;
        }
        if record.amount == Some(row.amount) {
            amount_ok += 1;
        }
        if record.reference_code.as_deref() == Some(row.reference.as_str()) {
            reference_ok += 1;
        }
    }
    println!("\nAccuracy vs golden columns ({} rows):", rows.len());
    println!("  type:      {}/{}", type_ok, rows.len());
    println!("  amount:    {}/{}", amount_ok, rows.len());
    println!("  reference: {}/{}", reference_ok, rows.len());

    let links = link_reversals(&result.records);
    if !links.is_empty() {
        let linked = links.iter().filter(|(_, original)| original.is_some()).count();
        println!(
            "\nReversals: {} ({} linked to an earlier transaction)",
            links.len(),
            linked
        );
    }

    let failures: Vec<_> = result
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.parse_status != ParseStatus::Full)
        .take(show_failures)
        .collect();
    if !failures.is_empty() {
        println!("\nNon-full parses:");
        for (i, record) in failures {
            let preview: String = record.raw_text.chars().take(60).collect();
            println!(
                "  #{} [{}] {} | {}",
                i + 1,
                record.parse_status.as_str(),
                record.describe(),
                preview
            );
        }
    }
}

fn run_insights(rows: &[GoldenRecord]) {
    let result = parse_batch(rows.iter().map(|r| RawMessage::new(&r.sms_text)));
    let flow = analyze_cash_flow(&result.records, None);

    println!("Cash flow over {} transactions\n", flow.transactions);
    println!("  money in:  {}", format_kes(flow.money_in));
    println!("  money out: {}", format_kes(flow.money_out));
    println!("  fees:      {}", format_kes(flow.fees));
    println!("  net:       {}", format_kes(flow.net));

    if !flow.breakdown.is_empty() {
        println!("\nSpending by category:");
        for slice in &flow.breakdown {
            println!(
                "  {:18} {} across {} transactions ({:.0}%)",
                slice.category.as_str(),
                format_kes(slice.total),
                slice.count,
                slice.share * 100.0
            );
        }
    }
}
