//! pesalog-ingest: mobile-money SMS parsing — pattern tables, classifier,
//! field extraction, batch parsing, and golden-fixture loading.

pub mod batch;
pub mod classifier;
pub mod extract;
pub mod fixtures;
pub mod parser;
pub mod patterns;
pub mod types;

pub use batch::{BatchResult, BatchSummary, parse_batch, parse_iter};
pub use classifier::{classify, detect_provider};
pub use fixtures::{GoldenRecord, load_golden_csv};
pub use parser::parse_message;
pub use types::RawMessage;
