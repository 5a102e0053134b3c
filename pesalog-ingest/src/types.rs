//! Raw input to the SMS parsers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One SMS body plus the optional receipt timestamp, used as a fallback
/// when the text carries no date of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    pub text: String,
    pub received_at: Option<DateTime<Utc>>,
}

impl RawMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            received_at: None,
        }
    }

    pub fn received(text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            received_at: Some(at),
        }
    }
}
