//! Timestamp parsing for SMS-embedded dates, interpreted as Nairobi local time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Africa::Nairobi;

/// Parse the M-Pesa date/time pair, e.g. ("18/11/2025", "10:30 AM"),
/// returning UTC. A missing time resolves to midnight local.
pub fn parse_mpesa_datetime(date: &str, time: Option<&str>) -> Option<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date.trim(), "%d/%m/%Y").ok()?;
    let clock = match time {
        Some(t) => {
            let t = t.trim().to_ascii_uppercase().replace('.', "");
            NaiveTime::parse_from_str(&t, "%I:%M %p").ok()?
        }
        None => NaiveTime::MIN,
    };
    to_utc(day.and_time(clock))
}

/// Parse the bank-notification date, e.g. "18-Nov-2025", returning UTC
/// midnight local.
pub fn parse_bank_date(date: &str) -> Option<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(date.trim(), "%d-%b-%Y").ok()?;
    to_utc(day.and_time(NaiveTime::MIN))
}

fn to_utc(local: NaiveDateTime) -> Option<DateTime<Utc>> {
    // Nairobi has no DST, so .single() only fails on genuinely bad input.
    Nairobi
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}
