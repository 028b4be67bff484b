use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// Formats a check timestamp as `dd-Mon-yyyy`, e.g. `07-Mar-2025`.
pub fn format_check_date<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    timestamp.format("%d-%b-%Y").to_string()
}
