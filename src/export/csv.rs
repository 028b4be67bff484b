use std::borrow::Cow;

use super::{COLUMN_TITLES, ReportRow};

pub const CSV_FILENAME: &str = "website_status_report.csv";
pub const CSV_MIME: &str = "text/csv";

const DELIMITER: char = ';';

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([DELIMITER, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn join(fields: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    fields
        .into_iter()
        .map(|f| escape(f.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join(";")
}

/// Renders the semicolon-delimited report. The header line is always present.
pub fn render_csv(rows: &[ReportRow]) -> String {
    let mut out = join(COLUMN_TITLES);
    out.push('\n');
    let body: Vec<String> = rows.iter().map(|row| join(row.cells())).collect();
    out.push_str(&body.join("\n"));
    out
}
