//! Flat report rows and the renderers built on them.
//!
//! [`to_rows`] is the only place where a [`ProbeResult`] is turned into
//! display text. The console table, CSV and PDF renderers all consume the
//! resulting [`ReportRow`]s unchanged.

pub mod console;
pub mod csv;
pub mod pdf;

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::http_probe::result::ProbeResult;
use crate::report::date::format_check_date;

pub const COLUMN_TITLES: [&str; 7] = [
    "No.",
    "URL",
    "Status",
    "Kode Status",
    "Keterangan Kode Status",
    "Tanggal Pengecekan",
    "Tanggal Terakhir Diperbarui",
];

/// Shown for a missing `Last-Modified` header.
pub const UNKNOWN_SENTINEL: &str = "Tidak Diketahui";

/// Shown in the status code column when no response was received.
pub const MISSING_CODE_PLACEHOLDER: &str = "-";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error while exporting")]
    Io(#[from] std::io::Error),
    #[error("failed to render PDF")]
    Pdf(#[from] printpdf::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

/// A fully rendered export, ready to be written in one go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub default_name: &'static str,
    pub mime: &'static str,
}

/// Renders `rows` in `format`; PDF scratch files go to `scratch_dir`.
pub fn render_document(
    format: ExportFormat,
    rows: &[ReportRow],
    scratch_dir: &Path,
) -> Result<Document, ExportError> {
    let document = match format {
        ExportFormat::Csv => Document {
            bytes: csv::render_csv(rows).into_bytes(),
            default_name: csv::CSV_FILENAME,
            mime: csv::CSV_MIME,
        },
        ExportFormat::Pdf => {
            let mut bytes = Vec::new();
            pdf::write_pdf_in(rows, &mut bytes, scratch_dir)?;
            Document {
                bytes,
                default_name: pdf::PDF_FILENAME,
                mime: pdf::PDF_MIME,
            }
        }
    };
    Ok(document)
}

/// Writes a document to `destination`, or to stdout for `-`.
pub fn write_document(destination: &Path, document: &Document) -> Result<(), ExportError> {
    if destination.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&document.bytes)?;
        stdout.flush()?;
    } else {
        std::fs::write(destination, &document.bytes)?;
    }
    Ok(())
}

/// Renders the whole document first and only then touches the destination,
/// so a failed render leaves any existing file as it was.
pub fn export_report(
    format: ExportFormat,
    rows: &[ReportRow],
    output: Option<PathBuf>,
    scratch_dir: &Path,
) -> Result<(PathBuf, Document), ExportError> {
    let document = render_document(format, rows, scratch_dir)?;
    let destination = output.unwrap_or_else(|| PathBuf::from(document.default_name));
    write_document(&destination, &document)?;
    Ok((destination, document))
}

/// Language of the status label column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    Indonesian,
    English,
}

/// Decides which results are labelled active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// Active only for a 2xx response; error statuses count as inactive.
    #[default]
    StatusClass,
    /// Active for any response, whatever its status.
    Reachability,
}

impl LabelPolicy {
    pub fn is_active(self, result: &ProbeResult) -> bool {
        match (self, result.status_code()) {
            (_, None) => false,
            (LabelPolicy::StatusClass, Some(code)) => (200..300).contains(&code),
            (LabelPolicy::Reachability, Some(_)) => true,
        }
    }
}

impl Locale {
    pub fn status_label(self, active: bool) -> &'static str {
        match (self, active) {
            (Locale::Indonesian, true) => "Aktif",
            (Locale::Indonesian, false) => "Tidak Aktif",
            (Locale::English, true) => "Active",
            (Locale::English, false) => "Inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowOptions {
    pub locale: Locale,
    pub label_policy: LabelPolicy,
}

/// One renderer-agnostic report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// 1-based position in the report.
    pub number: usize,
    pub url: String,
    pub status: String,
    pub status_code: String,
    pub status_description: String,
    pub checked_on: String,
    pub last_modified: String,
}

impl ReportRow {
    /// The row's cells in [`COLUMN_TITLES`] order.
    pub fn cells(&self) -> [String; 7] {
        [
            self.number.to_string(),
            self.url.clone(),
            self.status.clone(),
            self.status_code.clone(),
            self.status_description.clone(),
            self.checked_on.clone(),
            self.last_modified.clone(),
        ]
    }
}

pub fn to_rows(results: &[ProbeResult], options: RowOptions) -> Vec<ReportRow> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| ReportRow {
            number: index + 1,
            url: result.url().to_string(),
            status: options
                .locale
                .status_label(options.label_policy.is_active(result))
                .to_string(),
            status_code: result
                .status_code()
                .map(|code| code.to_string())
                .unwrap_or_else(|| MISSING_CODE_PLACEHOLDER.to_string()),
            status_description: result.status_description().to_string(),
            checked_on: format_check_date(&result.checked_at()),
            last_modified: result
                .last_modified()
                .unwrap_or(UNKNOWN_SENTINEL)
                .to_string(),
        })
        .collect()
}
