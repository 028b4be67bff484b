use unicode_truncate::UnicodeTruncateStr;

use super::{COLUMN_TITLES, ReportRow};

const COLUMN_WIDTHS: [usize; 7] = [4, 40, 12, 11, 40, 18, 29];

fn to_fixed_width(input: &str, width: usize) -> String {
    let (truncated, used) = input.unicode_truncate(width);
    format!("{truncated}{}", " ".repeat(width - used))
}

fn line(cells: impl IntoIterator<Item = impl AsRef<str>>) -> String {
    cells
        .into_iter()
        .zip(COLUMN_WIDTHS)
        .map(|(cell, width)| to_fixed_width(cell.as_ref(), width))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// Renders the on-screen report as a fixed-width table.
pub fn render_table(rows: &[ReportRow]) -> String {
    let mut out = line(COLUMN_TITLES);
    out.push('\n');
    let total: usize = COLUMN_WIDTHS.iter().sum::<usize>() + COLUMN_WIDTHS.len() - 1;
    out.push_str(&"-".repeat(total));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.cells()));
        out.push('\n');
    }
    out
}
