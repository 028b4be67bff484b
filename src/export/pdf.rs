use std::io::{self, BufWriter, Write};
use std::path::Path;

use printpdf::{BuiltinFont, Mm, PdfDocument};
use tempfile::NamedTempFile;

use super::{COLUMN_TITLES, ExportError, ReportRow};

pub const PDF_FILENAME: &str = "website_status_report.pdf";
pub const PDF_MIME: &str = "application/pdf";

const TITLE: &str = "Laporan Status Situs Web";
const TITLE_SIZE: f32 = 20.0;
const TEXT_SIZE: f32 = 10.0;

// US Letter, in points, measured from the top-left corner.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;

const TABLE_LEFT: f32 = 50.0;
const TABLE_TOP: f32 = 100.0;
const ROW_HEIGHT: f32 = 20.0;
const COLUMN_WIDTHS: [f32; 7] = [20.0, 140.0, 70.0, 60.0, 130.0, 90.0, 110.0];

/// A piece of text placed on a page, `x`/`y` in points from the top-left.
#[derive(Debug, Clone, PartialEq)]
struct Placed {
    text: String,
    x: f32,
    y: f32,
    size: f32,
    bold: bool,
}

fn column_offsets() -> [f32; 7] {
    let mut offsets = [TABLE_LEFT; 7];
    for i in 1..offsets.len() {
        offsets[i] = offsets[i - 1] + COLUMN_WIDTHS[i - 1];
    }
    offsets
}

fn header_at(y: f32, page: &mut Vec<Placed>) {
    for (title, x) in COLUMN_TITLES.iter().zip(column_offsets()) {
        page.push(Placed {
            text: title.to_string(),
            x,
            y,
            size: TEXT_SIZE,
            bold: true,
        });
    }
}

/// Places the title and table on as many pages as the rows need.
/// Continuation pages repeat the header at the top margin.
fn layout(rows: &[ReportRow]) -> Vec<Vec<Placed>> {
    // Helvetica averages about half an em per glyph.
    let title_width = TITLE.chars().count() as f32 * TITLE_SIZE * 0.5;
    let mut page = vec![Placed {
        text: TITLE.to_string(),
        x: (PAGE_WIDTH - title_width) / 2.0,
        y: MARGIN,
        size: TITLE_SIZE,
        bold: false,
    }];
    header_at(TABLE_TOP, &mut page);

    let mut pages = Vec::new();
    let mut y = TABLE_TOP + ROW_HEIGHT;
    for row in rows {
        if y + ROW_HEIGHT > PAGE_HEIGHT - MARGIN {
            pages.push(std::mem::take(&mut page));
            header_at(MARGIN, &mut page);
            y = MARGIN + ROW_HEIGHT;
        }
        for (text, x) in row.cells().into_iter().zip(column_offsets()) {
            page.push(Placed {
                text,
                x,
                y,
                size: TEXT_SIZE,
                bold: false,
            });
        }
        y += ROW_HEIGHT;
    }
    pages.push(page);
    pages
}

fn mm(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

fn render(rows: &[ReportRow], target: impl Write) -> Result<(), ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new(TITLE, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    for (index, items) in layout(rows).into_iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Layer 1")
        };
        let layer = doc.get_page(page).get_layer(layer);
        for item in items {
            let font = if item.bold { &bold } else { &regular };
            // PDF text is placed by its baseline, measured from the bottom edge.
            let baseline = PAGE_HEIGHT - item.y - item.size * 0.8;
            layer.use_text(item.text, item.size, mm(item.x), mm(baseline), font);
        }
    }

    let mut writer = BufWriter::new(target);
    doc.save(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Renders the report into a temporary file in `scratch_dir` and streams it to `out`.
/// The temporary file is removed on every path, including errors.
pub fn write_pdf_in(
    rows: &[ReportRow],
    out: &mut impl Write,
    scratch_dir: &Path,
) -> Result<(), ExportError> {
    let mut scratch = NamedTempFile::new_in(scratch_dir)?;
    render(rows, scratch.as_file_mut())?;

    let mut rendered = scratch.reopen()?;
    io::copy(&mut rendered, out)?;
    out.flush()?;
    log::debug!("Streamed PDF report with {} row(s)", rows.len());
    Ok(())
}
