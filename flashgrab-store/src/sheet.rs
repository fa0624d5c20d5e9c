//! Spreadsheet emitter.
//!
//! One worksheet, a bold header row (Question, Options, Answer) and one row
//! per record in input order. The workbook's creation time is pinned so the
//! same records always produce the same bytes.

use flashgrab_core::StructuredRecord;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, FormatAlign, Workbook, XlsxError};
use std::path::Path;
use tracing::{debug, instrument};

use crate::error::StoreError;

/// Header labels, in column order.
pub const HEADERS: [&str; 3] = ["Question", "Options", "Answer"];

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Flashcards";

const COLUMN_WIDTHS: [f64; 3] = [60.0, 40.0, 40.0];

/// One spreadsheet row: question stem, joined options, answer.
pub type SheetRow = [String; 3];

/// Converts records to rows. Records without options get an empty cell.
pub fn rows_for(records: &[StructuredRecord]) -> Vec<SheetRow> {
    records
        .iter()
        .map(|r| [r.question.clone(), r.options_text(), r.answer.clone()])
        .collect()
}

/// Writes `records` as a workbook at `path`.
#[instrument(skip_all, fields(path = %path.display(), rows = records.len()))]
pub fn write_workbook(path: &Path, records: &[StructuredRecord]) -> Result<(), StoreError> {
    let mut workbook = build_workbook(records)?;
    workbook.save(path)?;
    debug!("Workbook written");
    Ok(())
}

/// Renders `records` as workbook bytes.
pub fn to_buffer(records: &[StructuredRecord]) -> Result<Vec<u8>, StoreError> {
    let mut workbook = build_workbook(records)?;
    Ok(workbook.save_to_buffer()?)
}

fn build_workbook(records: &[StructuredRecord]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();

    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    let properties = DocProperties::new()
        .set_title("Flashcards")
        .set_creation_datetime(&created);
    workbook.set_properties(&properties);

    let header = Format::new().set_bold();
    let cell = Format::new().set_text_wrap().set_align(FormatAlign::Top);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, (title, width)) in (0u16..).zip(HEADERS.iter().zip(COLUMN_WIDTHS)) {
        worksheet.write_string_with_format(0, col, *title, &header)?;
        worksheet.set_column_width(col, width)?;
    }

    for (row, values) in (1u32..).zip(rows_for(records)) {
        for (col, value) in (0u16..).zip(values.iter()) {
            worksheet.write_string_with_format(row, col, value, &cell)?;
        }
    }

    Ok(workbook)
}
