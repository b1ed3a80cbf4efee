//! Workbook reading via calamine.
//!
//! The first three worksheets of the input workbook are, in order, the
//! distribution, payment and payment-type streams.

use calamine::{Data, Reader, Sheets, open_workbook_auto};
use chrono::NaiveDateTime;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ReconError, ReconResult};
use crate::models::{CellValue, Row, excel_serial_to_datetime};

use super::InputStreams;

/// Number of worksheets the input contract requires.
pub const REQUIRED_SHEETS: usize = 3;

/// Reads the three input streams from a spreadsheet workbook.
///
/// Supports every format calamine opens (xlsx, xlsm, xlsb, xls, ods).
///
/// # Returns
///
/// Returns the tokenized streams, or an error if:
/// - The file does not exist
/// - The file cannot be opened as a workbook
/// - The workbook has fewer than three worksheets
pub fn read_workbook<P: AsRef<Path>>(path: P) -> ReconResult<InputStreams> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    if !path.exists() {
        return Err(ReconError::InputNotFound { path: path_str });
    }

    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| ReconError::WorkbookError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    if sheet_names.len() < REQUIRED_SHEETS {
        return Err(ReconError::MissingSheet {
            expected: REQUIRED_SHEETS,
            found: sheet_names.len(),
        });
    }

    let mut streams: Vec<Vec<Row>> = Vec::with_capacity(REQUIRED_SHEETS);
    for sheet_name in sheet_names.iter().take(REQUIRED_SHEETS) {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| ReconError::WorkbookError {
                path: path_str.clone(),
                message: format!("failed to read sheet '{}': {}", sheet_name, e),
            })?;

        // Data may not begin at A1; pad so row and column indices stay absolute.
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let rows: Vec<Row> = std::iter::repeat_n(Row::new(), start_row as usize)
            .chain(range.rows().map(|row| {
                std::iter::repeat_n(CellValue::Empty, start_col as usize)
                    .chain(row.iter().map(to_cell_value))
                    .collect()
            }))
            .collect();

        debug!(sheet = %sheet_name, rows = rows.len(), "Read worksheet");
        streams.push(rows);
    }

    let mut streams = streams.into_iter();
    let input = InputStreams {
        distributions: streams.next().unwrap_or_default(),
        payments: streams.next().unwrap_or_default(),
        payment_types: streams.next().unwrap_or_default(),
    };

    info!(
        path = %path_str,
        distributions = input.distributions.len(),
        payments = input.payments.len(),
        payment_types = input.payment_types.len(),
        "Loaded workbook"
    );

    Ok(input)
}

/// Converts a calamine cell into a [`CellValue`].
///
/// Excel date cells are converted assuming the 1900 date system.
pub fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Integer(*n),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Error(format!("#{:?}", e)),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            excel_serial_to_datetime(serial)
                .map(CellValue::DateTime)
                .unwrap_or(CellValue::Number(serial))
        }
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(CellValue::DateTime)
            .unwrap_or_else(|_| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}
