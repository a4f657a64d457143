//! Excel workbooks via calamine

use super::{ExtractError, FileFormat};
use calamine::{Data, Reader, Xls, Xlsx};
use std::fmt::Display;
use std::io::Cursor;
use tracing::debug;

/// Cell text must be longer than this, after trimming, to be kept
const MIN_CELL_CHARS: usize = 5;

/// First non-empty cell of one worksheet row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub sheet: String,
    /// 0-based row index within the sheet's used range
    pub row: usize,
    pub text: String,
}

pub(super) fn fragments(bytes: &[u8], format: FileFormat) -> Result<Vec<String>, ExtractError> {
    let rows = match format {
        FileFormat::Xls => read_rows::<Xls<_>>(bytes, format)?,
        _ => read_rows::<Xlsx<_>>(bytes, format)?,
    };
    debug!("Workbook yielded {} usable rows", rows.len());

    Ok(rows
        .into_iter()
        .map(|row| row.text)
        .filter(|text| text.chars().count() > MIN_CELL_CHARS)
        .collect())
}

/// All sheets in workbook order, rows top to bottom
fn read_rows<'a, R>(bytes: &'a [u8], format: FileFormat) -> Result<Vec<SheetRow>, ExtractError>
where
    R: Reader<Cursor<&'a [u8]>>,
    R::Error: Display,
{
    let mut workbook = R::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::malformed(format, format!("failed to open workbook: {}", e)))?;

    let mut rows = Vec::new();
    for sheet in workbook.sheet_names() {
        let range = workbook.worksheet_range(&sheet).map_err(|e| {
            ExtractError::malformed(format, format!("failed to read sheet {}: {}", sheet, e))
        })?;

        for (index, cells) in range.rows().enumerate() {
            if let Some(text) = first_text(cells) {
                rows.push(SheetRow {
                    sheet: sheet.clone(),
                    row: index,
                    text,
                });
            }
        }
    }
    Ok(rows)
}

/// Cells that carry no value: empty, errors, `false` and zero
fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) | Data::Bool(false) | Data::Int(0) => true,
        Data::Float(f) => *f == 0.0 || f.is_nan(),
        _ => false,
    }
}

/// Trimmed display text of the first non-blank cell
fn first_text(cells: &[Data]) -> Option<String> {
    cells
        .iter()
        .filter(|cell| !is_blank(cell))
        .map(|cell| cell.to_string().trim().to_string())
        .find(|text| !text.is_empty())
}
