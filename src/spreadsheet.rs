//! Worksheet loading
//!
//! Reads the first worksheet of the export and turns every line below the
//! header row into a [`RawRow`], keyed by header label, in sheet order.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, error};

use crate::{ErrorContext, ErrorDetail, config};

/// A single cell value. Numbers keep the representation the workbook used.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    String(String),
    Integer(i64),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::String(s) => s.trim().is_empty(),
            Self::Number(n) => n.is_nan(),
            Self::Integer(_) | Self::Bool(_) => false,
        }
    }

    /// Numeric text becomes a number and blank cells become empty. Anything
    /// else is kept as the workbook had it.
    pub fn into_numeric(self) -> Self {
        match self {
            cell if cell.is_empty() => Self::Empty,
            Self::String(s) => match s.trim().parse() {
                Ok(n) => Self::Number(n),
                Err(_) => Self::String(s),
            },
            cell => cell,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::String(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&Data> for CellValue {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty | Data::Error(_) => Self::Empty,
            Data::String(s) => Self::String(s.clone()),
            Data::Int(n) => Self::Integer(*n),
            Data::Float(n) => Self::Number(*n),
            Data::Bool(b) => Self::Bool(*b),
            other => Self::String(other.to_string()),
        }
    }
}

/// One line of the worksheet below the header.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 1-based row number as shown by spreadsheet applications.
    pub line: usize,
    pub cells: IndexMap<String, CellValue>,
}

impl RawRow {
    /// Value of the name column as text.
    pub fn name(&self) -> Result<String, ErrorDetail> {
        match self.cells.get(config::NAME_COLUMN) {
            None => Err(ErrorDetail::MissingColumn(config::NAME_COLUMN)),
            Some(cell) if cell.is_empty() => Err(ErrorDetail::MissingName),
            Some(cell) => Ok(cell.to_string()),
        }
    }
}

/// Load every data row of the first worksheet of the workbook at `path`.
pub fn load_rows(path: &Path) -> Result<Vec<RawRow>, crate::Error> {
    let ctx = ErrorContext::new(path);
    let mut workbook = open_workbook_auto(path)
        .inspect_err(|error| error!(%error, path = %path.display(), "failed to open workbook"))
        .map_err(|error| ctx.error(ErrorDetail::OpenWorkbook(error)))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| ctx.error(ErrorDetail::NoWorksheet))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|error| ctx.error(ErrorDetail::OpenWorkbook(error)))?;
    debug!(sheet, rows = range.height(), "loaded worksheet");
    rows_from_range(&range).map_err(|detail| ctx.error(detail))
}

/// Split a worksheet range into header labels and data rows.
///
/// Rows are addressed by their physical position in the sheet even when the
/// used range does not start at the first row. Rows without any value are
/// skipped, as are columns with an empty header.
pub fn rows_from_range(range: &Range<Data>) -> Result<Vec<RawRow>, ErrorDetail> {
    let (first_row, _) = range.start().unwrap_or_default();
    let first_row = first_row as usize;
    if first_row > config::HEADER_ROW {
        return Err(ErrorDetail::MissingHeader(config::HEADER_ROW));
    }
    let mut rows = range.rows().skip(config::HEADER_ROW - first_row);
    let header = rows
        .next()
        .ok_or(ErrorDetail::MissingHeader(config::HEADER_ROW))?
        .iter()
        .map(|cell| cell.to_string().trim().to_owned())
        .collect::<Vec<_>>();
    if !header.iter().any(|label| label == config::NAME_COLUMN) {
        return Err(ErrorDetail::MissingColumn(config::NAME_COLUMN));
    }

    let data_start = config::HEADER_ROW + 1;
    Ok(rows
        .enumerate()
        .filter(|(_, cells)| cells.iter().any(|cell| !CellValue::from(cell).is_empty()))
        .map(|(offset, cells)| RawRow {
            line: data_start + offset + 1,
            cells: header
                .iter()
                .zip(cells)
                .filter(|(label, _)| !label.is_empty())
                .map(|(label, cell)| (label.clone(), CellValue::from(cell)))
                .collect(),
        })
        .collect())
}
