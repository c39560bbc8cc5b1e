//! Sparse cell grid for one worksheet.

use std::collections::BTreeMap;

use super::types::{CellValue, Color};
use crate::common::{Error, Result};

static EMPTY: CellValue = CellValue::Empty;

/// A single populated cell: its value and background fill.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    /// The cell value
    pub value: CellValue,
    /// Resolved pattern fill colour, `None` when the cell has no fill
    pub fill: Option<Color>,
}

impl Cell {
    /// Create a cell without fill.
    #[inline]
    pub fn new(value: impl Into<CellValue>) -> Self {
        Self {
            value: value.into(),
            fill: None,
        }
    }

    /// Create a cell with a fill colour.
    #[inline]
    pub fn with_fill(value: impl Into<CellValue>, fill: Color) -> Self {
        Self {
            value: value.into(),
            fill: Some(fill),
        }
    }
}

/// A worksheet held in memory.
///
/// Rows and columns are 1-based, matching spreadsheet addressing. Only cells
/// that carry a value or a fill are stored; everything else reads as empty.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    name: String,
    rows: BTreeMap<u32, BTreeMap<u32, Cell>>,
}

impl Sheet {
    /// Create an empty sheet with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: BTreeMap::new(),
        }
    }

    /// Get the worksheet name (the tab title).
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store a cell, replacing whatever was at that position.
    pub fn insert(&mut self, row: u32, column: u32, cell: Cell) {
        self.rows.entry(row).or_default().insert(column, cell);
    }

    /// Get a cell by row and column (1-based).
    pub fn cell(&self, row: u32, column: u32) -> Option<&Cell> {
        self.rows.get(&row).and_then(|cells| cells.get(&column))
    }

    /// Get a cell value by row and column; missing cells read as `Empty`.
    pub fn value(&self, row: u32, column: u32) -> &CellValue {
        self.cell(row, column).map_or(&EMPTY, |cell| &cell.value)
    }

    /// Get the fill colour of a cell.
    pub fn fill(&self, row: u32, column: u32) -> Option<Color> {
        self.cell(row, column).and_then(|cell| cell.fill)
    }

    /// Get a cell value by A1-style reference (e.g. `"C1"`).
    pub fn value_by_reference(&self, reference: &str) -> Result<&CellValue> {
        let (column, row) = reference_to_coords(reference)?;
        Ok(self.value(row, column))
    }

    /// Row numbers that hold at least one stored cell, in ascending order.
    pub fn row_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.keys().copied()
    }

    /// The highest populated row number, 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.rows.keys().next_back().copied().unwrap_or(0)
    }

    /// Total number of stored cells.
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Check if the sheet holds no cells.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Builder for constructing a [`Sheet`] cell by cell.
#[derive(Debug, Default)]
pub struct SheetBuilder {
    sheet: Sheet,
}

impl SheetBuilder {
    /// Start a sheet with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            sheet: Sheet::new(name),
        }
    }

    /// Set a value without fill.
    pub fn value(mut self, row: u32, column: u32, value: impl Into<CellValue>) -> Self {
        self.sheet.insert(row, column, Cell::new(value));
        self
    }

    /// Set a value with a fill colour.
    pub fn filled(mut self, row: u32, column: u32, value: impl Into<CellValue>, fill: Color) -> Self {
        self.sheet.insert(row, column, Cell::with_fill(value, fill));
        self
    }

    /// Finish building.
    pub fn build(self) -> Sheet {
        self.sheet
    }
}

/// Convert an A1-style reference (e.g. `"AB12"`) to 1-based `(column, row)`.
///
/// Absolute markers (`$C$1`) are accepted and ignored.
pub fn reference_to_coords(reference: &str) -> Result<(u32, u32)> {
    let invalid = || Error::InvalidReference(reference.to_string());

    let bytes: Vec<u8> = reference.bytes().filter(|&b| b != b'$').collect();
    let col_str_end = bytes
        .iter()
        .position(u8::is_ascii_digit)
        .ok_or_else(invalid)?;
    if col_str_end == 0 {
        return Err(invalid());
    }

    // A=1, B=2, ..., Z=26, AA=27
    let mut col_num = 0u32;
    for &byte in &bytes[..col_str_end] {
        if !byte.is_ascii_alphabetic() {
            return Err(invalid());
        }
        col_num = col_num
            .checked_mul(26)
            .and_then(|n| n.checked_add(u32::from(byte.to_ascii_uppercase() - b'A' + 1)))
            .ok_or_else(invalid)?;
    }

    let row_part = &bytes[col_str_end..];
    if !row_part.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    let row_num = std::str::from_utf8(row_part)
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|&row| row > 0)
        .ok_or_else(invalid)?;

    Ok((col_num, row_num))
}
