//! Common types for spreadsheet cells.

use std::fmt;

/// Types of data that can be stored in a cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell
    #[default]
    Empty,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// String value
    String(String),
    /// Error value (e.g. `#REF!`)
    Error(String),
}

impl CellValue {
    /// Check if the cell holds no value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Borrow the text of a string cell.
    ///
    /// Numbers and booleans are not text here; use the `Display` impl to
    /// render any value as a string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::String(s) | CellValue::Error(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

/// Cell fill colour as stored in the style sheet.
///
/// Only `Argb` carries an actual colour value; theme and indexed colours are
/// references into palettes this crate does not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// 32-bit ARGB value, e.g. `0xFF00FF00` for opaque green
    Argb(u32),
    /// Index into the workbook theme colours
    Theme(u32),
    /// Index into the legacy indexed palette
    Indexed(u32),
}

impl Color {
    /// Parse an `rgb` attribute value.
    ///
    /// Accepts 8 hex digits (`AARRGGBB`) or 6 hex digits (`RRGGBB`, alpha
    /// assumed opaque). Returns `None` for anything else.
    pub fn parse_argb(value: &str) -> Option<Self> {
        let value = value.trim().trim_start_matches('#');
        if !value.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match value.len() {
            8 => u32::from_str_radix(value, 16).ok().map(Color::Argb),
            6 => u32::from_str_radix(value, 16)
                .ok()
                .map(|rgb| Color::Argb(0xFF00_0000 | rgb)),
            _ => None,
        }
    }

    /// The ARGB value, if this is a literal colour.
    #[inline]
    pub fn argb(&self) -> Option<u32> {
        match self {
            Color::Argb(argb) => Some(*argb),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Argb(argb) => write!(f, "{:08X}", argb),
            Color::Theme(idx) => write!(f, "theme:{}", idx),
            Color::Indexed(idx) => write!(f, "indexed:{}", idx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_argb() {
        assert_eq!(Color::parse_argb("FF00FF00"), Some(Color::Argb(0xFF00FF00)));
        assert_eq!(Color::parse_argb("ffff0000"), Some(Color::Argb(0xFFFF0000)));
        assert_eq!(Color::parse_argb("FFFF00"), Some(Color::Argb(0xFFFFFF00)));
        assert_eq!(Color::parse_argb("#00FF00"), Some(Color::Argb(0xFF00FF00)));
        assert_eq!(Color::parse_argb("F00"), None);
        assert_eq!(Color::parse_argb("GG00FF00"), None);
        assert_eq!(Color::parse_argb("+F00FF00"), None);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::Argb(0xFF00FF00).to_string(), "FF00FF00");
        assert_eq!(Color::Theme(4).to_string(), "theme:4");
        assert_eq!(Color::Indexed(64).argb(), None);
    }

    #[test]
    fn test_cell_value_text() {
        assert_eq!(CellValue::from("9:00").as_str(), Some("9:00"));
        assert_eq!(CellValue::Int(3).as_str(), None);
        assert_eq!(CellValue::Int(3).to_string(), "3");
        assert_eq!(CellValue::Float(1.5).to_string(), "1.5");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert!(CellValue::default().is_empty());
    }
}
