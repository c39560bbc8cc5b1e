//! Parser for worksheet parts (`xl/worksheets/sheetN.xml`).
//!
//! Produces a [`Sheet`] with every cell that has a value or a fill. Shared
//! string indices and style indices are resolved on the way, so the grid
//! never refers back to the package.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{append_entity, append_text, attr_value};
use crate::common::{Error, Result};
use crate::sheet::{Cell, CellValue, Sheet, reference_to_coords};
use crate::xlsx::styles::Styles;

/// Attributes of the `<c>` element being read.
#[derive(Debug, Default)]
struct PendingCell {
    column: u32,
    row: u32,
    cell_type: Option<String>,
    style: Option<u32>,
    value: Option<String>,
    inline: Option<String>,
}

/// Which text-bearing child of `<c>` we are inside.
#[derive(Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    None,
    Value,
    InlineText,
}

/// Parse a worksheet part into a [`Sheet`].
pub fn parse_worksheet(
    name: &str,
    content: &str,
    shared_strings: &[String],
    styles: &Styles,
) -> Result<Sheet> {
    let mut reader = Reader::from_str(content);
    let mut sheet = Sheet::new(name);
    let mut buf = Vec::with_capacity(1024);

    let mut current_row = 0u32;
    let mut last_column = 0u32;
    let mut pending: Option<PendingCell> = None;
    let mut target = TextTarget::None;
    let mut in_inline = false;
    let mut in_phonetic = false;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"row" => {
                    current_row = row_number(&reader, &e).unwrap_or(current_row + 1);
                    last_column = 0;
                },
                b"c" => {
                    let cell = open_cell(&reader, &e, current_row, last_column)?;
                    last_column = cell.column;
                    pending = Some(cell);
                },
                b"v" if pending.is_some() => target = TextTarget::Value,
                b"is" if pending.is_some() => in_inline = true,
                b"t" if in_inline && !in_phonetic => target = TextTarget::InlineText,
                b"rPh" => in_phonetic = true,
                _ => {},
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"row" => {
                    current_row = row_number(&reader, &e).unwrap_or(current_row + 1);
                    last_column = 0;
                },
                b"c" => {
                    let cell = open_cell(&reader, &e, current_row, last_column)?;
                    last_column = cell.column;
                    store_cell(&mut sheet, cell, shared_strings, styles);
                },
                _ => {},
            },
            Ok(Event::Text(t)) => {
                if let Some(cell) = pending.as_mut() {
                    match target {
                        TextTarget::Value => append_text(cell.value.get_or_insert_default(), &t)?,
                        TextTarget::InlineText => {
                            append_text(cell.inline.get_or_insert_default(), &t)?
                        },
                        TextTarget::None => {},
                    }
                }
            },
            Ok(Event::GeneralRef(r)) => {
                if let Some(cell) = pending.as_mut() {
                    match target {
                        TextTarget::Value => append_entity(cell.value.get_or_insert_default(), &r)?,
                        TextTarget::InlineText => {
                            append_entity(cell.inline.get_or_insert_default(), &r)?
                        },
                        TextTarget::None => {},
                    }
                }
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"v" | b"t" => target = TextTarget::None,
                b"is" => in_inline = false,
                b"rPh" => in_phonetic = false,
                b"c" => {
                    if let Some(cell) = pending.take() {
                        store_cell(&mut sheet, cell, shared_strings, styles);
                    }
                    target = TextTarget::None;
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!("XML error in worksheet '{}': {}", name, e)));
            },
            _ => {},
        }
    }

    Ok(sheet)
}

fn row_number(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> Option<u32> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"r")
        .and_then(|attr| attr_value(reader, &attr))
        .and_then(|v| v.parse().ok())
}

/// Read the attributes of a `<c>` element.
///
/// Cells without an `r` attribute follow the previous cell in the row.
fn open_cell(
    reader: &Reader<&[u8]>,
    e: &BytesStart<'_>,
    current_row: u32,
    last_column: u32,
) -> Result<PendingCell> {
    let mut cell = PendingCell {
        column: last_column + 1,
        row: current_row,
        ..PendingCell::default()
    };

    for attr in e.attributes().flatten() {
        match attr.key.local_name().as_ref() {
            b"r" => {
                if let Some(reference) = attr_value(reader, &attr) {
                    let (column, row) = reference_to_coords(&reference)?;
                    cell.column = column;
                    cell.row = row;
                }
            },
            b"t" => cell.cell_type = attr_value(reader, &attr),
            b"s" => cell.style = attr_value(reader, &attr).and_then(|v| v.parse().ok()),
            _ => {},
        }
    }

    Ok(cell)
}

/// Resolve a pending cell and store it if it carries a value or a fill.
fn store_cell(sheet: &mut Sheet, cell: PendingCell, shared_strings: &[String], styles: &Styles) {
    if cell.row == 0 {
        return;
    }

    let fill = cell.style.and_then(|s| styles.fill_for_style(s));
    let value = resolve_value(cell.cell_type.as_deref(), cell.value, cell.inline, shared_strings);

    if !value.is_empty() || fill.is_some() {
        sheet.insert(cell.row, cell.column, Cell { value, fill });
    }
}

fn resolve_value(
    cell_type: Option<&str>,
    value: Option<String>,
    inline: Option<String>,
    shared_strings: &[String],
) -> CellValue {
    match (cell_type, value) {
        (Some("inlineStr"), _) => inline.map_or(CellValue::Empty, CellValue::String),
        (Some("s"), Some(v)) => v
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|idx| shared_strings.get(idx))
            .map_or(CellValue::Empty, |s| CellValue::String(s.clone())),
        (Some("str"), Some(v)) => CellValue::String(v),
        (Some("b"), Some(v)) => match v.trim() {
            "1" | "true" => CellValue::Bool(true),
            "0" | "false" => CellValue::Bool(false),
            _ => CellValue::Error(v),
        },
        (Some("e"), Some(v)) => CellValue::Error(v),
        (_, Some(v)) => {
            let trimmed = v.trim();
            if let Ok(int_val) = trimmed.parse::<i64>() {
                CellValue::Int(int_val)
            } else if let Ok(float_val) = trimmed.parse::<f64>() {
                CellValue::Float(float_val)
            } else {
                CellValue::String(v)
            }
        },
        (_, None) => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::Color;

    fn styles() -> Styles {
        Styles {
            fills: vec![None, None, Some(Color::Argb(0xFFFFFF00))],
            cell_xfs: vec![Some(0), Some(2)],
        }
    }

    #[test]
    fn test_cell_types() {
        let xml = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1">
      <c r="A1" t="s"><v>0</v></c>
      <c r="B1"><v>42</v></c>
      <c r="C1"><v>1.5</v></c>
      <c r="D1" t="b"><v>1</v></c>
      <c r="E1" t="str"><f>CONCAT("a","b")</f><v>ab</v></c>
      <c r="F1" t="inlineStr"><is><r><t>лек.</t></r><r><t>Физика</t></r></is></c>
      <c r="G1" t="e"><v>#REF!</v></c>
      <c r="H1" t="s"><v>7</v></c>
    </row>
  </sheetData>
</worksheet>"#;
        let shared = vec!["ПОНЕДЕЛЬНИК".to_string()];
        let sheet = parse_worksheet("s", xml, &shared, &Styles::new()).unwrap();

        assert_eq!(sheet.value(1, 1), &CellValue::String("ПОНЕДЕЛЬНИК".to_string()));
        assert_eq!(sheet.value(1, 2), &CellValue::Int(42));
        assert_eq!(sheet.value(1, 3), &CellValue::Float(1.5));
        assert_eq!(sheet.value(1, 4), &CellValue::Bool(true));
        assert_eq!(sheet.value(1, 5), &CellValue::String("ab".to_string()));
        assert_eq!(sheet.value(1, 6), &CellValue::String("лек.Физика".to_string()));
        assert_eq!(sheet.value(1, 7), &CellValue::Error("#REF!".to_string()));
        // Dangling shared string index
        assert!(sheet.value(1, 8).is_empty());
    }

    #[test]
    fn test_fills_and_blank_styled_cells() {
        let xml = r#"<worksheet><sheetData>
    <row r="2"><c r="C2" s="1" t="s"><v>0</v></c></row>
    <row r="3"><c r="C3" s="1"/><c r="D3" s="0"/></row>
  </sheetData></worksheet>"#;
        let shared = vec!["пр.Физика".to_string()];
        let sheet = parse_worksheet("s", xml, &shared, &styles()).unwrap();

        assert_eq!(sheet.fill(2, 3), Some(Color::Argb(0xFFFFFF00)));
        assert_eq!(sheet.fill(3, 3), Some(Color::Argb(0xFFFFFF00)));
        assert!(sheet.value(3, 3).is_empty());
        // No value and no fill: not stored
        assert!(sheet.cell(3, 4).is_none());
        assert_eq!(sheet.cell_count(), 2);
    }

    #[test]
    fn test_cells_without_reference() {
        let xml = r#"<worksheet><sheetData>
    <row r="5"><c t="inlineStr"><is><t>a</t></is></c><c t="inlineStr"><is><t>b</t></is></c></row>
    <row><c><v>3</v></c></row>
  </sheetData></worksheet>"#;
        let sheet = parse_worksheet("s", xml, &[], &Styles::new()).unwrap();
        assert_eq!(sheet.value(5, 1).as_str(), Some("a"));
        assert_eq!(sheet.value(5, 2).as_str(), Some("b"));
        assert_eq!(sheet.value(6, 1), &CellValue::Int(3));
    }

    #[test]
    fn test_escaped_text() {
        let xml = r#"<worksheet><sheetData>
    <row r="1"><c r="B1" t="inlineStr"><is><t>9:00-&#10;10:30 &lt;к&gt;</t></is></c></row>
  </sheetData></worksheet>"#;
        let sheet = parse_worksheet("s", xml, &[], &Styles::new()).unwrap();
        assert_eq!(sheet.value(1, 2).as_str(), Some("9:00-\n10:30 <к>"));
    }

    #[test]
    fn test_bad_reference_is_an_error() {
        let xml = r#"<worksheet><sheetData><row r="1"><c r="1A"><v>1</v></c></row></sheetData></worksheet>"#;
        assert!(matches!(
            parse_worksheet("s", xml, &[], &Styles::new()),
            Err(Error::InvalidReference(_))
        ));
    }
}
