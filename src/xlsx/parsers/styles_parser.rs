//! Parser for `xl/styles.xml`.
//!
//! Only `fills` and `cellXfs` are read. A fill's colour is the `fgColor` of
//! its `patternFill`, which is what spreadsheet tools report as the cell's
//! start colour whatever the pattern type.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::find_attr;
use crate::common::{Error, Result};
use crate::sheet::Color;
use crate::xlsx::styles::Styles;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Other,
    Fills,
    CellXfs,
}

/// Parse styles.xml content into fill and cell format tables.
pub fn parse_styles(content: &str) -> Result<Styles> {
    let mut reader = Reader::from_str(content);
    let mut styles = Styles::new();
    let mut buf = Vec::with_capacity(1024);

    let mut section = Section::Other;
    let mut current_fill: Option<Option<Color>> = None;
    let mut in_pattern = false;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match (section, e.local_name().as_ref()) {
                (_, b"fills") => section = Section::Fills,
                (_, b"cellXfs") => section = Section::CellXfs,
                (Section::Fills, b"fill") => current_fill = Some(None),
                (Section::Fills, b"patternFill") => in_pattern = true,
                (Section::Fills, b"fgColor") if in_pattern => {
                    set_fill_color(&reader, &e, &mut current_fill);
                },
                (Section::CellXfs, b"xf") => styles.cell_xfs.push(fill_id(&reader, &e)),
                _ => {},
            },
            Ok(Event::Empty(e)) => match (section, e.local_name().as_ref()) {
                (Section::Fills, b"fill") => styles.fills.push(None),
                (Section::Fills, b"fgColor") if in_pattern => {
                    set_fill_color(&reader, &e, &mut current_fill);
                },
                (Section::CellXfs, b"xf") => styles.cell_xfs.push(fill_id(&reader, &e)),
                _ => {},
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"fills" | b"cellXfs" => section = Section::Other,
                b"patternFill" => in_pattern = false,
                b"fill" => {
                    if let Some(fill) = current_fill.take() {
                        styles.fills.push(fill);
                    }
                },
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("XML error in styles: {}", e))),
            _ => {},
        }
    }

    Ok(styles)
}

/// Read the colour attributes of an `fgColor` element into the open fill.
fn set_fill_color(reader: &Reader<&[u8]>, e: &BytesStart<'_>, fill: &mut Option<Option<Color>>) {
    let Some(slot) = fill.as_mut() else {
        return;
    };

    let color = if let Some(rgb) = find_attr(reader, e, b"rgb") {
        Color::parse_argb(&rgb)
    } else if let Some(theme) = find_attr(reader, e, b"theme") {
        theme.parse().ok().map(Color::Theme)
    } else if let Some(indexed) = find_attr(reader, e, b"indexed") {
        indexed.parse().ok().map(Color::Indexed)
    } else {
        None
    };
    *slot = color;
}

fn fill_id(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> Option<u32> {
    find_attr(reader, e, b"fillId").and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <fonts count="1"><font><sz val="11"/><color theme="1"/><name val="Calibri"/></font></fonts>
  <fills count="6">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
    <fill><patternFill patternType="solid"><fgColor rgb="FF00FF00"/><bgColor indexed="64"/></patternFill></fill>
    <fill><patternFill patternType="solid"><fgColor rgb="FFFFFF00"/></patternFill></fill>
    <fill><patternFill patternType="solid"><fgColor theme="4" tint="0.39"/></patternFill></fill>
    <fill><gradientFill degree="90"><stop position="0"><color rgb="FFFF0000"/></stop></gradientFill></fill>
  </fills>
  <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="3" borderId="0"/></cellStyleXfs>
  <cellXfs count="4">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="0" fontId="0" fillId="2" borderId="0" xfId="0" applyFill="1"/>
    <xf numFmtId="0" fontId="0" fillId="3" borderId="0" xfId="0" applyFill="1"><alignment wrapText="1"/></xf>
    <xf numFmtId="0" fontId="0" fillId="4" borderId="0" xfId="0" applyFill="1"/>
  </cellXfs>
</styleSheet>"#;

    #[test]
    fn test_parse_fills() {
        let styles = parse_styles(STYLES).unwrap();
        assert_eq!(
            styles.fills,
            vec![
                None,
                None,
                Some(Color::Argb(0xFF00FF00)),
                Some(Color::Argb(0xFFFFFF00)),
                Some(Color::Theme(4)),
                None,
            ]
        );
    }

    #[test]
    fn test_parse_cell_xfs_ignores_cell_style_xfs() {
        let styles = parse_styles(STYLES).unwrap();
        assert_eq!(styles.cell_xfs, vec![Some(0), Some(2), Some(3), Some(4)]);
        assert_eq!(styles.fill_for_style(1), Some(Color::Argb(0xFF00FF00)));
        assert_eq!(styles.fill_for_style(2), Some(Color::Argb(0xFFFFFF00)));
    }
}
