//! Parser for `xl/workbook.xml` and its relationships part.
//!
//! The workbook part lists sheets in tab order with a relationship id; the
//! relationships part maps that id to the worksheet part path.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::Event;

use super::attr_value;
use crate::common::{Error, Result};

// Pre-allocate typical capacity for worksheets
const INITIAL_SHEETS_CAPACITY: usize = 16;

/// A sheet entry from `workbook.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    /// Tab title
    pub name: String,
    /// `sheetId` attribute
    pub sheet_id: u32,
    /// `r:id` attribute, key into the workbook relationships
    pub relationship_id: String,
}

/// Parse `workbook.xml` content into sheet entries, in tab order.
pub fn parse_workbook_xml(content: &str) -> Result<Vec<SheetInfo>> {
    let mut reader = Reader::from_str(content);
    let mut sheets = Vec::with_capacity(INITIAL_SHEETS_CAPACITY);
    let mut buf = Vec::with_capacity(512);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.local_name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut sheet_id = None;
                let mut relationship_id = None;

                for attr in e.attributes().flatten() {
                    // `r:id` is namespaced; match on the qualified key so it is
                    // not confused with an unprefixed `id`.
                    match attr.key.as_ref() {
                        b"name" => name = attr_value(&reader, &attr),
                        b"sheetId" => {
                            sheet_id = attr_value(&reader, &attr).and_then(|v| v.parse().ok())
                        },
                        b"r:id" => relationship_id = attr_value(&reader, &attr),
                        key if key.ends_with(b":id") && relationship_id.is_none() => {
                            relationship_id = attr_value(&reader, &attr)
                        },
                        _ => {},
                    }
                }

                if let (Some(name), Some(sheet_id), Some(relationship_id)) =
                    (name, sheet_id, relationship_id)
                {
                    sheets.push(SheetInfo {
                        name,
                        sheet_id,
                        relationship_id,
                    });
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("XML error in workbook: {}", e))),
            _ => {},
        }
    }

    Ok(sheets)
}

/// Parse `workbook.xml.rels` into a map from relationship id to target.
pub fn parse_relationships(content: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(content);
    let mut targets = HashMap::new();
    let mut buf = Vec::with_capacity(512);

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.local_name().as_ref() {
                        b"Id" => id = attr_value(&reader, &attr),
                        b"Target" => target = attr_value(&reader, &attr),
                        _ => {},
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, target);
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("XML error in relationships: {}", e))),
            _ => {},
        }
    }

    Ok(targets)
}
