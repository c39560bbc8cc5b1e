//! XML parsing modules for `.xlsx` parts.
//!
//! Each parser takes the text of one part and returns plain data; none of
//! them touch the ZIP archive.

pub mod shared_strings_parser;
pub mod styles_parser;
pub mod workbook_parser;
pub mod worksheet_parser;

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesRef, BytesStart, BytesText};

use crate::common::{Error, Result};

/// Decode one attribute value, unescaping entities.
pub(crate) fn attr_value(reader: &Reader<&[u8]>, attr: &Attribute<'_>) -> Option<String> {
    attr.decode_and_unescape_value(reader.decoder())
        .ok()
        .map(|value| value.into_owned())
}

/// Find an attribute by local name on a start tag.
pub(crate) fn find_attr(reader: &Reader<&[u8]>, e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .and_then(|attr| attr_value(reader, &attr))
}

/// Append a raw text event to `out`.
pub(crate) fn append_text(out: &mut String, text: &BytesText<'_>) -> Result<()> {
    let text = std::str::from_utf8(text).map_err(|e| Error::Xml(e.to_string()))?;
    out.push_str(text);
    Ok(())
}

/// Append the replacement of an entity reference (`&amp;`, `&#10;`) to `out`.
///
/// Unknown named entities are kept verbatim.
pub(crate) fn append_entity(out: &mut String, entity: &BytesRef<'_>) -> Result<()> {
    if let Some(ch) = entity
        .resolve_char_ref()
        .map_err(|e| Error::Xml(e.to_string()))?
    {
        out.push(ch);
        return Ok(());
    }

    let name = std::str::from_utf8(entity).map_err(|e| Error::Xml(e.to_string()))?;
    match resolve_predefined_entity(name) {
        Some(replacement) => out.push_str(replacement),
        None => {
            out.push('&');
            out.push_str(name);
            out.push(';');
        },
    }
    Ok(())
}
