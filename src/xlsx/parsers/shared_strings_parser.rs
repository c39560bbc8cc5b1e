//! Parser for `xl/sharedStrings.xml`.
//!
//! Excel stores each distinct string once and cells refer to it by index.
//! Rich-text strings are split into runs; their text is concatenated.
//! Phonetic hints (`rPh`) are not part of the visible text and are dropped.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::{append_entity, append_text};
use crate::common::{Error, Result};

// Pre-allocate typical capacity to reduce reallocations
const INITIAL_STRINGS_CAPACITY: usize = 1024;

/// Parse shared strings content into an index-ordered list.
pub fn parse_shared_strings(content: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(content);
    let mut strings = Vec::with_capacity(INITIAL_STRINGS_CAPACITY);
    let mut buf = Vec::with_capacity(1024);

    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut in_phonetic = false;

    loop {
        buf.clear();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"si" => current = Some(String::new()),
                b"t" => in_text = true,
                b"rPh" => in_phonetic = true,
                _ => {},
            },
            Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                strings.push(String::new());
            },
            Ok(Event::Text(t)) => {
                if in_text
                    && !in_phonetic
                    && let Some(text) = current.as_mut()
                {
                    append_text(text, &t)?;
                }
            },
            Ok(Event::GeneralRef(r)) => {
                if in_text
                    && !in_phonetic
                    && let Some(text) = current.as_mut()
                {
                    append_entity(text, &r)?;
                }
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"si" => {
                    if let Some(text) = current.take() {
                        strings.push(text);
                    }
                },
                b"t" => in_text = false,
                b"rPh" => in_phonetic = false,
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(format!("XML error in shared strings: {}", e))),
            _ => {},
        }
    }

    Ok(strings)
}
