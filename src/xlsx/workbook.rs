//! Workbook-level access to an `.xlsx` file.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::debug;

use super::package::{
    Package, SHARED_STRINGS_PART, STYLES_PART, WORKBOOK_PART, WORKBOOK_RELS_PART, resolve_target,
};
use super::parsers::shared_strings_parser::parse_shared_strings;
use super::parsers::styles_parser::parse_styles;
use super::parsers::workbook_parser::{SheetInfo, parse_relationships, parse_workbook_xml};
use super::parsers::worksheet_parser::parse_worksheet;
use super::styles::Styles;
use crate::common::{Error, Result};
use crate::sheet::Sheet;

/// An opened `.xlsx` workbook.
///
/// Workbook-level parts (sheet list, shared strings, styles) are parsed on
/// open; worksheets are parsed on demand.
#[derive(Debug)]
pub struct Workbook<R> {
    package: Package<R>,
    sheets: Vec<SheetInfo>,
    targets: HashMap<String, String>,
    shared_strings: Vec<String>,
    styles: Styles,
}

impl Workbook<BufReader<File>> {
    /// Open a workbook from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_package(Package::open(path)?)
    }
}

impl<R: Read + Seek> Workbook<R> {
    /// Open a workbook from any seekable reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        Self::from_package(Package::from_reader(reader)?)
    }

    /// Parse the workbook-level parts of an opened package.
    pub fn from_package(package: Package<R>) -> Result<Self> {
        let sheets = parse_workbook_xml(&package.read_part(WORKBOOK_PART)?)?;
        let targets = match package.read_optional_part(WORKBOOK_RELS_PART)? {
            Some(rels) => parse_relationships(&rels)?,
            None => HashMap::new(),
        };
        let shared_strings = match package.read_optional_part(SHARED_STRINGS_PART)? {
            Some(content) => parse_shared_strings(&content)?,
            None => Vec::new(),
        };
        let styles = match package.read_optional_part(STYLES_PART)? {
            Some(content) => parse_styles(&content)?,
            None => Styles::new(),
        };

        debug!(
            "workbook: {} sheets, {} shared strings, {} fills",
            sheets.len(),
            shared_strings.len(),
            styles.fills.len()
        );

        Ok(Self {
            package,
            sheets,
            targets,
            shared_strings,
            styles,
        })
    }

    /// Worksheet names in tab order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|info| info.name.as_str()).collect()
    }

    /// Number of worksheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Load a worksheet by name.
    pub fn sheet(&self, name: &str) -> Result<Sheet> {
        let info = self
            .sheets
            .iter()
            .find(|info| info.name == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))?;
        self.load(info)
    }

    /// Load a worksheet by tab index (0-based).
    pub fn sheet_by_index(&self, index: usize) -> Result<Sheet> {
        let info = self
            .sheets
            .get(index)
            .ok_or_else(|| Error::SheetNotFound(format!("#{}", index)))?;
        self.load(info)
    }

    /// Load every worksheet in tab order.
    ///
    /// Each sheet is loaded independently; one unreadable sheet does not hide
    /// the others.
    pub fn sheets(&self) -> impl Iterator<Item = (&str, Result<Sheet>)> + '_ {
        self.sheets
            .iter()
            .map(move |info| (info.name.as_str(), self.load(info)))
    }

    fn load(&self, info: &SheetInfo) -> Result<Sheet> {
        let path = self.part_path(info);
        let content = self.package.read_part(&path)?;
        parse_worksheet(&info.name, &content, &self.shared_strings, &self.styles)
    }

    /// Part path of a worksheet.
    ///
    /// Falls back to the conventional `sheetN.xml` name when the
    /// relationships part does not list the sheet.
    fn part_path(&self, info: &SheetInfo) -> String {
        match self.targets.get(&info.relationship_id) {
            Some(target) => resolve_target(target),
            None => format!("xl/worksheets/sheet{}.xml", info.sheet_id),
        }
    }
}
