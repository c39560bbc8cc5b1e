//! `.xlsx` package (ZIP archive) access.
//!
//! An `.xlsx` file is a ZIP archive of XML parts. This module only knows how
//! to find and read parts; interpreting them is left to the parsers.

use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use crate::common::{Error, Result};

/// Path of the workbook part inside the package.
pub const WORKBOOK_PART: &str = "xl/workbook.xml";
/// Path of the workbook relationships part.
pub const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
/// Path of the shared strings part (optional).
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
/// Path of the style sheet part (optional).
pub const STYLES_PART: &str = "xl/styles.xml";

/// An opened `.xlsx` package.
pub struct Package<R> {
    archive: RefCell<zip::ZipArchive<R>>,
}

impl Package<BufReader<File>> {
    /// Open a package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> Package<R> {
    /// Open a package from any seekable reader.
    pub fn from_reader(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader)
            .map_err(|_| Error::InvalidFormat("Invalid ZIP archive".to_string()))?;

        let package = Self {
            archive: RefCell::new(archive),
        };
        if !package.has_part(WORKBOOK_PART) {
            return Err(Error::InvalidFormat(
                "ZIP archive has no xl/workbook.xml; not an .xlsx file".to_string(),
            ));
        }
        Ok(package)
    }

    /// Check whether a part exists.
    pub fn has_part(&self, path: &str) -> bool {
        self.archive.borrow_mut().by_name(path).is_ok()
    }

    /// Read a part as UTF-8 text.
    pub fn read_part(&self, path: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::PartNotFound(path.to_string()))?;

        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Ok(content)
    }

    /// Read a part that may legitimately be absent.
    pub fn read_optional_part(&self, path: &str) -> Result<Option<String>> {
        if self.has_part(path) {
            self.read_part(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Names of all parts in the archive.
    pub fn part_names(&self) -> Vec<String> {
        self.archive
            .borrow()
            .file_names()
            .map(str::to_string)
            .collect()
    }
}

impl<R> std::fmt::Debug for Package<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Package").finish_non_exhaustive()
    }
}

/// Resolve a relationship target from `workbook.xml.rels` to a part path.
///
/// Targets are relative to `xl/` unless they start with `/`.
pub fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = vec!["xl"];
    for segment in target.split('/') {
        match segment {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            other => segments.push(other),
        }
    }
    segments.join("/")
}
