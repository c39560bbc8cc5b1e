//! Pipeline configuration.
//!
//! Configuration is optional: every field has a default matching the
//! standard timetable layout. A YAML file may override any part of it:
//!
//! ```yaml
//! parser:
//!   group_cell: C1
//!   time_header: Часы
//! calendar:
//!   epoch: 2025-02-10
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calendar::WeekCalendar;
use crate::common::Result;
use crate::schedule::ParserOptions;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Sheet layout
    pub parser: ParserOptions,
    /// Term calendar for date queries
    pub calendar: WeekCalendar,
}

impl Config {
    /// Create a configuration with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sheet layout.
    #[inline]
    pub fn with_parser(mut self, parser: ParserOptions) -> Self {
        self.parser = parser;
        self
    }

    /// Set the term calendar.
    #[inline]
    pub fn with_calendar(mut self, calendar: WeekCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Parse configuration from YAML text and validate it.
    ///
    /// Blank text yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_saphyr::from_str(yaml)?;
        config.parser.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }
}
