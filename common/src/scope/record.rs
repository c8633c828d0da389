//! # Scope Records
//!
//! Readers for the two pipeline inputs:
//!
//! * `programs.json`: program identifier → category (`domains`, `urls`,
//!   `wildcards`, ...) → raw strings. Produced by the scraper; only the shape
//!   "object of objects of arrays of strings" is assumed and anything else is
//!   skipped.
//! * `domains.txt`: one host per line, produced by the clean phase.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::ScoprError;

/// Category name → raw strings, in file order.
pub type ScopeRecord = BTreeMap<String, Vec<String>>;

/// Every program's scope record, keyed by program identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeBook {
    programs: BTreeMap<String, ScopeRecord>,
}

impl ScopeBook {
    pub fn load(path: &Path) -> Result<Self, ScoprError> {
        let raw: String = fs::read_to_string(path).map_err(|source| ScoprError::InputUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value = serde_json::from_str(&raw).map_err(|source| ScoprError::InputMalformed {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_value(value)
    }

    /// Builds a book from parsed JSON, dropping entries of the wrong shape.
    pub fn from_value(value: Value) -> Result<Self, ScoprError> {
        let Value::Object(programs) = value else {
            return Err(ScoprError::NotAnObject);
        };

        let mut book: ScopeBook = ScopeBook::default();
        for (program, sections) in programs {
            let Value::Object(sections) = sections else {
                debug!("skipping program '{program}': not an object");
                continue;
            };

            let record: ScopeRecord = sections
                .into_iter()
                .filter_map(|(category, values)| parse_category(&program, category, values))
                .collect();

            book.programs.insert(program, record);
        }

        Ok(book)
    }

    pub fn programs(&self) -> &BTreeMap<String, ScopeRecord> {
        &self.programs
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

fn parse_category(program: &str, category: String, values: Value) -> Option<(String, Vec<String>)> {
    let Value::Array(values) = values else {
        debug!("skipping '{program}/{category}': not an array");
        return None;
    };

    let strings: Vec<String> = values
        .into_iter()
        .filter_map(|value| match value {
            Value::String(raw) => Some(raw),
            other => {
                debug!("skipping non-string entry in '{program}/{category}': {other}");
                None
            }
        })
        .collect();

    Some((category, strings))
}

/// Reads a newline-delimited host list, skipping blank lines.
pub fn read_host_lines(path: &Path) -> Result<Vec<String>, ScoprError> {
    let raw: String = fs::read_to_string(path).map_err(|source| ScoprError::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
