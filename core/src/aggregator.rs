//! # Result Aggregation
//!
//! Reduces a protocol's probe results to its active set and persists it as a
//! sorted, newline-delimited file.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use scopr_common::{
    error::ScoprError,
    probe::{ProbeResult, Protocol},
};

/// Hosts confirmed reachable for one protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSet {
    protocol: Protocol,
    entries: BTreeSet<String>,
}

impl ActiveSet {
    pub fn new(protocol: Protocol) -> Self {
        Self {
            protocol,
            entries: BTreeSet::new(),
        }
    }

    /// Keeps the reachable results of `protocol`, ignoring everything else.
    pub fn from_results<'a, I>(protocol: Protocol, results: I) -> Self
    where
        I: IntoIterator<Item = &'a ProbeResult>,
    {
        let mut set: ActiveSet = ActiveSet::new(protocol);
        for result in results {
            set.insert(result);
        }
        set
    }

    /// Records `result` if it is a reachable result of this set's protocol.
    /// Returns whether a new entry was added.
    pub fn insert(&mut self, result: &ProbeResult) -> bool {
        if result.target.protocol != self.protocol || !result.is_reachable() {
            return false;
        }
        self.entries.insert(result.target.entry())
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Entries in lexicographic order.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn write(&self, path: &Path) -> Result<(), ScoprError> {
        write_lines(path, self.entries())
    }

    /// Writes to the protocol's conventional file name inside `dir`.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ScoprError> {
        let file_name: &str = self.protocol.output_file().unwrap_or("domains.txt");
        let path: PathBuf = dir.join(file_name);
        self.write(&path)?;
        Ok(path)
    }
}

/// Writes one line per item, each terminated by `\n`. No items, empty file.
pub fn write_lines<I, S>(path: &Path, lines: I) -> Result<(), ScoprError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut contents: String = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
        contents.push('\n');
    }

    fs::write(path, contents).map_err(|source| ScoprError::OutputUnwritable {
        path: path.to_path_buf(),
        source,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
