//! # Wildcard Expansion
//!
//! A wildcard pattern cannot be probed directly, so it is over-approximated
//! with the root domain plus a fixed dictionary of operationally common
//! subdomain labels. Whether those hosts exist is left to the prober.

use std::collections::BTreeSet;

use crate::error::LabelError;
use crate::scope::domain::{Candidate, NormalizedDomain};

pub const DEFAULT_LABELS: &[&str] = &[
    "www",
    "api",
    "app",
    "dev",
    "staging",
    "test",
    "portal",
    "login",
    "dashboard",
    "beta",
    "mail",
    "cdn",
];

/// Ordered, duplicate-free list of subdomain labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDictionary {
    labels: Vec<String>,
}

impl LabelDictionary {
    pub fn new<I, S>(labels: I) -> Result<Self, LabelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary: LabelDictionary = LabelDictionary { labels: Vec::new() };
        dictionary.extend(labels)?;
        Ok(dictionary)
    }

    /// Appends labels, skipping ones already present.
    pub fn extend<I, S>(&mut self, labels: I) -> Result<(), LabelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for label in labels {
            let label: String = validate_label(label.as_ref())?;
            if !self.labels.contains(&label) {
                self.labels.push(label);
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for LabelDictionary {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|label| label.to_string()).collect(),
        }
    }
}

fn validate_label(label: &str) -> Result<String, LabelError> {
    let label: String = label.trim().to_lowercase();
    if label.is_empty() {
        return Err(LabelError::Empty);
    }

    let well_formed: bool = label
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '-'));
    if !well_formed {
        return Err(LabelError::Invalid(label));
    }

    Ok(label)
}

/// Expands candidates into concrete hostnames.
#[derive(Debug, Clone, Copy)]
pub struct Expander<'a> {
    labels: &'a LabelDictionary,
}

impl<'a> Expander<'a> {
    pub fn new(labels: &'a LabelDictionary) -> Self {
        Self { labels }
    }

    /// `{root} ∪ {label.root}` for a wildcard, `{domain}` otherwise.
    pub fn expand(&self, candidate: &Candidate) -> BTreeSet<NormalizedDomain> {
        let mut hosts: BTreeSet<NormalizedDomain> = BTreeSet::new();
        match candidate {
            Candidate::Domain(domain) => {
                hosts.insert(domain.clone());
            }
            Candidate::Wildcard(pattern) => {
                let root: &NormalizedDomain = pattern.root();
                hosts.insert(root.clone());
                hosts.extend(
                    self.labels
                        .iter()
                        .map(|label| NormalizedDomain::from_validated(format!("{label}.{root}"))),
                );
            }
        }
        hosts
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
