//! Builds the deduplicated host set from the pipeline inputs.

use std::collections::BTreeSet;

use rayon::prelude::*;
use scopr_common::{
    config::Config,
    scope::{
        domain::{Candidate, NormalizedDomain, Normalizer},
        record::ScopeBook,
        token,
        wildcard::Expander,
    },
    warn,
};
use tracing::trace;

/// Every accepted candidate found anywhere in `book`.
///
/// Programs are scanned in parallel; the result is a set, so order and
/// duplicates across programs do not matter.
pub fn candidates_from_book(book: &ScopeBook, normalizer: &Normalizer) -> BTreeSet<Candidate> {
    book.programs()
        .par_iter()
        .flat_map_iter(|(_program, record)| {
            record
                .values()
                .flatten()
                .flat_map(|raw| token::extract(raw))
                .filter_map(|token| {
                    let candidate: Option<Candidate> = normalizer.normalize(token);
                    if candidate.is_none() {
                        trace!("rejected token '{token}'");
                    }
                    candidate
                })
                .collect::<Vec<Candidate>>()
        })
        .collect()
}

/// Expands every candidate and merges the results.
pub fn expand_all<'a, I>(candidates: I, expander: &Expander<'_>) -> BTreeSet<NormalizedDomain>
where
    I: IntoIterator<Item = &'a Candidate>,
{
    candidates
        .into_iter()
        .flat_map(|candidate| expander.expand(candidate))
        .collect()
}

/// Normalizes the lines of a host list. Wildcard lines are expanded and
/// rejected lines are reported and skipped.
pub fn hosts_from_lines<S>(lines: &[S], cfg: &Config) -> BTreeSet<NormalizedDomain>
where
    S: AsRef<str>,
{
    let normalizer: Normalizer = cfg.normalizer();
    let expander: Expander = cfg.expander();

    let candidates: BTreeSet<Candidate> = lines
        .iter()
        .filter_map(|line| {
            let line: &str = line.as_ref();
            let candidate: Option<Candidate> = normalizer.normalize(line);
            if candidate.is_none() {
                warn!("skipping '{line}': not a valid hostname");
            }
            candidate
        })
        .collect();

    expand_all(&candidates, &expander)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
