//! # Domain Normalization
//!
//! Turns a raw token into a canonical hostname.
//!
//! Accepted tokens become either a plain [`NormalizedDomain`] or a
//! [`WildcardPattern`] (its root plus the knowledge that any subdomain is in
//! scope). Anything else is rejected with `None`: scope descriptions are free
//! text and most of what looks like a domain in them is noise.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static DOMAIN_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z0-9-]+\.)+[a-z]{2,}$").expect("domain grammar is a valid regex")
});

/// Substrings that mark platform or package identifiers picked up by the
/// token shape. Entries starting with `^` only match at the start.
pub const DEFAULT_DENYLIST: &[&str] = &["node.js", "android", "ios", "localhost", "^com."];

const UNICODE_DASHES: &[char] = &['\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2212}'];

/// A lowercase hostname that satisfies the strict domain grammar.
///
/// Values only come out of [`Normalizer::normalize`] or the wildcard expander,
/// so holding one means the string is valid.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedDomain(String);

impl NormalizedDomain {
    /// The caller guarantees `host` already matches the domain grammar.
    pub(crate) fn from_validated(host: String) -> Self {
        debug_assert!(DOMAIN_SHAPE.is_match(&host), "{host} is not a valid domain");
        Self(host)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `*.root`: every subdomain of `root` is potentially in scope.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WildcardPattern {
    root: NormalizedDomain,
}

impl WildcardPattern {
    pub fn root(&self) -> &NormalizedDomain {
        &self.root
    }
}

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "*.{}", self.root)
    }
}

/// An accepted token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Candidate {
    Domain(NormalizedDomain),
    Wildcard(WildcardPattern),
}

impl Candidate {
    /// The hostname itself, or the root of a wildcard pattern.
    pub fn root(&self) -> &NormalizedDomain {
        match self {
            Candidate::Domain(domain) => domain,
            Candidate::Wildcard(pattern) => pattern.root(),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Candidate::Wildcard(_))
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Candidate::Domain(domain) => domain.fmt(f),
            Candidate::Wildcard(pattern) => pattern.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DenyRule {
    Contains(String),
    Prefix(String),
}

impl DenyRule {
    fn parse(entry: &str) -> Option<Self> {
        let entry: String = entry.trim().to_lowercase();
        match entry.strip_prefix('^') {
            Some("") => None,
            Some(prefix) => Some(DenyRule::Prefix(prefix.to_string())),
            None if entry.is_empty() => None,
            None => Some(DenyRule::Contains(entry)),
        }
    }

    fn matches(&self, host: &str) -> bool {
        match self {
            DenyRule::Contains(needle) => host.contains(needle.as_str()),
            DenyRule::Prefix(prefix) => host.starts_with(prefix.as_str()),
        }
    }
}

/// Substrings that disqualify a token from being a hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denylist {
    rules: Vec<DenyRule>,
}

impl Denylist {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut denylist: Denylist = Denylist { rules: Vec::new() };
        for entry in entries {
            denylist.push(entry.as_ref());
        }
        denylist
    }

    /// Adds an entry. Blank entries are ignored.
    pub fn push(&mut self, entry: &str) {
        if let Some(rule) = DenyRule::parse(entry)
            && !self.rules.contains(&rule)
        {
            self.rules.push(rule);
        }
    }

    pub fn rejects(&self, host: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(host))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Denylist::new(DEFAULT_DENYLIST)
    }
}

/// Canonicalizes raw tokens into hostnames.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    denylist: Denylist,
}

impl Normalizer {
    pub fn new(denylist: Denylist) -> Self {
        Self { denylist }
    }

    /// Normalizes `token`, returning `None` when it is not a usable hostname.
    ///
    /// Scheme, userinfo, port, path and query are dropped. A leading `*.`
    /// turns the result into a [`Candidate::Wildcard`] over the root domain.
    /// Normalizing the [`Display`](fmt::Display) form of an accepted
    /// candidate yields the same candidate.
    pub fn normalize(&self, token: &str) -> Option<Candidate> {
        let lowered: String = token.trim().to_lowercase();
        let authority: &str = authority_of(&lowered);

        let repaired: String = authority
            .chars()
            .filter(|c| *c != '\\')
            .map(|c| if UNICODE_DASHES.contains(&c) { '-' } else { c })
            .collect();

        let (is_wildcard, root) = strip_wildcard(&repaired);

        let host: String = root
            .chars()
            .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '.' | '-'))
            .collect();

        if self.denylist.rejects(&host) || !DOMAIN_SHAPE.is_match(&host) {
            return None;
        }

        let domain: NormalizedDomain = NormalizedDomain(host);
        if is_wildcard {
            Some(Candidate::Wildcard(WildcardPattern { root: domain }))
        } else {
            Some(Candidate::Domain(domain))
        }
    }
}

/// Keeps the host part of a URL-ish token: no scheme, path, query, fragment,
/// userinfo or port.
fn authority_of(token: &str) -> &str {
    let rest: &str = token.split_once("://").map_or(token, |(_, rest)| rest);
    let rest: &str = rest.trim_start_matches(|c: char| c == '/' || c.is_whitespace());

    let end: usize = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority: &str = &rest[..end];
    let host: &str = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

    match host.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => host,
    }
}

/// Splits a leading wildcard marker off `host`.
///
/// Any leading run of `*` and `.` that contains a `*` counts as the marker.
fn strip_wildcard(host: &str) -> (bool, &str) {
    let host: &str = host.trim();
    let marker_len: usize = host.len() - host.trim_start_matches(['*', '.']).len();
    let is_wildcard: bool = host[..marker_len].contains('*');
    let root: &str = host.trim_matches(|c: char| matches!(c, '*' | '.' | '/') || c.is_whitespace());
    (is_wildcard, root)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
