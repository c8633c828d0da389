//! # Scope Model
//!
//! Everything between a raw scope disclosure and a set of concrete hostnames:
//!
//! * [`record`]: the externally produced `programs.json` book and `domains.txt` lists.
//! * [`token`]: finds domain-shaped substrings in free text.
//! * [`domain`]: normalizes a token into a [`domain::NormalizedDomain`] or a
//!   wildcard pattern, or rejects it.
//! * [`wildcard`]: expands wildcard patterns with a fixed label dictionary.

pub mod domain;
pub mod record;
pub mod token;
pub mod wildcard;
