use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Conditions that abort a run before any output is written.
#[derive(Debug, Error)]
pub enum ScoprError {
    #[error("cannot read input file '{}'", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input file '{}' is not valid JSON", path.display())]
    InputMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("scope book must be a JSON object keyed by program")]
    NotAnObject,

    #[error("cannot write output file '{}'", path.display())]
    OutputUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a liveness check came back negative.
///
/// These are expected outcomes, not errors: most candidate hosts fail one way
/// or another.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    #[error("no answer within {0:?}")]
    Timeout(Duration),

    #[error("host did not resolve to an IPv4 address")]
    Unresolved,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("answered with status {0}")]
    Status(u16),

    #[error("probe task failed: {0}")]
    TaskFailed(String),
}

/// Rejected entries of the wildcard label dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("wildcard labels cannot be empty")]
    Empty,

    #[error("'{0}' is not a valid subdomain label")]
    Invalid(String),
}
