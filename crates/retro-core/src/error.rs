use std::fmt;

use crate::graph::acyclic::CycleDetected;
use crate::graph::parse::ParseError;

/// Machine-readable error codes for every failure the CLI reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MalformedInput,
    SelfLoop,
    DuplicateEdge,
    CycleDetected,
    MatrixTooLarge,
    InputUnreadable,
    ConfigParseError,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MalformedInput => "E1001",
            Self::SelfLoop => "E1002",
            Self::DuplicateEdge => "E1003",
            Self::CycleDetected => "E2001",
            Self::MatrixTooLarge => "E3001",
            Self::InputUnreadable => "E5001",
            Self::ConfigParseError => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MalformedInput => "Malformed graph input",
            Self::SelfLoop => "Graph contains a self-loop",
            Self::DuplicateEdge => "Graph contains a duplicate edge",
            Self::CycleDetected => "Graph contains a cycle",
            Self::MatrixTooLarge => "Graph too large for a matrix view",
            Self::InputUnreadable => "Input could not be read",
            Self::ConfigParseError => "Config file parse error",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to the user.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::MalformedInput => {
                Some("Expect `n m` followed by m `v u` pairs with 0 <= v, u < n.")
            }
            Self::SelfLoop => Some("Remove edges whose endpoints are the same node."),
            Self::DuplicateEdge => Some("List each ordered edge `v u` only once."),
            Self::CycleDetected => {
                Some("Win/lose analysis needs an acyclic graph; remove an edge on the cycle.")
            }
            Self::MatrixTooLarge => {
                Some("Raise `max_size` under [matrix] in retro.toml, or use `retro solve`.")
            }
            Self::InputUnreadable => Some("Check the path and read permissions, or pick another file."),
            Self::ConfigParseError => Some("Fix syntax in retro.toml and retry."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Any failure that keeps a graph from being loaded for analysis.
///
/// Parsing and acyclicity validation both fail fast, so a `LoadError` always
/// describes the first violation found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Cycle(#[from] CycleDetected),
}

impl LoadError {
    /// Machine-readable code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Parse(err) => err.code(),
            Self::Cycle(_) => ErrorCode::CycleDetected,
        }
    }

    /// Remediation hint for this failure.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}
