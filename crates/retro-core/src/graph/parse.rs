//! Edge-list text parser.
//!
//! # Format
//!
//! ```text
//! n m
//! v_1 u_1
//! ...
//! v_m u_m
//! ```
//!
//! All values are non-negative integers separated by any whitespace; line
//! breaks carry no meaning. `n` is the node count (nodes are `0..n`), `m` the
//! edge count, and each pair `v u` is a move `v → u`.
//!
//! # Validation
//!
//! Checks run per edge, in read order, and the first violation aborts the
//! parse:
//!
//! 1. both endpoints present and integers ([`Malformed`]),
//! 2. both endpoints in `0..n` ([`Malformed::NodeOutOfRange`]),
//! 3. `v != u` ([`ParseError::SelfLoop`]),
//! 4. ordered pair not seen before ([`ParseError::DuplicateEdge`]).
//!
//! Anything after the `m`-th pair is rejected as trailing input.

use std::collections::HashSet;
use std::fmt;
use std::str::SplitWhitespace;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ErrorCode;
use crate::graph::Graph;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Which value the parser was trying to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    NodeCount,
    EdgeCount,
    /// Source of the edge with this 0-based index.
    EdgeSource(usize),
    /// Target of the edge with this 0-based index.
    EdgeTarget(usize),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeCount => write!(f, "node count"),
            Self::EdgeCount => write!(f, "edge count"),
            Self::EdgeSource(edge) => write!(f, "source of edge #{}", edge + 1),
            Self::EdgeTarget(edge) => write!(f, "target of edge #{}", edge + 1),
        }
    }
}

/// Ways the input text can fail to describe a graph at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Malformed {
    #[error("input ended before the {0}")]
    MissingToken(Token),

    #[error("{expected} is not a non-negative integer: '{token}'")]
    NotAnInteger { expected: Token, token: String },

    #[error("edge #{} refers to node {node}, but nodes are 0..{node_count}", .edge + 1)]
    NodeOutOfRange {
        edge: usize,
        node: usize,
        node_count: usize,
    },

    #[error("{count} unexpected token(s) after the last declared edge")]
    TrailingTokens { count: usize },

    #[error("node count {count} exceeds the limit of {limit}")]
    TooManyNodes { count: usize, limit: usize },

    #[error("edge count {count} exceeds the limit of {limit}")]
    TooManyEdges { count: usize, limit: usize },
}

/// Errors produced while turning text into a [`Graph`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("malformed input: {0}")]
    MalformedInput(#[from] Malformed),

    #[error("self-loop on node {node}")]
    SelfLoop { node: usize },

    #[error("duplicate edge {from} -> {to}")]
    DuplicateEdge { from: usize, to: usize },
}

impl ParseError {
    /// Machine-readable code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedInput(_) => ErrorCode::MalformedInput,
            Self::SelfLoop { .. } => ErrorCode::SelfLoop,
            Self::DuplicateEdge { .. } => ErrorCode::DuplicateEdge,
        }
    }
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Largest node count any parser accepts, configured limits or not.
pub const MAX_NODES: usize = 1 << 26;

/// Upper bounds on the header values, checked before anything is allocated.
///
/// `None` means no configured limit; node counts are still capped at
/// [`MAX_NODES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseLimits {
    #[serde(default)]
    pub max_nodes: Option<usize>,
    #[serde(default)]
    pub max_edges: Option<usize>,
}

impl ParseLimits {
    /// No limits at all.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_nodes: None,
            max_edges: None,
        }
    }

    fn check(self, node_count: usize, edge_count: usize) -> Result<(), Malformed> {
        match (self.max_nodes, self.max_edges) {
            (Some(limit), _) if node_count > limit => Err(Malformed::TooManyNodes {
                count: node_count,
                limit,
            }),
            (_, Some(limit)) if edge_count > limit => Err(Malformed::TooManyEdges {
                count: edge_count,
                limit,
            }),
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parser for the edge-list format, with optional size limits.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphParser {
    limits: ParseLimits,
}

impl GraphParser {
    /// A parser with no size limits.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            limits: ParseLimits::unlimited(),
        }
    }

    /// A parser that rejects headers above `limits`.
    #[must_use]
    pub const fn with_limits(limits: ParseLimits) -> Self {
        Self { limits }
    }

    /// The limits this parser enforces.
    #[must_use]
    pub const fn limits(&self) -> ParseLimits {
        self.limits
    }

    /// Parse `text` into a [`Graph`].
    ///
    /// # Errors
    ///
    /// Returns the first violation found; see the module docs for the order
    /// checks run in. No partial graph is ever returned.
    #[instrument(skip(self, text), fields(bytes = text.len()))]
    pub fn parse(&self, text: &str) -> Result<Graph, ParseError> {
        let mut tokens = Tokens::new(text);

        let node_count = tokens.next_number(Token::NodeCount)?;
        let edge_count = tokens.next_number(Token::EdgeCount)?;
        self.limits.check(node_count, edge_count)?;

        let mut builder = EdgeSetBuilder::new(node_count)?;
        for edge in 0..edge_count {
            let from = tokens.next_number(Token::EdgeSource(edge))?;
            let to = tokens.next_number(Token::EdgeTarget(edge))?;
            builder.add(edge, from, to)?;
        }

        let trailing = tokens.remaining();
        if trailing > 0 {
            return Err(Malformed::TrailingTokens { count: trailing }.into());
        }

        let graph = builder.finish();
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "parsed graph"
        );
        Ok(graph)
    }
}

/// Parse `text` with no size limits.
///
/// # Errors
///
/// See [`GraphParser::parse`].
pub fn parse(text: &str) -> Result<Graph, ParseError> {
    GraphParser::new().parse(text)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn next_number(&mut self, expected: Token) -> Result<usize, Malformed> {
        let token = self.inner.next().ok_or(Malformed::MissingToken(expected))?;
        token.parse::<usize>().map_err(|_| Malformed::NotAnInteger {
            expected,
            token: token.to_string(),
        })
    }

    fn remaining(self) -> usize {
        self.inner.count()
    }
}

/// Accumulates edges for one graph, enforcing range, self-loop, and
/// duplicate checks as each edge arrives.
pub(crate) struct EdgeSetBuilder {
    successors: Vec<Vec<usize>>,
    seen: HashSet<(usize, usize)>,
}

impl EdgeSetBuilder {
    /// Storage for `node_count` nodes.
    ///
    /// Fails instead of aborting when the count is above [`MAX_NODES`] or
    /// the allocation cannot be satisfied.
    pub(crate) fn new(node_count: usize) -> Result<Self, Malformed> {
        let too_many = || Malformed::TooManyNodes {
            count: node_count,
            limit: MAX_NODES,
        };
        if node_count > MAX_NODES {
            return Err(too_many());
        }

        let mut successors = Vec::new();
        successors
            .try_reserve_exact(node_count)
            .map_err(|_| too_many())?;
        successors.resize_with(node_count, Vec::new);

        Ok(Self {
            successors,
            seen: HashSet::new(),
        })
    }

    /// Add edge number `index` (0-based, used in error messages).
    pub(crate) fn add(&mut self, index: usize, from: usize, to: usize) -> Result<(), ParseError> {
        let node_count = self.successors.len();
        for node in [from, to] {
            if node >= node_count {
                return Err(Malformed::NodeOutOfRange {
                    edge: index,
                    node,
                    node_count,
                }
                .into());
            }
        }
        if from == to {
            return Err(ParseError::SelfLoop { node: from });
        }
        if !self.seen.insert((from, to)) {
            return Err(ParseError::DuplicateEdge { from, to });
        }
        self.successors[from].push(to);
        Ok(())
    }

    pub(crate) fn finish(self) -> Graph {
        Graph::from_successors(self.successors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed(text: &str) -> Malformed {
        match parse(text) {
            Err(ParseError::MalformedInput(inner)) => inner,
            other => panic!("expected malformed input for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn parses_chain() {
        let graph = parse("3 2\n0 1\n1 2").expect("valid");
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.adjacency(), &[vec![1], vec![2], vec![]]);
    }

    #[test]
    fn tokenization_ignores_line_structure() {
        let a = parse("3 2\n0 1\n1 2").expect("valid");
        let b = parse("  3\t2 0\n\n1 1   2 \n").expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn successors_keep_read_order() {
        let graph = parse("4 3\n0 3\n0 1\n0 2").expect("valid");
        assert_eq!(graph.successors(0), &[3, 1, 2]);
    }

    #[test]
    fn isolated_node() {
        let graph = parse("1 0").expect("valid");
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn empty_graph_is_valid() {
        let graph = parse("0 0").expect("valid");
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn self_loop_rejected() {
        assert_eq!(parse("2 1\n0 0"), Err(ParseError::SelfLoop { node: 0 }));
    }

    #[test]
    fn self_loop_rejected_among_valid_edges() {
        assert_eq!(
            parse("4 3\n0 1\n2 2\n1 3"),
            Err(ParseError::SelfLoop { node: 2 })
        );
    }

    #[test]
    fn duplicate_edge_rejected() {
        assert_eq!(
            parse("2 2\n0 1\n0 1"),
            Err(ParseError::DuplicateEdge { from: 0, to: 1 })
        );
    }

    #[test]
    fn opposite_directions_are_distinct_edges() {
        // 0 -> 1 and 1 -> 0 is a cycle, but not a duplicate.
        let graph = parse("2 2\n0 1\n1 0").expect("parses");
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn first_violation_wins() {
        // The self-loop comes before the duplicate.
        assert_eq!(
            parse("3 4\n0 1\n2 2\n0 1\n1 2"),
            Err(ParseError::SelfLoop { node: 2 })
        );
    }

    #[test]
    fn missing_header() {
        assert_eq!(malformed(""), Malformed::MissingToken(Token::NodeCount));
        assert_eq!(malformed("3"), Malformed::MissingToken(Token::EdgeCount));
    }

    #[test]
    fn missing_edge_tokens() {
        assert_eq!(
            malformed("3 2\n0 1"),
            Malformed::MissingToken(Token::EdgeSource(1))
        );
        assert_eq!(
            malformed("3 2\n0 1\n1"),
            Malformed::MissingToken(Token::EdgeTarget(1))
        );
    }

    #[test]
    fn non_integer_tokens() {
        assert_eq!(
            malformed("three 2"),
            Malformed::NotAnInteger {
                expected: Token::NodeCount,
                token: "three".to_string(),
            }
        );
        assert_eq!(
            malformed("3 1\n-1 2"),
            Malformed::NotAnInteger {
                expected: Token::EdgeSource(0),
                token: "-1".to_string(),
            }
        );
    }

    #[test]
    fn out_of_range_endpoint() {
        assert_eq!(
            malformed("2 1\n0 2"),
            Malformed::NodeOutOfRange {
                edge: 0,
                node: 2,
                node_count: 2,
            }
        );
    }

    #[test]
    fn range_checked_before_self_loop() {
        assert_eq!(
            malformed("1 1\n5 5"),
            Malformed::NodeOutOfRange {
                edge: 0,
                node: 5,
                node_count: 1,
            }
        );
    }

    #[test]
    fn trailing_tokens_rejected() {
        assert_eq!(
            malformed("2 1\n0 1\n1 0"),
            Malformed::TrailingTokens { count: 2 }
        );
    }

    #[test]
    fn limits_checked_on_header() {
        let parser = GraphParser::with_limits(ParseLimits {
            max_nodes: Some(2),
            max_edges: Some(1),
        });

        assert!(parser.parse("2 1\n0 1").is_ok());
        assert_eq!(
            parser.parse("3 0"),
            Err(ParseError::MalformedInput(Malformed::TooManyNodes {
                count: 3,
                limit: 2,
            }))
        );
        assert_eq!(
            parser.parse("2 2\n0 1\n1 0"),
            Err(ParseError::MalformedInput(Malformed::TooManyEdges {
                count: 2,
                limit: 1,
            }))
        );
    }

    #[test]
    fn huge_header_is_rejected_without_allocating() {
        assert_eq!(
            malformed("18446744073709551615 0"),
            Malformed::TooManyNodes {
                count: usize::MAX,
                limit: MAX_NODES,
            }
        );
        assert_eq!(
            malformed(&format!("{} 0", MAX_NODES + 1)),
            Malformed::TooManyNodes {
                count: MAX_NODES + 1,
                limit: MAX_NODES,
            }
        );
    }

    #[test]
    fn node_cap_applies_when_configured_limit_is_higher() {
        let parser = GraphParser::with_limits(ParseLimits {
            max_nodes: Some(usize::MAX),
            max_edges: None,
        });
        assert!(matches!(
            parser.parse("18446744073709551615 0"),
            Err(ParseError::MalformedInput(Malformed::TooManyNodes { .. }))
        ));
    }

    #[test]
    fn from_edges_rejects_huge_node_count() {
        assert_eq!(
            Graph::from_edges(usize::MAX, []),
            Err(ParseError::MalformedInput(Malformed::TooManyNodes {
                count: usize::MAX,
                limit: MAX_NODES,
            }))
        );
    }

    #[test]
    fn error_messages_are_readable() {
        let err = parse("2 1\n0 5").expect_err("out of range");
        assert_eq!(
            err.to_string(),
            "malformed input: edge #1 refers to node 5, but nodes are 0..2"
        );
        assert_eq!(
            parse("2 2\n0 1\n0 1").expect_err("dup").to_string(),
            "duplicate edge 0 -> 1"
        );
    }

    #[test]
    fn parsing_is_idempotent() {
        let text = "5 4\n0 1\n0 2\n2 3\n4 3";
        assert_eq!(parse(text), parse(text));
    }
}
