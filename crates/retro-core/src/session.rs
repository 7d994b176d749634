//! Load / reset / recompute state for interactive front ends.
//!
//! A [`Session`] holds at most one validated graph and the solution computed
//! for it. Every mutation goes through `&mut self` and either completes or
//! leaves the previous state untouched, so anything reading the session
//! never sees a half-loaded graph or labels from a different graph.

use tracing::{debug, info, instrument};

use crate::error::LoadError;
use crate::graph::{Dag, GraphParser};
use crate::load;
use crate::solve::{Labels, Trace, solve_traced};

/// Labels and trace for the loaded graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub labels: Labels,
    pub trace: Trace,
}

#[derive(Debug)]
struct Loaded {
    dag: Dag,
    content_hash: String,
    solution: Option<Solution>,
}

/// Holds at most one validated graph and its cached solution.
///
/// A successful load replaces the previous graph. A failed load keeps it.
#[derive(Debug, Default)]
pub struct Session {
    parser: GraphParser,
    loaded: Option<Loaded>,
}

impl Session {
    /// Empty session with an unlimited parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty session that loads through `parser`.
    #[must_use]
    pub const fn with_parser(parser: GraphParser) -> Self {
        Self {
            parser,
            loaded: None,
        }
    }

    /// Parse and validate `text`, replacing the loaded graph on success.
    ///
    /// Reloading a graph identical to the current one keeps its cached
    /// solution.
    ///
    /// # Errors
    ///
    /// Returns the first parse or cycle violation. The session is unchanged
    /// in that case.
    #[instrument(skip_all)]
    pub fn load(&mut self, text: &str) -> Result<(), LoadError> {
        let dag = load(&self.parser, text)?;
        let content_hash = dag.graph().content_hash();

        let reuse = self
            .loaded
            .as_ref()
            .is_some_and(|current| current.content_hash == content_hash);
        if reuse {
            debug!(%content_hash, "same graph reloaded; keeping solution");
        } else {
            info!(
                nodes = dag.node_count(),
                edges = dag.graph().edge_count(),
                %content_hash,
                "graph loaded"
            );
            self.loaded = Some(Loaded {
                dag,
                content_hash,
                solution: None,
            });
        }
        Ok(())
    }

    /// Drop the loaded graph and its solution.
    ///
    /// Returns `true` if anything was loaded.
    pub fn reset(&mut self) -> bool {
        let was_loaded = self.loaded.take().is_some();
        if was_loaded {
            info!("session reset");
        } else {
            debug!("nothing to reset");
        }
        was_loaded
    }

    /// Solve the loaded graph, reusing the cached result when present.
    ///
    /// Returns `None` when nothing is loaded.
    pub fn analyze(&mut self) -> Option<&Solution> {
        let loaded = self.loaded.as_mut()?;
        if loaded.solution.is_none() {
            let (labels, trace) = solve_traced(&loaded.dag);
            loaded.solution = Some(Solution { labels, trace });
        }
        loaded.solution.as_ref()
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// The loaded graph, if any.
    #[must_use]
    pub fn dag(&self) -> Option<&Dag> {
        self.loaded.as_ref().map(|loaded| &loaded.dag)
    }

    /// Content hash of the loaded graph, if any.
    #[must_use]
    pub fn content_hash(&self) -> Option<&str> {
        self.loaded
            .as_ref()
            .map(|loaded| loaded.content_hash.as_str())
    }
}
