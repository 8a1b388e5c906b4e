//! Implementation of search algorithms.
//!
//! Every algorithm here is the same loop, `GraphSearch`, over a different
//! frontier:
//!
//! | Algorithm                | Frontier           | Ranking       |
//! |--------------------------|--------------------|---------------|
//! | Breadth-First Search     | `FifoFrontier`     | `Uninformed`  |
//! | Depth-First Search       | `LifoFrontier`     | `Uninformed`  |
//! | Greedy Best-First Search | `PriorityFrontier` | `Informed`    |

pub mod bfs;
pub mod dfs;
pub mod greedy;

use std::fmt::Debug;

use derive_more::Display;
use rustc_hash::FxHashSet;

use crate::data_structures::frontier::Frontier;
use crate::error::SearchError;
use crate::heuristic::Ranking;
use crate::path::Path;
use crate::search::Node;
use crate::search::NodeIndex;
use crate::search::SearchTree;
use crate::space::Graph;
use crate::space::State;
use crate::trace::TraceSink;

/// The available search algorithms.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[display("BFS")]
    BreadthFirst,
    #[display("DFS")]
    DepthFirst,
    #[display("Greedy")]
    GreedyBestFirst,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::GreedyBestFirst,
    ];

    /// Whether the algorithm needs a heuristic.
    pub fn is_informed(&self) -> bool {
        matches!(self, Algorithm::GreedyBestFirst)
    }

    /// The configuration each algorithm uses unless told otherwise.
    pub fn default_config(&self) -> SearchConfig {
        match self {
            Algorithm::BreadthFirst | Algorithm::DepthFirst => SearchConfig {
                duplicates: DuplicatePolicy::SkipQueued,
            },
            Algorithm::GreedyBestFirst => SearchConfig {
                duplicates: DuplicatePolicy::VisitedOnly,
            },
        }
    }
}

/// What to do with a neighbour that is already waiting in the frontier.
///
/// Both policies find paths, visited States are never expanded twice either
/// way. They differ in frontier growth, and in which of several equally ranked
/// Nodes for a State gets expanded.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Eq, Hash)]
pub enum DuplicatePolicy {
    /// Only skip visited neighbours. A State may be queued many times.
    #[default]
    #[display("visited-only")]
    VisitedOnly,
    /// Also skip neighbours that are already queued.
    #[display("skip-queued")]
    SkipQueued,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchConfig {
    pub duplicates: DuplicatePolicy,
}

/// Where a search is at.
///
/// `Exploring` is the only non-terminal status.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    Exploring,
    /// The goal was expanded, there's a Path.
    Found,
    /// The frontier ran out, the goal is unreachable.
    Exhausted,
    /// The search stopped on a malformed input.
    Aborted,
}

/// A search from a start State to a goal State over a `Graph`.
///
/// The frontier policy `F` and ranking `R` define the algorithm. See
/// `BreadthFirstSearch`, `DepthFirstSearch` and `GreedyBestFirstSearch`.
pub struct GraphSearch<'g, St, G, F, R, T = ()>
where
    St: State,
    G: Graph<St>,
    F: Frontier<R::Priority>,
    R: Ranking<St>,
    T: TraceSink<St>,
{
    /// All the Search Nodes. Naturally forms a Search Forest as each node may
    /// have a parent Node.
    search_tree: SearchTree<St, R::Priority>,

    /// Discovered, not yet expanded Nodes.
    open: F,

    /// The visited set, States that were fully expanded.
    closed: FxHashSet<St>,

    /// States with a Node in `open`. Only kept with `DuplicatePolicy::SkipQueued`,
    /// and then each State has at most one Node waiting.
    queued: FxHashSet<St>,

    /// The start State, until the first step pushes its Node.
    start: Option<St>,
    goal: St,
    graph: &'g G,
    ranking: R,
    trace: T,
    config: SearchConfig,

    status: SearchStatus,
    path: Option<Path<St>>,
    error: Option<SearchError<St>>,

    /// Number of States expanded so far.
    expanded: usize,
    /// Number of popped Nodes dropped because their State was already visited.
    discarded: usize,
}

impl<'g, St, G, F, R> GraphSearch<'g, St, G, F, R, ()>
where
    St: State,
    G: Graph<St>,
    F: Frontier<R::Priority>,
    R: Ranking<St>,
{
    /// Prepares a search, without exploring anything yet.
    #[must_use]
    pub fn with_ranking(start: St, goal: St, graph: &'g G, ranking: R) -> Self {
        log::debug!("Searching from {start:?} to {goal:?}");
        Self {
            search_tree: SearchTree::new(),
            open: F::default(),
            closed: FxHashSet::default(),
            queued: FxHashSet::default(),

            start: Some(start),
            goal,
            graph,
            ranking,
            trace: (),
            config: SearchConfig::default(),

            status: SearchStatus::Exploring,
            path: None,
            error: None,

            expanded: 0usize,
            discarded: 0usize,
        }
    }
}

impl<'g, St, G, F, R, T> GraphSearch<'g, St, G, F, R, T>
where
    St: State,
    G: Graph<St>,
    F: Frontier<R::Priority>,
    R: Ranking<St>,
    T: TraceSink<St>,
{
    /// Sends expansion events to `trace`.
    ///
    /// Set it before stepping, earlier events are not replayed.
    #[must_use]
    pub fn with_trace<T2: TraceSink<St>>(self, trace: T2) -> GraphSearch<'g, St, G, F, R, T2> {
        debug_assert_eq!(self.expanded, 0, "Trace set on a running search");
        GraphSearch {
            search_tree: self.search_tree,
            open: self.open,
            closed: self.closed,
            queued: self.queued,

            start: self.start,
            goal: self.goal,
            graph: self.graph,
            ranking: self.ranking,
            trace,
            config: self.config,

            status: self.status,
            path: self.path,
            error: self.error,

            expanded: self.expanded,
            discarded: self.discarded,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        debug_assert!(self.search_tree.is_empty(), "Config set on a running search");
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_duplicate_policy(mut self, duplicates: DuplicatePolicy) -> Self {
        debug_assert!(self.search_tree.is_empty(), "Config set on a running search");
        self.config.duplicates = duplicates;
        self
    }

    /// Runs the search until it finds the goal or runs out of States.
    ///
    /// `Ok(None)` means the goal is unreachable. Once the search is over, the
    /// same outcome is returned again.
    pub fn find_path(&mut self) -> Result<Option<Path<St>>, SearchError<St>> {
        #[cfg(feature = "coz_profile")]
        coz::scope!("FindPath");

        while self.step()? == SearchStatus::Exploring {}
        Ok(self.path.clone())
    }

    /// Pops one Node from the frontier, expanding it if it's new.
    ///
    /// Allows driving the search with an external budget.
    pub fn step(&mut self) -> Result<SearchStatus, SearchError<St>> {
        match self.status {
            SearchStatus::Exploring => {}
            SearchStatus::Aborted => {
                return match &self.error {
                    Some(e) => Err(e.clone()),
                    None => unreachable!("Aborted searches keep their error"),
                };
            }
            status => return Ok(status),
        }

        match self.try_step() {
            Ok(status) => Ok(status),
            Err(e) => {
                log::warn!("Search aborted after {} expansions. {e}", self.expanded);
                self.status = SearchStatus::Aborted;
                self.open.clear();
                self.queued.clear();
                self.trace.aborted(&e);
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn try_step(&mut self) -> Result<SearchStatus, SearchError<St>> {
        if let Some(start) = self.start.take() {
            self.push_new(start, None)?;
        }

        let Some(node_index) = self.open.extract_next() else {
            log::debug!(
                "No path to {:?}. Expanded {} States",
                self.goal,
                self.expanded
            );
            self.status = SearchStatus::Exhausted;
            self.trace.finished(None);
            return Ok(self.status);
        };

        #[cfg(feature = "coz_profile")]
        coz::scope!("NodeExpansion");

        let state = self.search_tree[node_index].state().clone();
        if self.config.duplicates == DuplicatePolicy::SkipQueued {
            self.queued.remove(&state);
        }

        // Already expanded through another Node.
        if self.closed.contains(&state) {
            self.discarded += 1;
            return Ok(SearchStatus::Exploring);
        }

        // Mark as closed
        self.closed.insert(state.clone());
        log::trace!("Expanding #{} {state:?}", self.expanded);
        self.trace.expanded(&state, self.expanded);
        self.expanded += 1;

        if state == self.goal {
            let path = self.search_tree.path(node_index);
            log::debug!(
                "Found {path}. Expanded {} States, generated {} Nodes",
                self.expanded,
                self.search_tree.len()
            );
            self.trace.finished(Some(&path));
            self.path = Some(path);
            self.status = SearchStatus::Found;
            return Ok(self.status);
        }

        // Expand state
        let graph = self.graph;
        let neighbours = graph
            .neighbours(&state)
            .ok_or_else(|| SearchError::MissingAdjacencyEntry {
                state: state.clone(),
            })?;
        for s in neighbours {
            if self.closed.contains(s) {
                continue;
            }
            if self.config.duplicates == DuplicatePolicy::SkipQueued && self.queued.contains(s) {
                continue;
            }
            self.push_new(s.clone(), Some(node_index))?;
        }

        Ok(SearchStatus::Exploring)
    }

    #[inline(always)]
    fn push_new(&mut self, s: St, parent: Option<NodeIndex>) -> Result<(), SearchError<St>> {
        let priority = self.ranking.rank(&s)?;
        if self.config.duplicates == DuplicatePolicy::SkipQueued {
            self.queued.insert(s.clone());
        }
        let node_index = self
            .search_tree
            .push(Node::new_ranked(s, parent, priority));
        self.open.insert(node_index, priority);
        Ok(())
    }

    #[must_use]
    pub fn status(&self) -> SearchStatus {
        self.status
    }
    #[must_use]
    pub fn goal(&self) -> &St {
        &self.goal
    }
    #[must_use]
    pub fn config(&self) -> SearchConfig {
        self.config
    }
    /// Whether `s` was already expanded.
    #[must_use]
    pub fn is_visited(&self, s: &St) -> bool {
        self.closed.contains(s)
    }
    /// Number of States expanded so far.
    #[must_use]
    pub fn expanded(&self) -> usize {
        self.expanded
    }
    /// Number of Nodes created so far.
    #[must_use]
    pub fn generated(&self) -> usize {
        self.search_tree.len()
    }
    /// Number of popped Nodes dropped because their State was already visited.
    #[must_use]
    pub fn discarded(&self) -> usize {
        self.discarded
    }
    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.open.len()
    }

    pub fn trace(&self) -> &T {
        &self.trace
    }
    pub fn into_trace(self) -> T {
        self.trace
    }

    pub fn write_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use size::Size;
        use std::mem::size_of;
        use thousands::Separable;

        writeln!(out, "Search Stats ({}):", self.status)?;
        let s = size_of::<Node<St, R::Priority>>();
        let l = self.search_tree.len();
        writeln!(
            out,
            "  - |Nodes|:     {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Open|:      {} ({})",
            self.open.len().separate_with_commas(),
            Size::from_bytes(self.open.allocated_bytes())
        )?;
        let s = size_of::<St>();
        let l = self.closed.len();
        let c = self.closed.capacity();
        writeln!(
            out,
            "  - |Closed|:    {} ({})",
            l.separate_with_commas(),
            Size::from_bytes(l * s)
        )?;
        writeln!(
            out,
            "  - |Closed|*:   {} ({})",
            c.separate_with_commas(),
            Size::from_bytes(c * s)
        )?;
        writeln!(
            out,
            "  - Expanded:    {}",
            self.expanded.separate_with_commas()
        )?;
        writeln!(
            out,
            "  - Discarded:   {}",
            self.discarded.separate_with_commas()
        )?;

        Ok(())
    }
}

impl<St, G, F, R, T> Debug for GraphSearch<'_, St, G, F, R, T>
where
    St: State,
    G: Graph<St>,
    F: Frontier<R::Priority>,
    R: Ranking<St>,
    T: TraceSink<St>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphSearch")
            .field("goal", &self.goal)
            .field("status", &self.status)
            .field("config", &self.config)
            .field("search_tree", &self.search_tree)
            .field("open", &self.open)
            .field("expanded", &self.expanded)
            .field("ranking", &self.ranking)
            .finish_non_exhaustive()
    }
}
