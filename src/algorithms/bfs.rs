//! Breadth-First Search.
//!
//! Expands States level by level, so the first Path found to the goal has the
//! fewest possible edges.

use crate::data_structures::frontier::FifoFrontier;
use crate::error::SearchError;
use crate::heuristic::Uninformed;
use crate::path::Path;
use crate::space::Graph;
use crate::space::State;
use crate::trace::TraceSink;

use super::Algorithm;
use super::GraphSearch;

pub type BreadthFirstSearch<'g, St, G, T = ()> =
    GraphSearch<'g, St, G, FifoFrontier, Uninformed, T>;

impl<'g, St, G> BreadthFirstSearch<'g, St, G>
where
    St: State,
    G: Graph<St>,
{
    #[must_use]
    pub fn new(start: St, goal: St, graph: &'g G) -> Self {
        GraphSearch::with_ranking(start, goal, graph, Uninformed)
            .with_config(Algorithm::BreadthFirst.default_config())
    }
}

/// Finds a Path with the fewest edges from `start` to `goal`.
///
/// ```
/// use graph_search::algorithms::bfs::breadth_first_search;
/// use graph_search::space::AdjacencyMap;
///
/// let graph = AdjacencyMap::from([(1, vec![2, 3]), (2, vec![4]), (3, vec![]), (4, vec![])]);
/// let path = breadth_first_search(1, 4, &graph).unwrap().unwrap();
/// assert_eq!(path.states(), &[1, 2, 4]);
/// assert_eq!(breadth_first_search(3, 1, &graph), Ok(None));
/// ```
pub fn breadth_first_search<St, G>(
    start: St,
    goal: St,
    graph: &G,
) -> Result<Option<Path<St>>, SearchError<St>>
where
    St: State,
    G: Graph<St>,
{
    BreadthFirstSearch::new(start, goal, graph).find_path()
}

/// Like `breadth_first_search`, reporting expansions to `trace`.
pub fn breadth_first_search_traced<St, G, T>(
    start: St,
    goal: St,
    graph: &G,
    trace: T,
) -> Result<Option<Path<St>>, SearchError<St>>
where
    St: State,
    G: Graph<St>,
    T: TraceSink<St>,
{
    BreadthFirstSearch::new(start, goal, graph)
        .with_trace(trace)
        .find_path()
}
