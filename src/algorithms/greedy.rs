//! Greedy Best-First Search.
//!
//! Always expands the discovered State that the heuristic deems closest to the
//! goal, ignoring how far it is from the start. Paths found are not guaranteed
//! to be short. States with equal estimates are expanded in discovery order.

use crate::data_structures::priority_heap::PriorityFrontier;
use crate::error::SearchError;
use crate::heuristic::Heuristic;
use crate::heuristic::Informed;
use crate::path::Path;
use crate::space::Graph;
use crate::space::State;
use crate::trace::TraceSink;

use super::Algorithm;
use super::GraphSearch;

pub type GreedyBestFirstSearch<'g, 'h, St, G, Hr, T = ()> = GraphSearch<
    'g,
    St,
    G,
    PriorityFrontier<<Hr as Heuristic<St>>::Value>,
    Informed<'h, Hr>,
    T,
>;

impl<'g, 'h, St, G, Hr> GreedyBestFirstSearch<'g, 'h, St, G, Hr>
where
    St: State,
    G: Graph<St>,
    Hr: Heuristic<St>,
{
    #[must_use]
    pub fn new(start: St, goal: St, graph: &'g G, heuristic: &'h Hr) -> Self {
        GraphSearch::with_ranking(start, goal, graph, Informed::new(heuristic))
            .with_config(Algorithm::GreedyBestFirst.default_config())
    }
}

/// Finds some Path from `start` to `goal`, guided by `heuristic`.
///
/// Every State the search discovers, `start` included, needs an estimate.
///
/// ```
/// use graph_search::algorithms::greedy::greedy_best_first_search;
/// use graph_search::error::SearchError;
/// use graph_search::space::AdjacencyMap;
/// use std::collections::HashMap;
///
/// let graph = AdjacencyMap::from([(1, vec![2, 3]), (2, vec![]), (3, vec![4]), (4, vec![])]);
/// let h = HashMap::from([(1, 2u8), (2, 1), (3, 1), (4, 0)]);
/// let path = greedy_best_first_search(1, 4, &graph, &h).unwrap().unwrap();
/// assert_eq!(path.states(), &[1, 3, 4]);
///
/// let partial = HashMap::from([(1, 2u8)]);
/// assert_eq!(
///     greedy_best_first_search(1, 4, &graph, &partial),
///     Err(SearchError::MissingHeuristicEntry { state: 2 })
/// );
/// ```
pub fn greedy_best_first_search<St, G, Hr>(
    start: St,
    goal: St,
    graph: &G,
    heuristic: &Hr,
) -> Result<Option<Path<St>>, SearchError<St>>
where
    St: State,
    G: Graph<St>,
    Hr: Heuristic<St>,
{
    GreedyBestFirstSearch::new(start, goal, graph, heuristic).find_path()
}

/// Like `greedy_best_first_search`, reporting expansions to `trace`.
pub fn greedy_best_first_search_traced<St, G, Hr, T>(
    start: St,
    goal: St,
    graph: &G,
    heuristic: &Hr,
    trace: T,
) -> Result<Option<Path<St>>, SearchError<St>>
where
    St: State,
    G: Graph<St>,
    Hr: Heuristic<St>,
    T: TraceSink<St>,
{
    GreedyBestFirstSearch::new(start, goal, graph, heuristic)
        .with_trace(trace)
        .find_path()
}
