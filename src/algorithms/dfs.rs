//! Depth-First Search.
//!
//! Follows the most recently discovered State first. It finds a Path whenever
//! there is one, but not necessarily a short one. Neighbours are expanded in the
//! reverse of their listed order, as the last one pushed is popped first.

use crate::data_structures::frontier::LifoFrontier;
use crate::error::SearchError;
use crate::heuristic::Uninformed;
use crate::path::Path;
use crate::space::Graph;
use crate::space::State;
use crate::trace::TraceSink;

use super::Algorithm;
use super::GraphSearch;

pub type DepthFirstSearch<'g, St, G, T = ()> =
    GraphSearch<'g, St, G, LifoFrontier, Uninformed, T>;

impl<'g, St, G> DepthFirstSearch<'g, St, G>
where
    St: State,
    G: Graph<St>,
{
    #[must_use]
    pub fn new(start: St, goal: St, graph: &'g G) -> Self {
        GraphSearch::with_ranking(start, goal, graph, Uninformed)
            .with_config(Algorithm::DepthFirst.default_config())
    }
}

/// Finds some Path from `start` to `goal`.
pub fn depth_first_search<St, G>(
    start: St,
    goal: St,
    graph: &G,
) -> Result<Option<Path<St>>, SearchError<St>>
where
    St: State,
    G: Graph<St>,
{
    DepthFirstSearch::new(start, goal, graph).find_path()
}

/// Like `depth_first_search`, reporting expansions to `trace`.
pub fn depth_first_search_traced<St, G, T>(
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
    DepthFirstSearch::new(start, goal, graph)
        .with_trace(trace)
        .find_path()
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::algorithms::DuplicatePolicy;
    use crate::algorithms::bfs::breadth_first_search;
    use crate::problems::letters::tree_graph;
    use crate::problems::random::random_graph;
    use crate::space::AdjacencyMap;
    use crate::trace::Trace;

    #[test]
    fn finds_letter_tree_path() {
        let graph = tree_graph();
        let mut trace = Trace::new();
        let path = depth_first_search_traced('A', 'H', &graph, &mut trace)
            .unwrap()
            .unwrap();

        assert_eq!(path.states(), &['A', 'B', 'E', 'H']);
        // C was pushed last, so it goes first. Same for G over F.
        assert_eq!(trace.expansions(), &['A', 'C', 'G', 'F', 'B', 'E', 'H']);
    }

    #[test]
    fn neighbour_order_picks_the_path() {
        // Two ways into D.
        let graph = AdjacencyMap::from([
            ('A', vec!['B', 'C']),
            ('B', vec!['D']),
            ('C', vec!['D']),
            ('D', vec![]),
        ]);
        let path = depth_first_search('A', 'D', &graph).unwrap().unwrap();
        assert_eq!(path.states(), &['A', 'C', 'D']);

        let swapped = AdjacencyMap::from([
            ('A', vec!['C', 'B']),
            ('B', vec!['D']),
            ('C', vec!['D']),
            ('D', vec![]),
        ]);
        let path = depth_first_search('A', 'D', &swapped).unwrap().unwrap();
        assert_eq!(path.states(), &['A', 'B', 'D']);
    }

    #[test]
    fn queued_neighbours_keep_their_parent() {
        // A reaches C directly, and through B, which is listed last.
        let graph = AdjacencyMap::from([('A', vec!['C', 'B']), ('B', vec!['C']), ('C', vec![])]);

        // C is still queued when B is expanded.
        let path = depth_first_search('A', 'C', &graph).unwrap().unwrap();
        assert_eq!(path.states(), &['A', 'C']);

        // Queueing C again from B puts it on top of the stack.
        let path = DepthFirstSearch::new('A', 'C', &graph)
            .with_duplicate_policy(DuplicatePolicy::VisitedOnly)
            .find_path()
            .unwrap()
            .unwrap();
        assert_eq!(path.states(), &['A', 'B', 'C']);
    }

    #[test]
    fn start_is_goal_and_unreachable() {
        let graph = AdjacencyMap::from([('X', vec![]), ('Y', vec!['X'])]);
        assert_eq!(
            depth_first_search('X', 'X', &graph).unwrap().map(Path::into_states),
            Some(vec!['X'])
        );
        assert_eq!(depth_first_search('X', 'Y', &graph), Ok(None));
    }

    #[test]
    fn missing_entry_fails_on_expansion() {
        let graph = AdjacencyMap::from([('A', vec!['B'])]);
        assert_eq!(
            depth_first_search('A', 'B', &graph).map(|p| p.map(|p| p.len())),
            Ok(Some(2))
        );
        assert_eq!(
            depth_first_search('A', 'C', &graph),
            Err(SearchError::MissingAdjacencyEntry { state: 'B' })
        );
    }

    #[test]
    fn agrees_with_bfs_on_reachability() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let graph = random_graph(&mut rng, 30, 2);
            for goal in 0..30u32 {
                let bfs = breadth_first_search(0u32, goal, &graph).unwrap();
                for duplicates in [DuplicatePolicy::SkipQueued, DuplicatePolicy::VisitedOnly] {
                    let dfs = DepthFirstSearch::new(0u32, goal, &graph)
                        .with_duplicate_policy(duplicates)
                        .find_path()
                        .unwrap();
                    assert_eq!(bfs.is_some(), dfs.is_some());
                    if let (Some(bfs), Some(dfs)) = (&bfs, &dfs) {
                        assert!(dfs.is_valid_in(&graph));
                        assert!(!dfs.has_repeated_states());
                        assert!(bfs.len() <= dfs.len());
                        assert_eq!(dfs.end(), &goal);
                    }
                }
            }
        }
    }

    #[test]
    fn deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let graph = random_graph(&mut rng, 200, 4);

        let mut first = Trace::new();
        let mut second = Trace::new();
        let a = depth_first_search_traced(0u32, 199, &graph, &mut first).unwrap();
        let b = depth_first_search_traced(0u32, 199, &graph, &mut second).unwrap();
        assert_eq!(a, b);
        assert_eq!(first, second);

        // No State is expanded twice.
        let mut expansions = first.expansions().to_vec();
        expansions.sort();
        expansions.dedup();
        assert_eq!(expansions.len(), first.expansions().len());
    }
}
