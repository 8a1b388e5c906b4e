use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::BuildHasher;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

/// A value in the search space, a vertex of the searched graph.
///
/// Nothing about its structure is assumed. Nodes keep their own copy, so cheap
/// `Clone` types (`char`, `&str`, integer ids) work best.
pub trait State: Clone + Debug + Eq + Hash {}
impl<T> State for T where T: Clone + Debug + Eq + Hash {}

/// The edge relation searches walk over.
pub trait Graph<St>: Debug
where
    St: State,
{
    /// The ordered neighbours of a State.
    ///
    /// `None` means the State is not a key, which searches treat as a malformed
    /// graph once they try expanding it. A key without edges is `Some(&[])`.
    fn neighbours(&self, s: &St) -> Option<&[St]>;

    fn contains(&self, s: &St) -> bool {
        self.neighbours(s).is_some()
    }

    fn has_edge(&self, from: &St, to: &St) -> bool {
        self.neighbours(from).is_some_and(|n| n.contains(to))
    }
}

impl<St, S> Graph<St> for HashMap<St, Vec<St>, S>
where
    St: State,
    S: BuildHasher,
{
    #[inline(always)]
    fn neighbours(&self, s: &St) -> Option<&[St]> {
        self.get(s).map(Vec::as_slice)
    }
}

/// A graph given as `State -> [State]`.
///
/// Neighbour order is kept as inserted and drives expansion order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AdjacencyMap<St>
where
    St: State,
{
    edges: FxHashMap<St, Vec<St>>,
}

impl<St> AdjacencyMap<St>
where
    St: State,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            edges: FxHashMap::default(),
        }
    }

    /// Sets the neighbours of `s`, returning the previous ones if any.
    pub fn insert<I>(&mut self, s: St, neighbours: I) -> Option<Vec<St>>
    where
        I: IntoIterator<Item = St>,
    {
        self.edges.insert(s, neighbours.into_iter().collect())
    }

    /// Appends `to` to the neighbours of `from`.
    ///
    /// `from` becomes a key if it wasn't one, `to` doesn't.
    pub fn add_edge(&mut self, from: St, to: St) {
        self.edges.entry(from).or_default().push(to);
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of edges, counting duplicates and self-loops.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    pub fn states(&self) -> impl Iterator<Item = &St> {
        self.edges.keys()
    }

    /// States referenced as neighbours that are not keys themselves.
    ///
    /// Searches only fail on these lazily, when expanding them. This allows
    /// checking a whole graph upfront.
    #[must_use]
    pub fn missing_keys(&self) -> FxHashSet<St> {
        self.edges
            .values()
            .flatten()
            .filter(|s| !self.edges.contains_key(*s))
            .cloned()
            .collect()
    }
}

impl<St> Default for AdjacencyMap<St>
where
    St: State,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<St> Graph<St> for AdjacencyMap<St>
where
    St: State,
{
    #[inline(always)]
    fn neighbours(&self, s: &St) -> Option<&[St]> {
        self.edges.get(s).map(Vec::as_slice)
    }
}

impl<St, I> FromIterator<(St, I)> for AdjacencyMap<St>
where
    St: State,
    I: IntoIterator<Item = St>,
{
    fn from_iter<T: IntoIterator<Item = (St, I)>>(iter: T) -> Self {
        let mut graph = Self::new();
        for (s, neighbours) in iter {
            graph.insert(s, neighbours);
        }
        graph
    }
}

impl<St, I, const N: usize> From<[(St, I); N]> for AdjacencyMap<St>
where
    St: State,
    I: IntoIterator<Item = St>,
{
    fn from(entries: [(St, I); N]) -> Self {
        entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_keep_order() {
        let graph = AdjacencyMap::from([('A', vec!['C', 'B']), ('B', vec![]), ('C', vec![])]);

        assert_eq!(graph.neighbours(&'A'), Some(&['C', 'B'][..]));
        assert_eq!(graph.neighbours(&'B'), Some(&[][..]));
        assert_eq!(graph.neighbours(&'Z'), None);
        assert!(graph.has_edge(&'A', &'B'));
        assert!(!graph.has_edge(&'B', &'A'));
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.num_edges(), 2);
    }

    #[test]
    fn add_edge_creates_source_only() {
        let mut graph = AdjacencyMap::new();
        graph.add_edge(1u32, 2u32);
        graph.add_edge(1u32, 3u32);

        assert_eq!(graph.neighbours(&1), Some(&[2, 3][..]));
        assert!(!graph.contains(&2));
        assert_eq!(
            graph.missing_keys(),
            FxHashSet::from_iter([2u32, 3u32].into_iter())
        );
    }

    #[test]
    fn missing_keys_is_empty_for_closed_graphs() {
        let graph = AdjacencyMap::from([("a", vec!["b", "a"]), ("b", vec!["a", "a"])]);
        assert!(graph.missing_keys().is_empty());
    }

    #[test]
    fn hash_map_is_a_graph() {
        let mut graph = HashMap::new();
        graph.insert('A', vec!['B']);
        graph.insert('B', vec![]);

        assert!(Graph::has_edge(&graph, &'A', &'B'));
        assert_eq!(Graph::neighbours(&graph, &'C'), None);
    }
}
