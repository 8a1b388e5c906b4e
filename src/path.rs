use crate::error::EmptyPathError;
use crate::space::Graph;
use crate::space::State;

/// Max number of states displayed.
const MAX_ELEMENTS_DISPLAYED: usize = 20;

/// The States visited from a start to a goal, both included.
///
/// Never empty. A search where the start is the goal finds the one-state Path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<St>", into = "Vec<St>"))]
pub struct Path<St>
where
    St: State,
{
    states: Vec<St>,
}

impl<St> Path<St>
where
    St: State,
{
    pub(crate) fn new(states: Vec<St>) -> Self {
        debug_assert!(!states.is_empty(), "Paths have at least a start");
        Self { states }
    }

    #[inline(always)]
    pub fn start(&self) -> &St {
        &self.states[0]
    }
    #[inline(always)]
    pub fn end(&self) -> &St {
        &self.states[self.states.len() - 1]
    }

    /// Number of States, which is `edges() + 1`.
    #[inline(always)]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.states.len()
    }
    #[inline(always)]
    pub fn edges(&self) -> usize {
        self.states.len() - 1
    }

    #[inline(always)]
    pub fn states(&self) -> &[St] {
        &self.states
    }
    pub fn iter(&self) -> std::slice::Iter<'_, St> {
        self.states.iter()
    }
    pub fn into_states(self) -> Vec<St> {
        self.states
    }

    /// Whether every step of the Path is an edge of `graph`.
    pub fn is_valid_in<G: Graph<St>>(&self, graph: &G) -> bool {
        self.states.windows(2).all(|w| graph.has_edge(&w[0], &w[1]))
    }

    /// Whether some State shows up more than once.
    pub fn has_repeated_states(&self) -> bool {
        let mut seen = rustc_hash::FxHashSet::default();
        !self.states.iter().all(|s| seen.insert(s))
    }
}

impl<St> TryFrom<Vec<St>> for Path<St>
where
    St: State,
{
    type Error = EmptyPathError;

    fn try_from(states: Vec<St>) -> Result<Self, Self::Error> {
        if states.is_empty() {
            return Err(EmptyPathError);
        }
        Ok(Self { states })
    }
}

impl<St> From<Path<St>> for Vec<St>
where
    St: State,
{
    fn from(path: Path<St>) -> Self {
        path.states
    }
}

impl<St> std::ops::Index<usize> for Path<St>
where
    St: State,
{
    type Output = St;

    fn index(&self, index: usize) -> &St {
        &self.states[index]
    }
}

impl<St> IntoIterator for Path<St>
where
    St: State,
{
    type Item = St;
    type IntoIter = std::vec::IntoIter<St>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.into_iter()
    }
}

impl<'a, St> IntoIterator for &'a Path<St>
where
    St: State,
{
    type Item = &'a St;
    type IntoIter = std::slice::Iter<'a, St>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

impl<St> std::fmt::Display for Path<St>
where
    St: State,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Path({} edges: ", self.edges())?;
        for (i, s) in self.states.iter().take(MAX_ELEMENTS_DISPLAYED).enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{s:?}")?;
        }
        if self.states.len() > MAX_ELEMENTS_DISPLAYED {
            write!(f, " -> ... -> {:?}", self.end())?;
        }
        write!(f, ")")
    }
}
