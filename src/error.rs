use thiserror::Error;

use crate::space::State;

/// Fatal search failures.
///
/// These describe malformed inputs. An unreachable goal is not an error, it's
/// reported as `Ok(None)`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchError<St>
where
    St: State,
{
    /// A State was expanded but the graph has no adjacency entry for it.
    #[error("State {state:?} has no adjacency entry, the graph is malformed.")]
    MissingAdjacencyEntry { state: St },
    /// A State was discovered but the heuristic has no estimate for it.
    #[error("State {state:?} has no heuristic entry.")]
    MissingHeuristicEntry { state: St },
}

impl<St> SearchError<St>
where
    St: State,
{
    /// The State that caused the failure.
    pub fn state(&self) -> &St {
        match self {
            Self::MissingAdjacencyEntry { state } | Self::MissingHeuristicEntry { state } => state,
        }
    }
}

/// A Path was built from no States at all.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("A Path needs at least one State.")]
pub struct EmptyPathError;
