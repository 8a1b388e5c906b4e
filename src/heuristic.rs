//! Heuristics and the priorities they produce.
//!
//! Greedy search orders its frontier by a caller-supplied estimate. Estimates
//! don't need to be admissible nor consistent, but every discovered State needs
//! one. Missing estimates are reported as errors instead of silently defaulting
//! to zero, which would make unknown States look like goals.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::BuildHasher;

use num_traits::Zero;

use crate::error::SearchError;
use crate::space::State;

/// Totally ordered values usable as node priorities.
///
/// Floats need a total order first, `ordered_float::OrderedFloat<f64>` works.
pub trait Priority: Copy + Debug + Ord + Zero {}
impl<T> Priority for T where T: Copy + Debug + Ord + Zero {}

/// An estimate of how far a State is from the goal.
pub trait Heuristic<St>: Debug
where
    St: State,
{
    type Value: Priority;

    /// Estimate for `s`, `None` when there's no entry for it.
    fn estimate(&self, s: &St) -> Option<Self::Value>;
}

impl<St, H, S> Heuristic<St> for HashMap<St, H, S>
where
    St: State,
    H: Priority,
    S: BuildHasher,
{
    type Value = H;

    #[inline(always)]
    fn estimate(&self, s: &St) -> Option<H> {
        self.get(s).copied()
    }
}

impl<St, H> Heuristic<St> for BTreeMap<St, H>
where
    St: State + Ord,
    H: Priority,
{
    type Value = H;

    #[inline(always)]
    fn estimate(&self, s: &St) -> Option<H> {
        self.get(s).copied()
    }
}

/// Computes estimates with a function.
///
/// ```
/// use graph_search::heuristic::FnHeuristic;
/// use graph_search::heuristic::Heuristic;
///
/// let h = FnHeuristic::new(|s: &u32| 10u32.checked_sub(*s));
/// assert_eq!(h.estimate(&3), Some(7));
/// assert_eq!(h.estimate(&11), None);
/// ```
#[derive(Clone, Copy)]
pub struct FnHeuristic<F> {
    f: F,
}

impl<F> FnHeuristic<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Debug for FnHeuristic<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FnHeuristic")
    }
}

impl<St, H, F> Heuristic<St> for FnHeuristic<F>
where
    St: State,
    H: Priority,
    F: Fn(&St) -> Option<H>,
{
    type Value = H;

    #[inline(always)]
    fn estimate(&self, s: &St) -> Option<H> {
        (self.f)(s)
    }
}

/// How a search assigns a priority to each State it discovers.
pub trait Ranking<St>: Debug
where
    St: State,
{
    type Priority: Priority;

    fn rank(&self, s: &St) -> Result<Self::Priority, SearchError<St>>;
}

/// Ranking for uninformed searches, every State gets priority 0.
#[derive(Clone, Copy, Debug, Default)]
pub struct Uninformed;

impl<St> Ranking<St> for Uninformed
where
    St: State,
{
    type Priority = u8;

    #[inline(always)]
    fn rank(&self, _s: &St) -> Result<u8, SearchError<St>> {
        Ok(u8::zero())
    }
}

/// Ranking by a heuristic's estimate.
#[derive(Debug)]
pub struct Informed<'h, Hr> {
    heuristic: &'h Hr,
}

impl<'h, Hr> Informed<'h, Hr> {
    pub fn new(heuristic: &'h Hr) -> Self {
        Self { heuristic }
    }
}

impl<St, Hr> Ranking<St> for Informed<'_, Hr>
where
    St: State,
    Hr: Heuristic<St>,
{
    type Priority = Hr::Value;

    #[inline(always)]
    fn rank(&self, s: &St) -> Result<Hr::Value, SearchError<St>> {
        self.heuristic
            .estimate(s)
            .ok_or_else(|| SearchError::MissingHeuristicEntry { state: s.clone() })
    }
}
