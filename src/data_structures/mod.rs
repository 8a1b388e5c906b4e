//! Frontiers, the collections of discovered but not yet expanded Nodes.
//!
//! Each search algorithm is the same loop driven by a different frontier.

pub mod frontier;
pub mod priority_heap;
