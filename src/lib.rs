use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod data_structures;
pub mod derank;
pub mod heap_primitives;

// Search space and problems
// -------------------------
pub mod error;
pub mod heuristic;
pub mod path;
pub mod problem;
pub mod search;
pub mod space;
pub mod trace;

// Problems
// --------
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;
