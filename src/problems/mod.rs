//! Ready-made graphs to search on.
//!
//! Hand-made letter graphs with known outcomes, and seeded random graphs of any
//! size.

pub mod letters;
pub mod random;
