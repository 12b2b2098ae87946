//! Numeric evaluation and the two tree rewrites. Every function here takes
//! `&self` and returns fresh nodes; no tree is modified in place.

mod diff;
mod eval;
mod simplify;
