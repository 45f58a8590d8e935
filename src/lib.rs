//! Implementation of an immutable centered interval tree ([`IntervalTree`])
//! over closed numeric intervals. It is built once from a set of intervals and
//! answers "stabbing queries": given a point `p`, which intervals `[lower, upper]`
//! satisfy `lower <= p <= upper`?
//!
//! Each node of the tree holds a center, the intervals covering that center
//! (kept sorted by ascending lower bound and by descending upper bound), and two
//! subtrees built from the intervals entirely left and entirely right of it.
//! A query walks a single root-to-leaf path and stops scanning each node's
//! covering list as soon as no further entry can match.
//!
//! Bounds can be any [`Endpoint`]. Centers and points are compared as `f64`;
//! integer types wider than 32 bits must be wrapped in [`Lossy`] to opt into
//! that conversion.
//!
//! Only closed, finite intervals are accepted. Open, unbounded or non-finite
//! intervals make the whole construction fail with an [`InvalidInterval`].
//!
//! With the `serde` feature, intervals and trees can be serialized; a tree is
//! written as its list of intervals and rebuilt on deserialization.

mod endpoint;
mod error;
mod interval;
/// The tree itself and its query operations.
pub mod interval_tree;
mod node;

pub use endpoint::{Endpoint, Lossy};
pub use error::{InvalidInterval, Violation};
pub use interval::Interval;
pub use interval_tree::IntervalTree;
