use thiserror::Error;

/// Why an interval was rejected while building the tree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    #[error("intervals cannot be unbounded")]
    Unbounded,

    #[error("intervals must have inclusive (\"closed\") bounds")]
    NotClosed,

    #[error("interval endpoints must be finite numbers")]
    NonFinite,

    #[error("the lower endpoint must not exceed the upper endpoint")]
    Inverted,
}

/// Returned by [`IntervalTree::new`](crate::IntervalTree::new) when any of the
/// supplied intervals is not a finite, closed range. No tree is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid interval {interval}: {violation}")]
pub struct InvalidInterval {
    /// The offending interval, rendered with its `Display` notation.
    pub interval: String,
    pub violation: Violation,
}
