use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Bound::{self, *};
use std::ops::RangeInclusive;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;

/// A numeric range whose ends are each inclusive, exclusive or unbounded.
///
/// Only closed, finite intervals (`[lower, upper]` with `lower <= upper`) can
/// be stored in an [`IntervalTree`](crate::IntervalTree); the other shapes
/// exist so that callers can express them and get a precise
/// [`InvalidInterval`](crate::InvalidInterval) back.
///
/// Two intervals are equal when their bound kinds and bound values are equal,
/// which is what makes duplicates collapse when a tree is built.
///
/// ```
/// use centered_interval_tree::Interval;
///
/// let a = Interval::closed(-2, 5);
/// assert_eq!(a, Interval::from(-2..=5));
/// assert!(a.contains(5));
/// assert!(!Interval::closed_open(-2, 5).contains(5));
/// assert_eq!(a.to_string(), "[-2,5]");
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug)]
pub struct Interval<K> {
    start: Bound<K>,
    end: Bound<K>,
}

impl<K> Interval<K> {
    /// `[lower, upper]`
    pub fn closed(lower: K, upper: K) -> Self {
        Interval {
            start: Included(lower),
            end: Included(upper),
        }
    }

    /// `]lower, upper[`
    pub fn open(lower: K, upper: K) -> Self {
        Interval {
            start: Excluded(lower),
            end: Excluded(upper),
        }
    }

    /// `[lower, upper[`
    pub fn closed_open(lower: K, upper: K) -> Self {
        Interval {
            start: Included(lower),
            end: Excluded(upper),
        }
    }

    /// `]lower, upper]`
    pub fn open_closed(lower: K, upper: K) -> Self {
        Interval {
            start: Excluded(lower),
            end: Included(upper),
        }
    }

    /// `[lower, ∞[`
    pub fn at_least(lower: K) -> Self {
        Interval {
            start: Included(lower),
            end: Unbounded,
        }
    }

    /// `]lower, ∞[`
    pub fn greater_than(lower: K) -> Self {
        Interval {
            start: Excluded(lower),
            end: Unbounded,
        }
    }

    /// `]-∞, upper]`
    pub fn at_most(upper: K) -> Self {
        Interval {
            start: Unbounded,
            end: Included(upper),
        }
    }

    /// `]-∞, upper[`
    pub fn less_than(upper: K) -> Self {
        Interval {
            start: Unbounded,
            end: Excluded(upper),
        }
    }

    /// `]-∞, ∞[`
    pub fn all() -> Self {
        Interval {
            start: Unbounded,
            end: Unbounded,
        }
    }

    pub fn start(&self) -> &Bound<K> {
        &self.start
    }

    pub fn end(&self) -> &Bound<K> {
        &self.end
    }

    /// Both ends are inclusive.
    pub fn is_closed(&self) -> bool {
        matches!((&self.start, &self.end), (Included(_), Included(_)))
    }
}

impl<K: Endpoint> Interval<K> {
    /// The lower endpoint, if the start is inclusive.
    pub fn lower(&self) -> Option<K> {
        match self.start {
            Included(x) => Some(x),
            _ => None,
        }
    }

    /// The upper endpoint, if the end is inclusive.
    pub fn upper(&self) -> Option<K> {
        match self.end {
            Included(x) => Some(x),
            _ => None,
        }
    }

    /// Whether `point` lies within the interval, honouring every bound kind.
    /// Comparisons happen in the `f64` domain, like the tree's own.
    pub fn contains(&self, point: K) -> bool {
        let p = point.to_f64();
        let after_start = match self.start {
            Included(x) => x.to_f64() <= p,
            Excluded(x) => x.to_f64() < p,
            Unbounded => !p.is_nan(),
        };
        let before_end = match self.end {
            Included(x) => p <= x.to_f64(),
            Excluded(x) => p < x.to_f64(),
            Unbounded => !p.is_nan(),
        };

        after_start && before_end
    }
}

impl<K> From<RangeInclusive<K>> for Interval<K> {
    fn from(range: RangeInclusive<K>) -> Self {
        let (lower, upper) = range.into_inner();
        Interval::closed(lower, upper)
    }
}

impl<K> From<(Bound<K>, Bound<K>)> for Interval<K> {
    fn from((start, end): (Bound<K>, Bound<K>)) -> Self {
        Interval { start, end }
    }
}

fn bound_rank<K>(bound: &Bound<K>) -> u8 {
    match bound {
        Unbounded => 0,
        Included(_) => 1,
        Excluded(_) => 2,
    }
}

fn cmp_bound<K: Endpoint>(a: &Bound<K>, b: &Bound<K>) -> Ordering {
    match (a, b) {
        (Included(x), Included(y)) | (Excluded(x), Excluded(y)) => x.cmp_value(y),
        _ => bound_rank(a).cmp(&bound_rank(b)),
    }
}

fn hash_bound<K: Endpoint, H: Hasher>(bound: &Bound<K>, state: &mut H) {
    bound_rank(bound).hash(state);
    match bound {
        Included(x) | Excluded(x) => x.hash_value(state),
        Unbounded => {}
    }
}

impl<K: Endpoint> PartialEq for Interval<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Endpoint> Eq for Interval<K> {}

impl<K: Endpoint> Hash for Interval<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_bound(&self.start, state);
        hash_bound(&self.end, state);
    }
}

impl<K: Endpoint> PartialOrd for Interval<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Orders by start, then end. Within one end, unbounded sorts before
/// inclusive, which sorts before exclusive; equal kinds compare by value.
impl<K: Endpoint> Ord for Interval<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_bound(&self.start, &other.start).then_with(|| cmp_bound(&self.end, &other.end))
    }
}

impl<K: fmt::Display> fmt::Display for Interval<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.start {
            Included(ref x) => write!(f, "[{}", x)?,
            Excluded(ref x) => write!(f, "]{}", x)?,
            Unbounded => write!(f, "]-∞")?,
        }
        write!(f, ",")?;
        match self.end {
            Included(ref x) => write!(f, "{}]", x),
            Excluded(ref x) => write!(f, "{}[", x),
            Unbounded => write!(f, "∞["),
        }
    }
}
