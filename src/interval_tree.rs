use std::collections::{BTreeSet, HashSet};
use std::fmt;
#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::endpoint::Endpoint;
use crate::error::InvalidInterval;
use crate::interval::Interval;
use crate::node::{Iter, Node, Span};

/// An immutable centered interval tree over closed intervals.
///
/// The tree is built once from a collection of intervals and answers
/// stabbing queries: which intervals contain a given point. Each node splits
/// its intervals into those entirely left of its center, those entirely right
/// of it, and those covering it; the covering ones are kept sorted by lower
/// bound and by upper bound so that a query can stop scanning early.
///
/// Since nothing is mutated after construction, a tree can be shared between
/// threads and queried concurrently without locking.
///
/// ```
/// use centered_interval_tree::{Interval, IntervalTree};
///
/// let tree = IntervalTree::new([
///     Interval::closed(-10, 3),
///     Interval::closed(-2, 5),
///     Interval::closed(500, 10000),
/// ])
/// .unwrap();
///
/// let found = tree.search(3);
/// assert_eq!(found.len(), 2);
/// assert!(found.contains(&Interval::closed(-2, 5)));
/// assert!(tree.search(499).is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct IntervalTree<K> {
    root: Option<Box<Node<K>>>,
    len: usize,
}

impl<K> Default for IntervalTree<K> {
    fn default() -> IntervalTree<K> {
        IntervalTree { root: None, len: 0 }
    }
}

impl<K: Endpoint> IntervalTree<K> {
    /// Builds a tree from `intervals`. Intervals with equal bounds are stored
    /// once.
    ///
    /// Fails if any interval is open on either end, unbounded, has a
    /// non-finite endpoint or a lower endpoint above its upper one; in that
    /// case no tree is built, however many of the other intervals are valid.
    ///
    /// ```
    /// use centered_interval_tree::{Interval, IntervalTree, Violation};
    ///
    /// let err = IntervalTree::new([Interval::closed(1, 2), Interval::at_least(-2)]).unwrap_err();
    /// assert_eq!(err.violation, Violation::Unbounded);
    /// ```
    pub fn new<I>(intervals: I) -> Result<IntervalTree<K>, InvalidInterval>
    where
        I: IntoIterator<Item = Interval<K>>,
    {
        let unique: BTreeSet<Interval<K>> = intervals.into_iter().collect();
        let len = unique.len();

        let spans = unique
            .into_iter()
            .map(Span::new)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| {
                debug!(%err, "rejected interval tree input");
                err
            })?;

        let root = Node::build(spans);
        debug!(
            intervals = len,
            nodes = root.as_ref().map_or(0, |r| r.node_count()),
            depth = root.as_ref().map_or(0, |r| r.depth()),
            "built interval tree"
        );

        Ok(IntervalTree { root, len })
    }

    /// Returns every stored interval whose closed bounds contain `point`.
    ///
    /// Never fails: a point outside every interval, a NaN point, or an empty
    /// tree yield an empty set.
    pub fn search(&self, point: K) -> HashSet<&Interval<K>> {
        let mut found = HashSet::new();
        Node::search(self.root.as_deref(), point.to_f64(), &mut found);
        found
    }

    /// Whether any stored interval contains `point`.
    ///
    /// ```
    /// use centered_interval_tree::{Interval, IntervalTree};
    ///
    /// let tree = IntervalTree::new([Interval::closed(4.1, 10.9)]).unwrap();
    /// assert!(tree.contains_point(10.9));
    /// assert!(!tree.contains_point(11.0));
    /// ```
    pub fn contains_point(&self, point: K) -> bool {
        Node::contains_point(self.root.as_deref(), point.to_f64())
    }

    /// Number of levels in the tree; `0` when empty.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.depth())
    }
}

impl<K> IntervalTree<K> {
    /// Number of distinct intervals stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over the stored intervals in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Interval<K>> + '_ {
        Iter::new(self.root.as_deref())
    }
}

impl<K: Endpoint> TryFrom<Vec<Interval<K>>> for IntervalTree<K> {
    type Error = InvalidInterval;

    fn try_from(intervals: Vec<Interval<K>>) -> Result<Self, Self::Error> {
        IntervalTree::new(intervals)
    }
}

impl<K> fmt::Display for IntervalTree<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{}", root),
            None => write!(f, " {{ }} "),
        }
    }
}

/// Serializes as the sequence of stored intervals.
#[cfg(feature = "serde")]
impl<K: Serialize> Serialize for IntervalTree<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Deserializes a sequence of intervals and builds the tree from it, failing
/// on any interval the constructor would reject.
#[cfg(feature = "serde")]
impl<'de, K> Deserialize<'de> for IntervalTree<K>
where
    K: Endpoint + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let intervals = Vec::<Interval<K>>::deserialize(deserializer)?;
        IntervalTree::new(intervals).map_err(de::Error::custom)
    }
}
