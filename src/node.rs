use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::ops::Bound::*;
use std::slice;

use tracing::trace;

use crate::endpoint::Endpoint;
use crate::error::{InvalidInterval, Violation};
use crate::interval::Interval;

/// A validated interval along with its endpoints in the comparison domain.
#[derive(Clone, Debug)]
pub(crate) struct Span<K> {
    pub lower: f64,
    pub upper: f64,
    pub interval: Interval<K>,
}

impl<K: Endpoint> Span<K> {
    /// Rejects anything that is not a finite, closed, non-inverted interval.
    pub fn new(interval: Interval<K>) -> Result<Span<K>, InvalidInterval> {
        let reject = |violation| InvalidInterval {
            interval: interval.to_string(),
            violation,
        };

        let (lower, upper) = match (*interval.start(), *interval.end()) {
            (Unbounded, _) | (_, Unbounded) => return Err(reject(Violation::Unbounded)),
            (Included(lower), Included(upper)) => (lower, upper),
            _ => return Err(reject(Violation::NotClosed)),
        };
        if !lower.is_finite() || !upper.is_finite() {
            return Err(reject(Violation::NonFinite));
        }
        // Native order: distinct wide integers may round to the same f64.
        if lower.cmp_value(&upper) == Ordering::Greater {
            return Err(reject(Violation::Inverted));
        }

        let (lower, upper) = (lower.to_f64(), upper.to_f64());

        Ok(Span {
            lower,
            upper,
            interval,
        })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub center: f64,
    /// Intervals with `lower <= center <= upper`, by ascending lower bound.
    pub by_lower: Vec<Span<K>>,
    /// Indices into `by_lower`, by descending upper bound.
    pub by_upper: Vec<usize>,
    pub left: Option<Box<Node<K>>>,
    pub right: Option<Box<Node<K>>>,
}

/// Midpoint of the bounding extent `[lower, upper]`.
///
/// The result always lies within the extent, even when the plain sum
/// overflows or the halves underflow, so that every partition step excludes
/// at least one interval from each side.
fn midpoint(lower: f64, upper: f64) -> f64 {
    let mid = (lower + upper) / 2.0;
    let mid = if mid.is_finite() {
        mid
    } else {
        lower / 2.0 + upper / 2.0
    };
    mid.clamp(lower, upper)
}

impl<K: Endpoint> Node<K> {
    /// Builds the subtree holding `spans`. `None` for an empty set.
    ///
    /// The center is the midpoint of the smallest lower bound and the largest
    /// upper bound, not a median of the endpoints, so skewed inputs produce
    /// unbalanced trees.
    pub fn build(spans: Vec<Span<K>>) -> Option<Box<Node<K>>> {
        let (min, max) = spans.iter().fold(None, |extent, span| match extent {
            None => Some((span.lower, span.upper)),
            Some((min, max)) => Some((f64::min(min, span.lower), f64::max(max, span.upper))),
        })?;
        let center = midpoint(min, max);

        let mut left = Vec::new();
        let mut right = Vec::new();
        let mut covering = Vec::new();
        for span in spans {
            if span.upper < center {
                left.push(span);
            } else if span.lower > center {
                right.push(span);
            } else {
                covering.push(span);
            }
        }

        let left = Self::build(left);
        let right = Self::build(right);

        covering.sort_by(|a, b| {
            a.lower
                .total_cmp(&b.lower)
                .then_with(|| a.interval.cmp(&b.interval))
        });
        let mut by_upper: Vec<usize> = (0..covering.len()).collect();
        by_upper.sort_by(|&i, &j| {
            covering[j]
                .upper
                .total_cmp(&covering[i].upper)
                .then_with(|| covering[i].interval.cmp(&covering[j].interval))
        });

        trace!(center, covering = covering.len(), "built interval tree node");

        Some(Box::new(Node {
            center,
            by_lower: covering,
            by_upper,
            left,
            right,
        }))
    }

    /// Adds to `found` every interval under `root` whose closed bounds
    /// contain `point`. A NaN point matches nothing.
    pub fn search<'a>(
        root: Option<&'a Node<K>>,
        point: f64,
        found: &mut HashSet<&'a Interval<K>>,
    ) {
        let mut curr = root;
        while let Some(node) = curr {
            if point == node.center {
                found.extend(node.by_lower.iter().map(|span| &span.interval));
                return;
            }

            if point < node.center {
                // Every entry reaches at least the center, so once a lower
                // bound passes the point the rest of the list does too.
                for span in &node.by_lower {
                    if point < span.lower || point > span.upper {
                        debug_assert!(point < span.lower);
                        break;
                    }
                    found.insert(&span.interval);
                }
                curr = node.left.as_deref();
            } else if point > node.center {
                for span in node.by_upper.iter().map(|&i| &node.by_lower[i]) {
                    if point < span.lower || point > span.upper {
                        debug_assert!(point > span.upper);
                        break;
                    }
                    found.insert(&span.interval);
                }
                curr = node.right.as_deref();
            } else {
                return;
            }
        }
    }

    /// Like [`Node::search`], but stops at the first match.
    pub fn contains_point(root: Option<&Node<K>>, point: f64) -> bool {
        let mut curr = root;
        while let Some(node) = curr {
            if point == node.center {
                return !node.by_lower.is_empty();
            }

            if point < node.center {
                if node.by_lower.first().map_or(false, |span| span.lower <= point) {
                    return true;
                }
                curr = node.left.as_deref();
            } else if point > node.center {
                let widest = node.by_upper.first().map(|&i| &node.by_lower[i]);
                if widest.map_or(false, |span| point <= span.upper) {
                    return true;
                }
                curr = node.right.as_deref();
            } else {
                return false;
            }
        }

        false
    }

    /// Number of intervals in this subtree.
    pub fn len(&self) -> usize {
        self.by_lower.len()
            + self.left.as_ref().map_or(0, |l| l.len())
            + self.right.as_ref().map_or(0, |r| r.len())
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |l| l.node_count())
            + self.right.as_ref().map_or(0, |r| r.node_count())
    }

    /// Number of levels, this node included.
    pub fn depth(&self) -> usize {
        1 + usize::max(
            self.left.as_ref().map_or(0, |l| l.depth()),
            self.right.as_ref().map_or(0, |r| r.depth()),
        )
    }
}

/// Walks the intervals of a subtree, node by node.
pub(crate) struct Iter<'a, K> {
    pending: Vec<&'a Node<K>>,
    current: slice::Iter<'a, Span<K>>,
}

impl<'a, K> Iter<'a, K> {
    pub fn new(root: Option<&'a Node<K>>) -> Iter<'a, K> {
        Iter {
            pending: root.into_iter().collect(),
            current: [].iter(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a Interval<K>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(span) = self.current.next() {
                return Some(&span.interval);
            }

            let node = self.pending.pop()?;
            if let Some(right) = &node.right {
                self.pending.push(right);
            }
            if let Some(left) = &node.left {
                self.pending.push(left);
            }
            self.current = node.by_lower.iter();
        }
    }
}

impl<K> fmt::Display for Node<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, " {{ {}:", self.center)?;
        for span in &self.by_lower {
            write!(f, " {}", span.interval)?;
        }
        if let Some(left) = &self.left {
            write!(f, " left:{}", left)?;
        }
        if let Some(right) = &self.right {
            write!(f, " right:{}", right)?;
        }
        write!(f, " }} ")
    }
}
