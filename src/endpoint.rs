use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A numeric type that can bound an [`Interval`](crate::Interval) stored in the tree.
///
/// Centers and query points are compared in the `f64` domain. The provided
/// implementations are lossless: every value of `i8`, `u8`, `i16`, `u16`,
/// `i32`, `u32`, `f32` and `f64` converts exactly. Wider integers go through
/// [`Lossy`], which makes the rounding to `f64` an explicit choice.
///
/// Interval identity (equality, hashing) does not go through `f64`; it uses
/// [`Endpoint::cmp_value`] and [`Endpoint::hash_value`] on the native value.
pub trait Endpoint: Copy + Debug + Display {
    /// Converts the value into the comparison domain.
    fn to_f64(self) -> f64;

    /// `false` for NaN and infinities. Integers are always finite.
    fn is_finite(self) -> bool {
        true
    }

    /// Total order over native values.
    fn cmp_value(&self, other: &Self) -> Ordering;

    /// Hashes the native value, consistently with [`Endpoint::cmp_value`].
    fn hash_value<H: Hasher>(&self, state: &mut H);
}

macro_rules! impl_exact_int {
    ($($t:ty),*) => {$(
        impl Endpoint for $t {
            fn to_f64(self) -> f64 {
                f64::from(self)
            }

            fn cmp_value(&self, other: &Self) -> Ordering {
                self.cmp(other)
            }

            fn hash_value<H: Hasher>(&self, state: &mut H) {
                self.hash(state);
            }
        }
    )*};
}

impl_exact_int!(i8, u8, i16, u16, i32, u32);

macro_rules! impl_float {
    ($($t:ty),*) => {$(
        impl Endpoint for $t {
            fn to_f64(self) -> f64 {
                f64::from(self)
            }

            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }

            fn cmp_value(&self, other: &Self) -> Ordering {
                self.total_cmp(other)
            }

            fn hash_value<H: Hasher>(&self, state: &mut H) {
                self.to_bits().hash(state);
            }
        }
    )*};
}

impl_float!(f32, f64);

/// Opts a wide integer into the `f64` comparison domain.
///
/// Values beyond 2^53 in magnitude round when converted, so two distinct
/// bounds may compare equal against a center or a query point. Equality and
/// hashing of intervals still use the exact value.
///
/// ```
/// use centered_interval_tree::{Interval, IntervalTree, Lossy};
///
/// let tree = IntervalTree::new([Interval::closed(Lossy(0_i64), Lossy(10))]).unwrap();
/// assert_eq!(tree.search(Lossy(5)).len(), 1);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lossy<T>(pub T);

macro_rules! impl_lossy {
    ($($t:ty),*) => {$(
        impl Endpoint for Lossy<$t> {
            #[allow(clippy::cast_precision_loss)]
            fn to_f64(self) -> f64 {
                self.0 as f64
            }

            fn cmp_value(&self, other: &Self) -> Ordering {
                self.0.cmp(&other.0)
            }

            fn hash_value<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }
    )*};
}

impl_lossy!(i64, u64, i128, u128, isize, usize);

impl<T: Display> Display for Lossy<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
