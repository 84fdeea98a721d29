use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};

/// A strict weak order over `K`. Every tree operation orders keys through this trait, never
/// through `K`'s own `Ord` unless the comparator says so.
pub trait Compare<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;

    fn less(&self, a: &K, b: &K) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// Ascending order given by `Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Compare<K> for Natural {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Descending order given by `Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse;

impl<K: Ord + ?Sized> Compare<K> for Reverse {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        b.cmp(a)
    }
}

/// Any `Fn(&K, &K) -> Ordering` as a comparator.
#[derive(Clone, Copy, Default)]
pub struct FnCompare<F>(pub F);

impl<F> Debug for FnCompare<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "FnCompare")
    }
}

impl<K: ?Sized, F: Fn(&K, &K) -> Ordering> Compare<K> for FnCompare<F> {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}

/// Orders `(K, V)` pairs by their first component only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByKey<C>(pub C);

impl<K, V, C: Compare<K>> Compare<(K, V)> for ByKey<C> {
    fn compare(&self, a: &(K, V), b: &(K, V)) -> Ordering {
        self.0.compare(&a.0, &b.0)
    }
}
