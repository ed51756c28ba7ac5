/// Selection pipeline: filter, project, de-duplicate, sort and quantify.
///
/// Every function borrows its input and returns a fresh sequence; nothing
/// here mutates the records it is given. Inputs are taken as
/// `IntoIterator<Item = &T>` so that the output of one stage (a
/// `Vec<&T>`) can feed the next via `.iter().copied()`.
///
/// # Example
///
/// ```
/// use koru_staff::select::{self, Comparator, SortOrder};
///
/// let scores = [(1_u32, 30_u32), (2, 50), (3, 10), (4, 30)];
/// let passed = select::filter(&scores, |s| s.1 >= 30);
/// let ranked = select::sort_by(
///     passed.iter().copied(),
///     &Comparator::by(|s: &(u32, u32)| s.1, SortOrder::Desc),
/// );
/// assert_eq!(ranked, vec![&(2, 50), &(1, 30), &(4, 30)]);
/// ```
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending order (smallest first).
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl SortOrder {
    /// Apply this direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

type KeyCompare<'c, T> = Box<dyn Fn(&T, &T) -> Ordering + 'c>;

/// A chain of sort keys, each with its own direction.
///
/// Keys are consulted in declaration order; the first one that tells two
/// records apart decides. Keys only need `PartialOrd`, so floating-point
/// fields can be used directly. Incomparable values (NaN) compare equal.
///
/// Key functions return owned keys. For keys borrowed from the record
/// (string fields) use [`Comparator::from_fn`] and [`Comparator::then_with`].
pub struct Comparator<'c, T: ?Sized> {
    keys: Vec<KeyCompare<'c, T>>,
}

impl<T: ?Sized> fmt::Debug for Comparator<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("keys", &self.keys.len())
            .finish()
    }
}

impl<'c, T: ?Sized> Comparator<'c, T> {
    /// Compare by a single key.
    pub fn by<K, F>(key: F, order: SortOrder) -> Self
    where
        F: Fn(&T) -> K + 'c,
        K: PartialOrd,
    {
        Self {
            keys: vec![Self::key_compare(key, order)],
        }
    }

    /// Compare by a single key in ascending order.
    pub fn comparing<K, F>(key: F) -> Self
    where
        F: Fn(&T) -> K + 'c,
        K: PartialOrd,
    {
        Self::by(key, SortOrder::Asc)
    }

    /// Compare with an explicit comparison function.
    pub fn from_fn<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'c,
    {
        Self {
            keys: vec![Box::new(compare)],
        }
    }

    /// Add a secondary comparison function.
    pub fn then_with<F>(mut self, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'c,
    {
        self.keys.push(Box::new(compare));
        self
    }

    /// Add a secondary key, consulted only when all earlier keys tie.
    pub fn then_by<K, F>(mut self, key: F, order: SortOrder) -> Self
    where
        F: Fn(&T) -> K + 'c,
        K: PartialOrd,
    {
        self.keys.push(Self::key_compare(key, order));
        self
    }

    /// Reverse the chain as a whole.
    ///
    /// Records equal under every key stay equal, so a stable sort still
    /// keeps them in input order.
    pub fn reversed(self) -> Self
    where
        T: 'c,
    {
        Self {
            keys: vec![Box::new(move |a: &T, b: &T| self.compare(a, b).reverse())],
        }
    }

    /// Compare two values under the full key chain.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        for key in &self.keys {
            let cmp = key(a, b);
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    }

    fn key_compare<K, F>(key: F, order: SortOrder) -> KeyCompare<'c, T>
    where
        F: Fn(&T) -> K + 'c,
        K: PartialOrd,
    {
        Box::new(move |a: &T, b: &T| {
            let cmp = key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal);
            order.apply(cmp)
        })
    }
}

/// Records satisfying `predicate`, in input order.
pub fn filter<'a, T, I, P>(items: I, predicate: P) -> Vec<&'a T>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> bool,
{
    items.into_iter().filter(|item| predicate(*item)).collect()
}

/// Map every record to a derived value, in input order, keeping duplicates.
pub fn project<'a, T, U, I, F>(items: I, f: F) -> Vec<U>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&'a T) -> U,
{
    items.into_iter().map(f).collect()
}

/// The distinct keys derived from the records.
///
/// Only the keys survive, listed in first-seen order.
pub fn distinct_by<'a, T, K, I, F>(items: I, key: F) -> Vec<K>
where
    T: 'a + ?Sized,
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&'a T) -> K,
{
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for item in items {
        let k = key(item);
        if seen.insert(k.clone()) {
            keys.push(k);
        }
    }
    keys
}

/// Sort records by a comparator chain.
///
/// The sort is stable: records the comparator considers equal keep their
/// input order.
pub fn sort_by<'a, T, I>(items: I, comparator: &Comparator<'_, T>) -> Vec<&'a T>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    let mut sorted: Vec<&'a T> = items.into_iter().collect();
    sorted.sort_by(|a, b| comparator.compare(a, b));
    sorted
}

/// True when every record satisfies `predicate` (vacuously true when empty).
pub fn all_match<'a, T, I, P>(items: I, predicate: P) -> bool
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> bool,
{
    items.into_iter().all(predicate)
}

/// True when at least one record satisfies `predicate` (false when empty).
pub fn any_match<'a, T, I, P>(items: I, predicate: P) -> bool
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> bool,
{
    items.into_iter().any(predicate)
}
