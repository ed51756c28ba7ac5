/// Grouping and aggregation engine.
///
/// - **Partitioning** splits records in two by a predicate.
/// - **Grouping** splits records many ways by a key, optionally folding each
///   group through an [`Aggregator`] instead of collecting it.
/// - **Keyed maps** ([`to_map_by`]) collapse records onto keys with an
///   explicit merge rule for collisions.
///
/// Grouped results are returned as `BTreeMap`s, so iteration follows key
/// order. Within a group, records keep their input order.
///
/// # Example
///
/// ```
/// use koru_staff::group::{self, Count, SumOf};
///
/// let sales = [("north", 10.0), ("south", 4.0), ("north", 6.0)];
/// let counts = group::group_by_with(&sales, |s| s.0, &Count);
/// let totals = group::group_by_with(&sales, |s| s.0, &SumOf(|s: &(&str, f64)| s.1));
/// assert_eq!(counts["north"], 2);
/// assert_eq!(totals["north"], 16.0);
/// ```
use crate::reduce::{Extreme, Summary, keep_winner};
use crate::select::Comparator;
use std::collections::BTreeMap;

/// The two branches of a partition.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition<'a, T: ?Sized> {
    /// Records for which the predicate held.
    pub matched: Vec<&'a T>,
    /// Records for which it did not.
    pub unmatched: Vec<&'a T>,
}

impl<'a, T: ?Sized> Partition<'a, T> {
    /// The branch for a predicate outcome.
    pub fn get(&self, outcome: bool) -> &[&'a T] {
        if outcome {
            &self.matched
        } else {
            &self.unmatched
        }
    }

    /// Total number of records across both branches.
    pub fn len(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split records by a predicate. Each record lands in exactly one branch.
pub fn partition_by<'a, T, I, P>(items: I, predicate: P) -> Partition<'a, T>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    P: Fn(&T) -> bool,
{
    let (matched, unmatched): (Vec<&'a T>, Vec<&'a T>) =
        items.into_iter().partition(|item| predicate(*item));
    Partition { matched, unmatched }
}

/// Group records by key, keeping input order inside each group.
pub fn group_by<'a, T, K, I, F>(items: I, key: F) -> BTreeMap<K, Vec<&'a T>>
where
    T: 'a + ?Sized,
    K: Ord,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&'a T) -> K,
{
    let mut groups: BTreeMap<K, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        groups.entry(key(item)).or_default().push(item);
    }
    groups
}

/// A per-group fold applied while grouping.
///
/// `init` creates the state for a new group, `accumulate` folds one record
/// in, and `finish` turns the final state into the group's value.
pub trait Aggregator<'a, T: ?Sized + 'a> {
    /// Running state for one group.
    type State;
    /// Value reported for one group.
    type Output;

    fn init(&self) -> Self::State;
    fn accumulate(&self, state: &mut Self::State, item: &'a T);
    fn finish(&self, state: Self::State) -> Self::Output;
}

/// Number of records in the group.
#[derive(Debug, Clone, Copy, Default)]
pub struct Count;

impl<'a, T: ?Sized + 'a> Aggregator<'a, T> for Count {
    type State = usize;
    type Output = usize;

    fn init(&self) -> usize {
        0
    }

    fn accumulate(&self, state: &mut usize, _item: &'a T) {
        *state += 1;
    }

    fn finish(&self, state: usize) -> usize {
        state
    }
}

/// Sum of a numeric field over the group.
#[derive(Debug, Clone, Copy)]
pub struct SumOf<F>(pub F);

impl<'a, T, F> Aggregator<'a, T> for SumOf<F>
where
    T: ?Sized + 'a,
    F: Fn(&T) -> f64,
{
    type State = f64;
    type Output = f64;

    fn init(&self) -> f64 {
        0.0
    }

    fn accumulate(&self, state: &mut f64, item: &'a T) {
        *state += (self.0)(item);
    }

    fn finish(&self, state: f64) -> f64 {
        state
    }
}

/// Mean of a numeric field over the group.
///
/// Groups built by [`group_by_with`] are never empty, so the output is
/// always `Some` there; `None` only arises if a caller finishes a fresh
/// state directly.
#[derive(Debug, Clone, Copy)]
pub struct AverageOf<F>(pub F);

impl<'a, T, F> Aggregator<'a, T> for AverageOf<F>
where
    T: ?Sized + 'a,
    F: Fn(&T) -> f64,
{
    type State = Summary;
    type Output = Option<f64>;

    fn init(&self) -> Summary {
        Summary::default()
    }

    fn accumulate(&self, state: &mut Summary, item: &'a T) {
        state.accept((self.0)(item));
    }

    fn finish(&self, state: Summary) -> Option<f64> {
        state.average()
    }
}

/// Keep the single extreme record of the group, first in input order on
/// ties.
#[derive(Debug)]
pub struct ExtremeOf<'r, 'c, T: ?Sized> {
    comparator: &'r Comparator<'c, T>,
    kind: Extreme,
}

impl<'r, 'c, T: ?Sized> ExtremeOf<'r, 'c, T> {
    pub fn new(comparator: &'r Comparator<'c, T>, kind: Extreme) -> Self {
        Self { comparator, kind }
    }
}

impl<'a, T: ?Sized + 'a> Aggregator<'a, T> for ExtremeOf<'_, '_, T> {
    type State = Option<&'a T>;
    type Output = Option<&'a T>;

    fn init(&self) -> Option<&'a T> {
        None
    }

    fn accumulate(&self, state: &mut Option<&'a T>, item: &'a T) {
        *state = Some(keep_winner(*state, item, self.comparator, self.kind));
    }

    fn finish(&self, state: Option<&'a T>) -> Option<&'a T> {
        state
    }
}

/// Group records by key and fold each group through `aggregator`.
pub fn group_by_with<'a, T, K, I, F, A>(items: I, key: F, aggregator: &A) -> BTreeMap<K, A::Output>
where
    T: 'a + ?Sized,
    K: Ord,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&'a T) -> K,
    A: Aggregator<'a, T>,
{
    let mut states: BTreeMap<K, A::State> = BTreeMap::new();
    for item in items {
        let state = states.entry(key(item)).or_insert_with(|| aggregator.init());
        aggregator.accumulate(state, item);
    }
    states
        .into_iter()
        .map(|(k, state)| (k, aggregator.finish(state)))
        .collect()
}

/// The extreme record of every group.
///
/// Equivalent to running [`crate::reduce::extreme_by`] on each group, and
/// done in the same single pass as the grouping.
pub fn group_extreme_by<'a, T, K, I, F>(
    items: I,
    key: F,
    comparator: &Comparator<'_, T>,
    kind: Extreme,
) -> BTreeMap<K, &'a T>
where
    T: 'a + ?Sized,
    K: Ord,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&'a T) -> K,
{
    group_by_with(items, key, &ExtremeOf::new(comparator, kind))
        .into_iter()
        .filter_map(|(k, winner)| winner.map(|w| (k, w)))
        .collect()
}

/// Collapse records onto keys, resolving collisions with `merge`.
///
/// `merge(existing, incoming)` receives the value already stored for the
/// key and the value derived from the later record, in input order. Use
/// [`keep_first`] or [`keep_last`] for the usual policies.
pub fn to_map_by<'a, T, K, V, I, KF, VF, M>(
    items: I,
    key: KF,
    value: VF,
    merge: M,
) -> BTreeMap<K, V>
where
    T: 'a + ?Sized,
    K: Ord,
    I: IntoIterator<Item = &'a T>,
    KF: Fn(&'a T) -> K,
    VF: Fn(&'a T) -> V,
    M: Fn(V, V) -> V,
{
    let mut map = BTreeMap::new();
    for item in items {
        let k = key(item);
        let incoming = value(item);
        let merged = match map.remove(&k) {
            Some(existing) => merge(existing, incoming),
            None => incoming,
        };
        map.insert(k, merged);
    }
    map
}

/// Merge rule: the value seen first wins.
pub fn keep_first<V>(existing: V, _incoming: V) -> V {
    existing
}

/// Merge rule: the value seen last wins.
pub fn keep_last<V>(_existing: V, incoming: V) -> V {
    incoming
}
