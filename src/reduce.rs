/// Reduction engine: fold a sequence of records into a single value.
///
/// All reductions run sequentially, left to right, in input order. Sums are
/// plain `f64` additions; reordering them (for example to split work across
/// threads) can change the last bits of the result, which is why nothing
/// here does so.
///
/// Operations that have no meaningful answer on empty input return `None`
/// instead of a sentinel value:
///
/// | Function | Empty input |
/// |----------|-------------|
/// | [`sum`] | `0.0` |
/// | [`average`] | `None` |
/// | [`extreme_by`] | `None` |
/// | [`summarize`] | `count == 0`, `min`/`max` are `None` |
/// | [`fold`] | the initial value |
use crate::select::Comparator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which end of an ordering to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extreme {
    /// Smallest under the comparator.
    Min,
    /// Largest under the comparator.
    Max,
}

impl Extreme {
    /// Whether `candidate` strictly beats `current`.
    ///
    /// Ties never beat the incumbent, which is what makes the first record
    /// in input order win.
    fn beats<T: ?Sized>(self, candidate: &T, current: &T, comparator: &Comparator<'_, T>) -> bool {
        let cmp = comparator.compare(candidate, current);
        match self {
            Extreme::Min => cmp == Ordering::Less,
            Extreme::Max => cmp == Ordering::Greater,
        }
    }
}

/// Keep whichever of `current` and `candidate` is more extreme.
pub(crate) fn keep_winner<'a, T: ?Sized>(
    current: Option<&'a T>,
    candidate: &'a T,
    comparator: &Comparator<'_, T>,
    kind: Extreme,
) -> &'a T {
    match current {
        Some(current) if !kind.beats(candidate, current, comparator) => current,
        _ => candidate,
    }
}

/// Sum of a numeric field over all records; `0.0` when empty.
pub fn sum<'a, T, I, F>(items: I, f: F) -> f64
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> f64,
{
    items.into_iter().map(f).sum()
}

/// Arithmetic mean of a numeric field, or `None` when there are no records.
pub fn average<'a, T, I, F>(items: I, f: F) -> Option<f64>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> f64,
{
    summarize(items, f).average()
}

/// The minimum or maximum record under `comparator`.
///
/// On ties the record that comes first in input order is returned.
pub fn extreme_by<'a, T, I>(items: I, comparator: &Comparator<'_, T>, kind: Extreme) -> Option<&'a T>
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .fold(None, |best, item| Some(keep_winner(best, item, comparator, kind)))
}

/// Left fold over the records.
///
/// The fold itself is sequential and works with any `combine`. Callers that
/// want to evaluate a fold in pieces and merge the partial results must only
/// do so with an associative `combine` (such as `+` on a salary total).
pub fn fold<'a, T, A, I, F>(items: I, initial: A, combine: F) -> A
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    F: Fn(A, &'a T) -> A,
{
    items.into_iter().fold(initial, combine)
}

/// Count, sum, min and max of a numeric field in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Number of values seen.
    pub count: usize,
    /// Sum of all values.
    pub sum: f64,
    /// Smallest value, if any.
    pub min: Option<f64>,
    /// Largest value, if any.
    pub max: Option<f64>,
}

impl Summary {
    /// Fold one more value into the summary.
    pub fn accept(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    /// Mean of the values seen, or `None` if there were none.
    pub fn average(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Summarize a numeric field over all records.
pub fn summarize<'a, T, I, F>(items: I, f: F) -> Summary
where
    T: 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> f64,
{
    let mut summary = Summary::default();
    for item in items {
        summary.accept(f(item));
    }
    summary
}
