//! Result collection strategies, chosen per query from `max_results`.

use std::collections::BTreeSet;

use crate::closest::distance::Distance;
use crate::closest::options::Options;
use crate::closest::result::QueryResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Keep only the best result.
    Singleton,
    /// Keep everything, sort and deduplicate at the end.
    Unbounded,
    /// Keep the best `k` results in an ordered set.
    Bounded(usize),
}

/// Collects results and tightens the distance limit as the result set fills up.
///
/// The buffers are kept between queries to reuse their allocations.
#[derive(Debug)]
pub(crate) struct Accumulator<D: Distance> {
    mode: Mode,
    max_error: f64,
    singleton: QueryResult<D>,
    vector: Vec<QueryResult<D>>,
    set: BTreeSet<QueryResult<D>>,
}

impl<D: Distance> Accumulator<D> {
    pub(crate) fn new() -> Self {
        Self {
            mode: Mode::Unbounded,
            max_error: 0.0,
            singleton: QueryResult::empty(),
            vector: vec![],
            set: BTreeSet::new(),
        }
    }

    pub(crate) fn reset(&mut self, max_results: usize, max_error: f64) {
        self.mode = match max_results {
            1 => Mode::Singleton,
            k if k == Options::<D>::MAX_MAX_RESULTS => Mode::Unbounded,
            k => Mode::Bounded(k),
        };
        self.max_error = max_error;
        self.singleton = QueryResult::empty();
        self.vector.clear();
        self.set.clear();
    }

    /// Record a result whose distance is better than `limit`, tightening `limit` once no worse
    /// result can enter the final set.
    pub(crate) fn add(&mut self, result: QueryResult<D>, limit: &mut D) {
        match self.mode {
            Mode::Singleton => {
                self.singleton = result;
                *limit = result.distance().sub_delta(self.max_error);
            }
            Mode::Unbounded => self.vector.push(result),
            Mode::Bounded(max_results) => {
                // The set may already be full, but the new result might be a duplicate of an
                // existing one, so insert before evicting.
                self.set.insert(result);
                if self.set.len() > max_results {
                    self.set.pop_last();
                }
                if self.set.len() >= max_results {
                    if let Some(worst) = self.set.last() {
                        *limit = worst.distance().sub_delta(self.max_error);
                    }
                }
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self.mode {
            Mode::Singleton => usize::from(!self.singleton.is_empty()),
            Mode::Unbounded => self.vector.len(),
            Mode::Bounded(_) => self.set.len(),
        }
    }

    /// Take the single best result, or the empty result.
    pub(crate) fn take_singleton(&mut self) -> QueryResult<D> {
        debug_assert_eq!(self.mode, Mode::Singleton);
        std::mem::take(&mut self.singleton)
    }

    /// Move the collected results, sorted and without duplicates, to the end of `out`.
    pub(crate) fn drain_into(&mut self, out: &mut Vec<QueryResult<D>>) {
        match self.mode {
            Mode::Singleton => {
                let result = self.take_singleton();
                if !result.is_empty() {
                    out.push(result);
                }
            }
            Mode::Unbounded => {
                self.vector.sort_unstable();
                self.vector.dedup();
                out.append(&mut self.vector);
            }
            Mode::Bounded(_) => {
                out.extend(std::mem::take(&mut self.set));
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::closest::distance::MinDistance;

    fn result(distance: f64, item_id: i32) -> QueryResult<MinDistance> {
        QueryResult::new(MinDistance::new(distance), 0, item_id)
    }

    #[test]
    fn singleton_tightens_limit() {
        let mut accumulator = Accumulator::new();
        accumulator.reset(1, 0.05);
        let mut limit = MinDistance::infinity();
        accumulator.add(result(0.5, 0), &mut limit);
        assert!((limit.value() - 0.45).abs() < 1e-12);
        accumulator.add(result(0.2, 1), &mut limit);

        let mut out = vec![];
        accumulator.drain_into(&mut out);
        assert_eq!(out, vec![result(0.2, 1)]);
        assert_eq!(accumulator.len(), 0);
    }

    #[test]
    fn unbounded_sorts_and_dedups() {
        let mut accumulator = Accumulator::new();
        accumulator.reset(Options::<MinDistance>::MAX_MAX_RESULTS, 0.0);
        let mut limit = MinDistance::infinity();
        for r in [result(0.3, 2), result(0.1, 1), result(0.3, 2), result(0.2, 0)] {
            accumulator.add(r, &mut limit);
        }
        assert_eq!(limit, MinDistance::infinity());

        let mut out = vec![];
        accumulator.drain_into(&mut out);
        assert_eq!(out, vec![result(0.1, 1), result(0.2, 0), result(0.3, 2)]);
    }

    #[test]
    fn bounded_evicts_worst() {
        let mut accumulator = Accumulator::new();
        accumulator.reset(2, 0.0);
        let mut limit = MinDistance::infinity();
        accumulator.add(result(0.4, 0), &mut limit);
        assert_eq!(limit, MinDistance::infinity());
        accumulator.add(result(0.3, 1), &mut limit);
        assert_eq!(limit, MinDistance::new(0.4));

        // a duplicate of a kept result does not evict anything
        accumulator.add(result(0.3, 1), &mut limit);
        assert_eq!(accumulator.len(), 2);
        assert_eq!(limit, MinDistance::new(0.4));

        accumulator.add(result(0.1, 2), &mut limit);
        assert_eq!(limit, MinDistance::new(0.3));

        let mut out = vec![result(9.0, 9)];
        accumulator.drain_into(&mut out);
        assert_eq!(out, vec![result(9.0, 9), result(0.1, 2), result(0.3, 1)]);
    }
}
