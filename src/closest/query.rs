//! Branch-and-bound search for the items of an index closest to (or furthest from) a target.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashSet};

use geo::Rect;
use tinyvec::TinyVec;
use tracing::{debug, trace, warn};

use crate::cell::CellId;
use crate::closest::accumulator::Accumulator;
use crate::closest::distance::{Distance, MaxDistance, MinDistance};
use crate::closest::options::Options;
use crate::closest::r#trait::DistanceTarget;
use crate::closest::result::QueryResult;
use crate::covering::{fast_covering, intersection};
use crate::geometry::{expand_rect, rects_intersect};
use crate::index::{CellRelation, ItemGeometry, SpatialIndex};

/// The default for [`QueryConfig::min_items_to_enqueue`].
pub const DEFAULT_MIN_ITEMS_TO_ENQUEUE: usize = 10;

/// The default for [`QueryConfig::min_cells_to_enqueue`].
pub const DEFAULT_MIN_CELLS_TO_ENQUEUE: usize = 6;

/// Tuning thresholds of the search. They change how fast a query runs, never what it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// Index cells holding fewer items are tested right away instead of being queued.
    pub min_items_to_enqueue: usize,

    /// Cells spanning fewer index cells have those index cells handled individually instead of
    /// being queued whole.
    pub min_cells_to_enqueue: usize,

    /// Replaces the target's own brute-force threshold when set.
    pub brute_force_index_size: Option<usize>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            min_items_to_enqueue: DEFAULT_MIN_ITEMS_TO_ENQUEUE,
            min_cells_to_enqueue: DEFAULT_MIN_CELLS_TO_ENQUEUE,
            brute_force_index_size: None,
        }
    }
}

/// A cell waiting to be searched, with a bound on the distance to anything below it.
#[derive(Debug, Clone, Copy)]
struct QueueEntry<D: Distance> {
    distance: D,
    id: CellId,
    /// Position of the index cell with this id, if it is one.
    index_cell: Option<usize>,
}

impl<D: Distance> PartialEq for QueueEntry<D> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl<D: Distance> Eq for QueueEntry<D> {}

impl<D: Distance> Ord for QueueEntry<D> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.distance.cmp(&other.distance)
    }
}

impl<D: Distance> PartialOrd for QueueEntry<D> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct QueryStats {
    items_tested: usize,
    cells_enqueued: usize,
    cells_processed: usize,
}

/// Finds the items of a [`SpatialIndex`] that are best with respect to a [`DistanceTarget`].
///
/// With [`MinDistance`] the best items are the closest ones, with [`MaxDistance`] the furthest
/// ones (see [`ClosestQuery`] and [`FurthestQuery`]).
///
/// A query keeps scratch buffers and a covering of the index between calls. Call
/// [`Query::reinit`] if the index it searches is replaced by a modified copy.
///
/// ```
/// use geo::coord;
/// use geo_closest::closest::{ClosestQuery, Distance, Options, PointTarget};
/// use geo_closest::index::CellIndexBuilder;
///
/// let mut builder = CellIndexBuilder::new();
/// builder.add_points(&[
///     coord! { x: 0.1, y: 0.1 },
///     coord! { x: 0.5, y: 0.5 },
///     coord! { x: 0.9, y: 0.9 },
/// ]);
/// let index = builder.finish().unwrap();
///
/// let mut query = ClosestQuery::new(&index);
/// let mut options = Options::default();
/// options.set_max_results(2);
/// let mut target = PointTarget::new(coord! { x: 0.4, y: 0.4 });
/// let results = query.find_closest(&mut target, &options);
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0].item_id(), 1);
/// assert_eq!(results[1].item_id(), 0);
/// ```
#[derive(Debug)]
pub struct Query<'a, I: SpatialIndex, D: Distance> {
    index: &'a I,
    config: QueryConfig,

    // A handful of cells whose union contains every index cell, computed on first use.
    index_covering: TinyVec<[CellId; 6]>,
    index_cells: TinyVec<[Option<usize>; 6]>,
    covering_ready: bool,
    // Item count of the index, computed on first use.
    num_items: Option<usize>,

    max_results: usize,
    max_error: f64,
    region: Option<Rect<f64>>,

    // Only results better than this are of interest. Never loosens within a query.
    distance_limit: D,
    use_conservative_cell_distance: bool,
    avoid_duplicates: bool,
    tested: HashSet<(i32, i32)>,
    queue: BinaryHeap<Reverse<QueueEntry<D>>>,
    accumulator: Accumulator<D>,
    stats: QueryStats,
}

/// Searches for the closest items.
pub type ClosestQuery<'a, I> = Query<'a, I, MinDistance>;

/// Searches for the furthest items.
pub type FurthestQuery<'a, I> = Query<'a, I, MaxDistance>;

impl<'a, I: SpatialIndex, D: Distance> Query<'a, I, D> {
    pub fn new(index: &'a I) -> Self {
        Self::with_config(index, QueryConfig::default())
    }

    pub fn with_config(index: &'a I, config: QueryConfig) -> Self {
        Self {
            index,
            config,
            index_covering: TinyVec::new(),
            index_cells: TinyVec::new(),
            covering_ready: false,
            num_items: None,
            max_results: Options::<D>::MAX_MAX_RESULTS,
            max_error: 0.0,
            region: None,
            distance_limit: D::infinity(),
            use_conservative_cell_distance: false,
            avoid_duplicates: false,
            tested: HashSet::new(),
            queue: BinaryHeap::new(),
            accumulator: Accumulator::new(),
            stats: QueryStats::default(),
        }
    }

    /// Drop the cached covering and item count of the index, so that they are recomputed by the
    /// next search.
    pub fn reinit(&mut self) {
        self.index_covering.clear();
        self.index_cells.clear();
        self.covering_ready = false;
        self.num_items = None;
    }

    pub fn index(&self) -> &'a I {
        self.index
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Find the best items for the target, sorted from best to worst.
    pub fn find_closest(
        &mut self,
        target: &mut dyn DistanceTarget<D>,
        options: &Options<D>,
    ) -> Vec<QueryResult<D>> {
        let mut results = vec![];
        self.find_closest_into(target, options, &mut results);
        results
    }

    /// Like [`Query::find_closest`], but replaces the contents of `results` instead of
    /// allocating.
    pub fn find_closest_into(
        &mut self,
        target: &mut dyn DistanceTarget<D>,
        options: &Options<D>,
        results: &mut Vec<QueryResult<D>>,
    ) {
        results.clear();
        self.find_internal(target, options);
        self.accumulator.drain_into(results);
    }

    /// Find the single best item, or [`QueryResult::empty`] if there is none.
    ///
    /// Panics unless `options.max_results()` is 1.
    pub fn find_closest_one(
        &mut self,
        target: &mut dyn DistanceTarget<D>,
        options: &Options<D>,
    ) -> QueryResult<D> {
        assert_eq!(
            options.max_results(),
            1,
            "find_closest_one requires max_results == 1"
        );
        self.find_internal(target, options);
        self.accumulator.take_singleton()
    }

    /// The distance to the best item, or [`Distance::infinity`] if there is none.
    pub fn distance(&mut self, target: &mut dyn DistanceTarget<D>, options: &Options<D>) -> D {
        let mut options = options.clone();
        options.set_max_results(1);
        self.find_closest_one(target, &options).distance()
    }

    /// Returns `true` if some item is better than `limit`.
    ///
    /// Stops at the first such item, so this is much cheaper than [`Query::distance`].
    pub fn is_distance_less(
        &mut self,
        target: &mut dyn DistanceTarget<D>,
        options: &Options<D>,
        limit: D,
    ) -> bool {
        let mut options = options.clone();
        options.set_max_results(1);
        options.set_max_distance(limit);
        options.set_max_error(f64::INFINITY);
        !self.find_closest_one(target, &options).is_empty()
    }

    /// Returns `true` if some item is better than or equal to `limit`.
    pub fn is_distance_less_or_equal(
        &mut self,
        target: &mut dyn DistanceTarget<D>,
        options: &Options<D>,
        limit: D,
    ) -> bool {
        let mut options = options.clone();
        options.set_max_results(1);
        options.set_inclusive_max_distance(limit);
        options.set_max_error(f64::INFINITY);
        !self.find_closest_one(target, &options).is_empty()
    }

    /// Like [`Query::is_distance_less_or_equal`], but also true when the computed distance
    /// exceeds `limit` by no more than the rounding error of the distance kernels.
    pub fn is_conservative_distance_less_or_equal(
        &mut self,
        target: &mut dyn DistanceTarget<D>,
        options: &Options<D>,
        limit: D,
    ) -> bool {
        let mut options = options.clone();
        options.set_max_results(1);
        options.set_conservative_max_distance(limit);
        options.set_max_error(f64::INFINITY);
        !self.find_closest_one(target, &options).is_empty()
    }

    /// The geometry of the item a result refers to. Interior and empty results have none.
    pub fn item(&self, result: &QueryResult<D>) -> Option<ItemGeometry> {
        self.index.item(result.shape_id(), result.item_id())
    }

    fn find_internal(&mut self, target: &mut dyn DistanceTarget<D>, options: &Options<D>) {
        self.search(target, options);
        trace!(
            items_tested = self.stats.items_tested,
            cells_enqueued = self.stats.cells_enqueued,
            cells_processed = self.stats.cells_processed,
            num_results = self.accumulator.len(),
            "query finished"
        );
    }

    fn search(&mut self, target: &mut dyn DistanceTarget<D>, options: &Options<D>) {
        self.max_results = options.max_results();
        self.max_error = options.max_error();
        self.region = options.region().copied();
        self.distance_limit = options.max_distance();
        self.accumulator.reset(self.max_results, self.max_error);
        self.queue.clear();
        self.tested.clear();
        self.stats = QueryStats::default();

        if !(D::zero() < self.distance_limit) {
            return;
        }
        if self.max_results == Options::<D>::MAX_MAX_RESULTS
            && options.max_distance() == D::infinity()
        {
            warn!("returning all items, neither max_results nor max_distance is set");
        }

        if options.include_interiors() && D::CONTAINMENT_IS_BEST {
            self.add_interiors(target);
            if !(D::zero() < self.distance_limit) {
                return;
            }
        }

        // A target exploiting max_error may report cell distances up to max_error too large,
        // so queued cell distances are lowered by that amount to remain lower bounds. This is
        // unnecessary when the first result already drives the limit to zero.
        let target_uses_max_error = target.set_max_error(self.max_error) && self.max_error > 0.0;
        self.use_conservative_cell_distance = target_uses_max_error
            && (self.distance_limit == D::infinity()
                || D::zero() < self.distance_limit.sub_delta(self.max_error));

        let brute_force_size = self
            .config
            .brute_force_index_size
            .unwrap_or_else(|| target.max_brute_force_index_size());
        let index = self.index;
        let num_items = *self.num_items.get_or_insert_with(|| index.num_items());
        if options.use_brute_force() || num_items <= brute_force_size {
            debug!(num_items, brute_force_size, "searching by brute force");
            // Every item is visited exactly once.
            self.avoid_duplicates = false;
            self.find_brute_force(target);
        } else {
            // Repeated probes of an item may return different distances when the target uses
            // max_error.
            self.avoid_duplicates = target_uses_max_error && self.max_results > 1;
            self.find_optimized(target);
        }
    }

    fn add_interiors(&mut self, target: &mut dyn DistanceTarget<D>) {
        let index = self.index;
        let max_results = self.max_results;
        let mut shape_ids = BTreeSet::new();
        target.visit_containing_shapes(index, &mut |shape_id| {
            shape_ids.insert(shape_id);
            shape_ids.len() < max_results
        });

        for shape_id in shape_ids {
            if let Some(region) = &self.region {
                let meets_region = index
                    .shapes()
                    .get(shape_id as usize)
                    .is_some_and(|shape| shape.region_intersects_rect(region));
                if !meets_region {
                    continue;
                }
            }
            self.add_result(QueryResult::new(D::zero(), shape_id, -1));
        }
    }

    fn find_brute_force(&mut self, target: &mut dyn DistanceTarget<D>) {
        let index = self.index;
        for (shape_id, shape) in index.shapes().iter().enumerate() {
            for (item_id, item) in shape.items().iter().enumerate() {
                self.maybe_add_result(target, shape_id as i32, item_id as i32, item);
            }
        }
    }

    fn find_optimized(&mut self, target: &mut dyn DistanceTarget<D>) {
        self.init_queue(target);

        let index = self.index;
        let mut iter = index.iter();
        while let Some(Reverse(entry)) = self.queue.pop() {
            if !(entry.distance < self.distance_limit) {
                self.queue.clear();
                break;
            }
            if let Some(pos) = entry.index_cell {
                self.process_items(target, pos);
                continue;
            }

            // Split the cell into its children. Queued cells without an index cell are strict
            // ancestors of every index cell they intersect, so the index cells below each
            // child form a contiguous run found by seeking to the child boundaries.
            let children = entry.id.children();
            let mut bounds = [0; 5];
            for (k, child) in children.iter().enumerate() {
                iter.seek(child.range_min());
                bounds[k] = iter.position();
            }
            iter.seek(entry.id.range_max().next());
            bounds[4] = iter.position();

            for (k, child) in children.into_iter().enumerate() {
                self.process_or_enqueue_range(target, child, bounds[k], bounds[k + 1]);
            }
        }
    }

    fn init_queue(&mut self, target: &mut dyn DistanceTarget<D>) {
        let Some(bound) = target.bound() else {
            return;
        };
        let index = self.index;
        let mut iter = index.iter();

        // When a single result is wanted, the items of the index cell under the target give a
        // finite limit early, which then shrinks the region searched below.
        if self.max_results == 1 {
            if let Some(center) = target.center() {
                if iter.locate_point(center) {
                    self.process_items(target, iter.position());
                    if !(D::zero() < self.distance_limit) {
                        return;
                    }
                }
            }
        }

        if !self.covering_ready {
            self.init_covering();
        }

        let radius = if self.distance_limit == D::infinity() {
            None
        } else {
            self.distance_limit.search_radius()
        };
        let Some(radius) = radius else {
            for i in 0..self.index_covering.len() {
                let (id, index_cell) = (self.index_covering[i], self.index_cells[i]);
                self.process_or_enqueue(target, id, index_cell);
            }
            return;
        };

        // Only the part of the index within `radius` of the target can hold results.
        let search_rect = expand_rect(&bound, radius);
        let search_covering = fast_covering(&search_rect, 4);
        let initial_cells = intersection(&self.index_covering, &search_covering);
        trace!(
            radius,
            num_initial_cells = initial_cells.len(),
            "seeding from search covering"
        );

        let mut i = 0;
        let mut j = 0;
        while i < initial_cells.len() {
            let id_i = initial_cells[i];
            while j < self.index_covering.len() && self.index_covering[j].range_max() < id_i {
                j += 1;
            }
            if j == self.index_covering.len() {
                break;
            }
            let id_j = self.index_covering[j];
            if id_i == id_j {
                self.process_or_enqueue(target, id_j, self.index_cells[j]);
                i += 1;
                j += 1;
                continue;
            }
            match iter.locate_cell(id_i) {
                CellRelation::Indexed => {
                    // Skip the remaining initial cells below this index cell.
                    let cell_id = iter.id();
                    self.process_or_enqueue(target, cell_id, Some(iter.position()));
                    let last_id = cell_id.range_max();
                    i += 1;
                    while i < initial_cells.len() && initial_cells[i] <= last_id {
                        i += 1;
                    }
                }
                CellRelation::Subdivided => {
                    self.process_or_enqueue(target, id_i, None);
                    i += 1;
                }
                CellRelation::Disjoint => i += 1,
            }
        }
    }

    /// Cover the index with at most four cells, each shrunk to the smallest cell containing
    /// its index cells.
    fn init_covering(&mut self) {
        self.index_covering.clear();
        self.index_cells.clear();
        self.covering_ready = true;

        let index = self.index;
        let cells = index.cells();
        let (Some(first), Some(last)) = (cells.first(), cells.last()) else {
            return;
        };
        let last_pos = cells.len() - 1;
        let mut next = 0;
        if first.id() != last.id() {
            if let Some(level) = first.id().common_ancestor_level(last.id()) {
                // Every child of the common ancestor except the last.
                let level = level + 1;
                let mut iter = index.iter();
                let last_id = last.id().parent_at(level);
                let mut id = first.id().parent_at(level);
                while id != last_id {
                    if id.range_max() >= cells[next].id() {
                        let range_first = next;
                        iter.seek(id.range_max().next());
                        next = iter.position();
                        self.add_initial_range(range_first, next - 1);
                    }
                    id = id.next();
                }
            }
        }
        self.add_initial_range(next, last_pos);
        debug!(covering = ?self.index_covering, "computed index covering");
    }

    /// Add the smallest cell containing the index cells at positions `first..=last`.
    fn add_initial_range(&mut self, first: usize, last: usize) {
        let cells = self.index.cells();
        let (first_id, last_id) = (cells[first].id(), cells[last].id());
        if first == last {
            self.index_covering.push(first_id);
            self.index_cells.push(Some(first));
        } else {
            let level = first_id.common_ancestor_level(last_id).unwrap_or(0);
            self.index_covering.push(first_id.parent_at(level));
            self.index_cells.push(None);
        }
    }

    /// Handle the index cells at positions `start..end`, which all lie within `id`.
    fn process_or_enqueue_range(
        &mut self,
        target: &mut dyn DistanceTarget<D>,
        id: CellId,
        start: usize,
        end: usize,
    ) {
        if start == end {
            return;
        }
        let index = self.index;
        let cells = index.cells();
        // A cell without an index cell must be a strict ancestor of the cells below it.
        if end - start >= self.config.min_cells_to_enqueue && cells[start].id() != id {
            self.process_or_enqueue(target, id, None);
            return;
        }
        for pos in start..end {
            self.process_or_enqueue(target, cells[pos].id(), Some(pos));
        }
    }

    fn process_or_enqueue(
        &mut self,
        target: &mut dyn DistanceTarget<D>,
        id: CellId,
        index_cell: Option<usize>,
    ) {
        if let Some(region) = &self.region {
            if !rects_intersect(&id.rect(), region) {
                return;
            }
        }
        if let Some(pos) = index_cell {
            let num_items = self.index.cells()[pos].num_items();
            if num_items == 0 {
                return;
            }
            if num_items < self.config.min_items_to_enqueue {
                // Cheaper than computing the distance to the cell.
                self.process_items(target, pos);
                return;
            }
        }

        let mut distance = self.distance_limit;
        if target.update_distance_to_cell(id, &mut distance) {
            if self.use_conservative_cell_distance {
                distance = distance.sub_delta(self.max_error);
            }
            self.stats.cells_enqueued += 1;
            self.queue.push(Reverse(QueueEntry {
                distance,
                id,
                index_cell,
            }));
        }
    }

    fn process_items(&mut self, target: &mut dyn DistanceTarget<D>, pos: usize) {
        let index = self.index;
        let shapes = index.shapes();
        self.stats.cells_processed += 1;
        for item in index.cells()[pos].items() {
            let Some(geometry) = shapes
                .get(item.shape_id as usize)
                .and_then(|shape| shape.item(item.item_id as usize))
            else {
                continue;
            };
            self.maybe_add_result(target, item.shape_id as i32, item.item_id as i32, geometry);
        }
    }

    fn maybe_add_result(
        &mut self,
        target: &mut dyn DistanceTarget<D>,
        shape_id: i32,
        item_id: i32,
        item: &ItemGeometry,
    ) {
        if let Some(region) = &self.region {
            if !item.intersects_rect(region) {
                return;
            }
        }
        if self.avoid_duplicates && !self.tested.insert((shape_id, item_id)) {
            return;
        }
        self.stats.items_tested += 1;
        let mut distance = self.distance_limit;
        if target.update_distance_to_item(item, &mut distance) {
            self.add_result(QueryResult::new(distance, shape_id, item_id));
        }
    }

    fn add_result(&mut self, result: QueryResult<D>) {
        self.accumulator.add(result, &mut self.distance_limit);
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use geo::coord;

    use super::*;
    use crate::closest::target::PointTarget;
    use crate::index::{CellIndex, CellIndexBuilder, IndexCell, Shape};

    /// Counts how often the item count of an index is asked for.
    struct CountingIndex {
        inner: CellIndex,
        num_items_calls: Cell<usize>,
    }

    impl SpatialIndex for CountingIndex {
        fn cells(&self) -> &[IndexCell] {
            self.inner.cells()
        }

        fn shapes(&self) -> &[Shape] {
            self.inner.shapes()
        }

        fn num_items(&self) -> usize {
            self.num_items_calls.set(self.num_items_calls.get() + 1);
            self.shapes().iter().map(Shape::num_items).sum()
        }
    }

    #[test]
    fn item_count_is_computed_once() {
        let mut builder = CellIndexBuilder::new();
        builder.add_points(&crate::test::random_points(300, 5));
        let index = CountingIndex {
            inner: builder.finish().unwrap(),
            num_items_calls: Cell::new(0),
        };

        let mut query = ClosestQuery::new(&index);
        let mut options = Options::default();
        options.set_max_results(2);
        for k in 0..5 {
            let center = coord! { x: 0.1 * k as f64, y: 0.5 };
            query.find_closest(&mut PointTarget::new(center), &options);
        }
        options.set_use_brute_force(true);
        query.find_closest(&mut PointTarget::new(coord! { x: 0.5, y: 0.5 }), &options);
        assert_eq!(index.num_items_calls.get(), 1);
        assert_eq!(query.num_items, Some(300));

        query.reinit();
        assert_eq!(query.num_items, None);
        query.find_closest(&mut PointTarget::new(coord! { x: 0.5, y: 0.5 }), &options);
        assert_eq!(index.num_items_calls.get(), 2);
    }

    #[test]
    fn covering_contains_every_index_cell() {
        let mut builder = CellIndexBuilder::new_with_max_items(4);
        builder.add_points(&crate::test::random_points(300, 11));
        let index = builder.finish().unwrap();

        let mut query = ClosestQuery::new(&index);
        query.init_covering();
        assert!(!query.index_covering.is_empty());
        assert!(query.index_covering.len() <= 6);
        for pair in query.index_covering.windows(2) {
            assert!(pair[0].range_max() < pair[1].range_min());
        }
        for cell in index.cells() {
            assert!(query
                .index_covering
                .iter()
                .any(|covering| covering.contains(cell.id())));
        }
        for (id, index_cell) in query.index_covering.iter().zip(query.index_cells.iter()) {
            if let Some(pos) = index_cell {
                assert_eq!(index.cells()[*pos].id(), *id);
            }
        }
    }

    #[test]
    fn covering_of_clustered_index_is_shrunk() {
        let mut builder = CellIndexBuilder::new_with_max_items(1);
        builder.add_points(&[coord! { x: 0.1, y: 0.1 }, coord! { x: 0.12, y: 0.1 }]);
        let index = builder.finish().unwrap();

        let mut query = ClosestQuery::new(&index);
        query.init_covering();
        for id in query.index_covering.iter() {
            // far smaller than the quadrant holding both points
            assert!(id.level() > 2);
        }
    }

    #[test]
    fn reinit_drops_covering() {
        let mut builder = CellIndexBuilder::new();
        builder.add_points(&crate::test::random_points(200, 3));
        let index = builder.finish().unwrap();

        let mut query = ClosestQuery::new(&index);
        let mut options = Options::default();
        options.set_max_results(3);
        let mut target = PointTarget::new(coord! { x: 0.5, y: 0.5 });
        let before = query.find_closest(&mut target, &options);
        assert!(query.covering_ready);

        query.reinit();
        assert!(!query.covering_ready);
        assert!(query.index_covering.is_empty());
        assert_eq!(query.find_closest(&mut target, &options), before);
    }

    #[test]
    fn queue_entries_order_by_distance() {
        let near = QueueEntry {
            distance: MinDistance::new(0.1),
            id: CellId::root().child(3),
            index_cell: None,
        };
        let far = QueueEntry {
            distance: MinDistance::new(0.2),
            id: CellId::root().child(0),
            index_cell: Some(0),
        };
        let mut queue = BinaryHeap::new();
        queue.push(Reverse(far));
        queue.push(Reverse(near));
        assert_eq!(queue.pop().map(|entry| entry.0.id), Some(near.id));
    }
}
