use geo::Rect;

use crate::closest::distance::Distance;

/// Per-query settings.
///
/// ```
/// use geo_closest::closest::{Distance, MinDistance, Options};
///
/// let mut options = Options::<MinDistance>::default();
/// options.set_max_results(5);
/// options.set_max_distance(MinDistance::new(0.1));
/// assert_eq!(options.max_results(), 5);
/// assert!(options.include_interiors());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Options<D: Distance> {
    max_results: usize,
    max_distance: D,
    max_error: f64,
    include_interiors: bool,
    use_brute_force: bool,
    region: Option<Rect<f64>>,
}

impl<D: Distance> Options<D> {
    /// The `max_results` value meaning "no limit".
    pub const MAX_MAX_RESULTS: usize = usize::MAX;

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Return at most this many results. Panics if `max_results` is zero.
    pub fn set_max_results(&mut self, max_results: usize) {
        assert!(max_results >= 1, "max_results must be at least 1");
        self.max_results = max_results;
    }

    pub fn max_distance(&self) -> D {
        self.max_distance
    }

    /// Only return results whose distance is better than `max_distance`.
    pub fn set_max_distance(&mut self, max_distance: D) {
        self.max_distance = max_distance;
    }

    /// Only return results whose distance is better than or equal to `max_distance`.
    pub fn set_inclusive_max_distance(&mut self, max_distance: D) {
        self.max_distance = max_distance.successor();
    }

    /// Like [`Options::set_inclusive_max_distance`], but also accepts results whose computed
    /// distance exceeds `max_distance` by no more than the rounding error of the distance
    /// kernels. No item whose exact distance is within `max_distance` is then missed.
    pub fn set_conservative_max_distance(&mut self, max_distance: D) {
        self.max_distance = max_distance
            .add_delta(max_distance.kernel_error())
            .successor();
    }

    pub fn max_error(&self) -> f64 {
        self.max_error
    }

    /// Allow results to be up to `max_error` worse than the true best results.
    ///
    /// Once `max_results` candidates are found, later candidates must improve on the worst one
    /// by at least `max_error`, which lets the search stop early.
    pub fn set_max_error(&mut self, max_error: f64) {
        assert!(max_error >= 0.0, "max_error must be non-negative");
        self.max_error = max_error;
    }

    pub fn include_interiors(&self) -> bool {
        self.include_interiors
    }

    /// Report polygons containing the target as zero-distance results with item id `-1`.
    pub fn set_include_interiors(&mut self, include_interiors: bool) {
        self.include_interiors = include_interiors;
    }

    pub fn use_brute_force(&self) -> bool {
        self.use_brute_force
    }

    /// Test every item instead of searching the index.
    pub fn set_use_brute_force(&mut self, use_brute_force: bool) {
        self.use_brute_force = use_brute_force;
    }

    pub fn region(&self) -> Option<&Rect<f64>> {
        self.region.as_ref()
    }

    /// Only return items that intersect the rectangle.
    pub fn set_region(&mut self, region: Option<Rect<f64>>) {
        self.region = region;
    }
}

impl<D: Distance> Default for Options<D> {
    fn default() -> Self {
        Self {
            max_results: Self::MAX_MAX_RESULTS,
            max_distance: D::infinity(),
            max_error: 0.0,
            include_interiors: true,
            use_brute_force: false,
            region: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::closest::distance::{MaxDistance, MinDistance};

    #[test]
    fn defaults() {
        let options = Options::<MinDistance>::default();
        assert_eq!(options.max_results(), Options::<MinDistance>::MAX_MAX_RESULTS);
        assert_eq!(options.max_distance(), MinDistance::infinity());
        assert_eq!(options.max_error(), 0.0);
        assert!(options.include_interiors());
        assert!(!options.use_brute_force());
        assert!(options.region().is_none());

        let options = Options::<MaxDistance>::default();
        assert_eq!(options.max_distance(), MaxDistance::infinity());
    }

    #[test]
    fn inclusive_max_distance() {
        let mut options = Options::<MinDistance>::default();
        options.set_inclusive_max_distance(MinDistance::new(0.25));
        assert!(MinDistance::new(0.25) < options.max_distance());
    }

    #[test]
    fn conservative_max_distance() {
        let mut inclusive = Options::<MinDistance>::default();
        inclusive.set_inclusive_max_distance(MinDistance::new(0.25));
        let mut conservative = Options::<MinDistance>::default();
        conservative.set_conservative_max_distance(MinDistance::new(0.25));
        assert!(inclusive.max_distance() < conservative.max_distance());

        let mut conservative = Options::<MaxDistance>::default();
        conservative.set_conservative_max_distance(MaxDistance::new(0.25));
        assert!(MaxDistance::new(0.25) < conservative.max_distance());
        assert!(conservative.max_distance().value() < 0.25);

        let mut unbounded = Options::<MinDistance>::default();
        unbounded.set_conservative_max_distance(MinDistance::infinity());
        assert_eq!(unbounded.max_distance(), MinDistance::infinity());
    }

    #[test]
    #[should_panic(expected = "max_results must be at least 1")]
    fn zero_max_results() {
        Options::<MinDistance>::default().set_max_results(0);
    }
}
