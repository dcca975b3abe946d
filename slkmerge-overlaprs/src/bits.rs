use num_traits::Float;

use super::Overlapper;
use slkmerge_core::models::Interval;

/// A Binary Interval Search data structure for overlap queries along a road.
///
/// From the journal article: <https://academic.oup.com/bioinformatics/article/29/1/1/273289>
///
/// BITS keeps the intervals sorted by start along with the longest interval
/// length. A query binary searches for the first interval that could reach the
/// query start (`start - max_len`) and scans forward until intervals begin after
/// the query end.
///
/// Intervals with a NaN start or end can never overlap anything and are dropped
/// when the structure is built.
///
/// # Examples
///
/// ```
/// use slkmerge_overlaprs::{Bits, Overlapper, Interval};
///
/// let surveys = vec![
///     Interval { start: 0.0, end: 0.15, val: "run1" },
///     Interval { start: 0.2, end: 0.25, val: "run2" },
///     Interval { start: 0.225, end: 0.275, val: "run3" },
/// ];
///
/// let bits = Bits::build(surveys);
///
/// let overlaps = bits.find(0.21, 0.24);
/// assert_eq!(overlaps.len(), 2); // run2 and run3
/// ```
#[derive(Debug, Clone)]
pub struct Bits<I, T>
where
    I: Float + Send + Sync,
    T: Clone + Send + Sync,
{
    /// List of intervals, sorted by start then end
    pub intervals: Vec<Interval<I, T>>,
    /// Longest interval, bounds the backwards reach of a query
    max_len: I,
}

impl<I, T> Overlapper<I, T> for Bits<I, T>
where
    I: Float + Send + Sync,
    T: Clone + Send + Sync,
{
    /// Index `intervals`. They are sorted stably by position, so rows sharing a
    /// start keep their input order.
    /// ```
    /// use slkmerge_overlaprs::{Bits, Overlapper};
    /// use slkmerge_core::models::Interval;
    ///
    /// let data = (0..20).step_by(5)
    ///                   .map(|x| Interval{start: x as f64, end: x as f64 + 10.0, val: true})
    ///                   .collect::<Vec<Interval<f64, bool>>>();
    /// let bits = Bits::build(data);
    /// assert_eq!(bits.len(), 4);
    /// ```
    fn build(mut intervals: Vec<Interval<I, T>>) -> Self
    where
        Self: Sized,
    {
        intervals.retain(|x| !x.start.is_nan() && !x.end.is_nan());
        intervals.sort_by(|a, b| a.cmp_position(b));

        let max_len = intervals
            .iter()
            .map(|x| x.len())
            .fold(I::zero(), |acc, len| acc.max(len));

        Bits { intervals, max_len }
    }

    /// Collect every interval strictly overlapping `start .. stop`.
    /// ```
    /// use slkmerge_overlaprs::{Bits, Overlapper};
    /// use slkmerge_core::models::Interval;
    ///
    /// let bits = Bits::build((0..100).step_by(5)
    ///                                 .map(|x| Interval{start: x as f64, end: x as f64 + 2.0, val: true})
    ///                                 .collect::<Vec<Interval<f64, bool>>>());
    /// assert_eq!(bits.find(5.0, 11.0).len(), 2);
    /// ```
    #[inline]
    fn find(&self, start: I, stop: I) -> Vec<Interval<I, T>> {
        self.find_from(start, stop).cloned().collect()
    }

    fn find_iter<'a>(
        &'a self,
        start: I,
        stop: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a> {
        Box::new(self.find_from(start, stop))
    }
}

impl<I, T> Bits<I, T>
where
    I: Float + Send + Sync,
    T: Clone + Send + Sync,
{
    #[inline]
    fn find_from(&self, start: I, stop: I) -> IterFind<'_, I, T> {
        IterFind {
            inner: self,
            off: Self::lower_bound(start - self.max_len, &self.intervals),
            start,
            stop,
        }
    }

    /// Number of indexed intervals
    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// True when nothing was indexed
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Iterate the indexed intervals in start order
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Interval<I, T>> {
        self.intervals.iter()
    }

    /// Position of the first interval starting at or after `start`.
    ///
    /// Callers pass the query start minus the longest interval length, so no
    /// interval that could reach the query is skipped.
    #[inline]
    pub fn lower_bound(start: I, intervals: &[Interval<I, T>]) -> usize {
        intervals.partition_point(|v| v.start < start)
    }
}

/// Lazy overlap query returned by [`Bits::find_iter`](Overlapper::find_iter).
///
/// Yields the intervals strictly overlapping the query in start order and stops
/// at the first interval starting at or after the query end.
#[derive(Debug)]
pub struct IterFind<'a, I, T>
where
    T: Clone + Send + Sync + 'a,
    I: Float + Send + Sync,
{
    inner: &'a Bits<I, T>,
    off: usize,
    start: I,
    stop: I,
}

impl<'a, I, T> Iterator for IterFind<'a, I, T>
where
    T: Clone + Send + Sync + 'a,
    I: Float + Send + Sync,
{
    type Item = &'a Interval<I, T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        while self.off < self.inner.intervals.len() {
            let interval = &self.inner.intervals[self.off];
            self.off += 1;
            if interval.overlap(self.start, self.stop) {
                return Some(interval);
            } else if interval.start >= self.stop {
                break;
            }
        }
        None
    }
}

impl<I, T> IntoIterator for Bits<I, T>
where
    T: Clone + Send + Sync,
    I: Float + Send + Sync,
{
    type Item = Interval<I, T>;
    type IntoIter = ::std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<'a, I, T> IntoIterator for &'a Bits<I, T>
where
    T: Clone + Send + Sync + 'a,
    I: Float + Send + Sync,
{
    type Item = &'a Interval<I, T>;
    type IntoIter = std::slice::Iter<'a, Interval<I, T>>;

    fn into_iter(self) -> std::slice::Iter<'a, Interval<I, T>> {
        self.intervals.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::{assert_eq, assert_ne};
    use rstest::{fixture, rstest};

    #[fixture]
    fn intervals() -> Vec<Interval<f64, &'static str>> {
        vec![
            Interval {
                start: 6.0,
                end: 10.0,
                val: "c",
            },
            Interval {
                start: 1.0,
                end: 5.0,
                val: "a",
            },
            Interval {
                start: 3.0,
                end: 7.0,
                val: "b",
            },
            Interval {
                start: 8.0,
                end: 12.0,
                val: "d",
            },
        ]
    }

    #[rstest]
    fn test_build_and_len(intervals: Vec<Interval<f64, &'static str>>) {
        let bits = Bits::build(intervals.clone());
        assert_eq!(bits.len(), intervals.len());
        assert_ne!(bits.is_empty(), true);
    }

    #[rstest]
    fn test_build_sorts_by_start(intervals: Vec<Interval<f64, &'static str>>) {
        let bits = Bits::build(intervals);
        let vals: Vec<&str> = bits.iter().map(|i| i.val).collect();
        assert_eq!(vals, vec!["a", "b", "c", "d"]);
    }

    #[rstest]
    fn test_find_overlapping_intervals(intervals: Vec<Interval<f64, &'static str>>) {
        let bits = Bits::build(intervals);

        let results = bits.find(2.0, 4.0);
        let vals: Vec<&str> = results.iter().map(|i| i.val).collect();
        assert_eq!(vals, vec!["a", "b"]);

        let results = bits.find(9.0, 11.0);
        let vals: Vec<&str> = results.iter().map(|i| i.val).collect();
        assert_eq!(vals, vec!["c", "d"]);
    }

    #[rstest]
    fn test_long_interval_found_from_far_start() {
        let bits = Bits::build(vec![
            Interval {
                start: 0.0,
                end: 100.0,
                val: "long",
            },
            Interval {
                start: 10.0,
                end: 11.0,
                val: "short",
            },
            Interval {
                start: 50.0,
                end: 51.0,
                val: "later",
            },
        ]);

        let vals: Vec<&str> = bits.find_iter(90.0, 95.0).map(|i| i.val).collect();
        assert_eq!(vals, vec!["long"]);
    }

    #[rstest]
    fn test_touching_endpoints_do_not_overlap(intervals: Vec<Interval<f64, &'static str>>) {
        let bits = Bits::build(intervals);

        // "a" ends at 5 and "c" starts at 6
        let vals: Vec<&str> = bits.find_iter(5.0, 6.0).map(|i| i.val).collect();
        assert_eq!(vals, vec!["b"]);

        assert_eq!(bits.find(12.0, 20.0).len(), 0);
    }

    #[rstest]
    fn test_find_no_overlap(intervals: Vec<Interval<f64, &'static str>>) {
        let bits = Bits::build(intervals);

        let results = bits.find(13.0, 15.0);
        assert_eq!(results.is_empty(), true);
    }

    #[rstest]
    fn test_nan_intervals_are_dropped() {
        let bits = Bits::build(vec![
            Interval {
                start: f64::NAN,
                end: 5.0,
                val: 1,
            },
            Interval {
                start: 0.0,
                end: 5.0,
                val: 2,
            },
        ]);

        assert_eq!(bits.len(), 1);
        assert_eq!(bits.find(0.0, 10.0)[0].val, 2);
    }

    #[rstest]
    fn test_nan_query_finds_nothing(intervals: Vec<Interval<f64, &'static str>>) {
        let bits = Bits::build(intervals);
        assert_eq!(bits.find(f64::NAN, 4.0).len(), 0);
    }

    #[rstest]
    fn test_empty_bits() {
        let bits: Bits<f64, &str> = Bits::build(vec![]);

        assert_eq!(bits.len(), 0);
        assert_eq!(bits.is_empty(), true);

        let results = bits.find(1.0, 2.0);

        assert_eq!(results.is_empty(), true);
    }
}
