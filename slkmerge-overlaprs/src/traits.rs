use num_traits::Float;

pub use slkmerge_core::models::Interval;

///
/// An index over half-open SLK intervals answering strict overlap queries.
///
/// An interval `[s, e)` overlaps the query `[start, end)` when
/// `s < end && e > start`; touching endpoints do not overlap.
///
pub trait Overlapper<I, T>: Send + Sync
where
    I: Float + Send + Sync,
    T: Clone + Send + Sync,
{
    /// Index the intervals. Ones with a NaN bound are never returned.
    fn build(intervals: Vec<Interval<I, T>>) -> Self
    where
        Self: Sized;

    /// Owned copies of every overlapping interval.
    fn find(&self, start: I, end: I) -> Vec<Interval<I, T>>;

    /// Overlapping intervals by reference, without allocating.
    fn find_iter<'a>(
        &'a self,
        start: I,
        end: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a>;
}
