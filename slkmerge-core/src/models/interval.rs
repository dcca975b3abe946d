use num_traits::Float;
use std::cmp::Ordering;

/// Represent a range along a road from [start, end)
/// Inclusive start, exclusive of end
#[derive(Debug, Clone)]
pub struct Interval<I, T>
where
    I: Float + Send + Sync,
    T: Clone + Send + Sync,
{
    pub start: I,
    pub end: I,
    pub val: T,
}

impl<I, T> Interval<I, T>
where
    I: Float + Send + Sync,
    T: Clone + Send + Sync,
{
    /// Length of the interval, zero for inverted intervals
    #[inline]
    pub fn len(&self) -> I {
        (self.end - self.start).max(I::zero())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.end > self.start)
    }

    /// Compute the intsect between this interval and `start..end`
    #[inline]
    pub fn intersect(&self, start: I, end: I) -> I {
        (self.end.min(end) - self.start.max(start)).max(I::zero())
    }

    /// Check if the interval overlaps `start..end`.
    /// Touching endpoints do not count, and NaN coordinates never overlap.
    #[inline]
    pub fn overlap(&self, start: I, end: I) -> bool {
        self.start < end && self.end > start
    }

    /// Order by start then end. NaN sorts last.
    #[inline]
    pub fn cmp_position(&self, other: &Interval<I, T>) -> Ordering {
        match cmp_float(self.start, other.start) {
            Ordering::Equal => cmp_float(self.end, other.end),
            ordering => ordering,
        }
    }
}

#[inline]
fn cmp_float<I: Float>(a: I, b: I) -> Ordering {
    a.partial_cmp(&b)
        .unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

impl<I, T> PartialEq for Interval<I, T>
where
    I: Float + Send + Sync,
    T: Clone + Send + Sync,
{
    #[inline]
    fn eq(&self, other: &Interval<I, T>) -> bool {
        self.start == other.start && self.end == other.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn iv(start: f64, end: f64) -> Interval<f64, ()> {
        Interval { start, end, val: () }
    }

    #[rstest]
    #[case(50.0, 140.0, 0.0, 100.0, true)]
    #[case(100.0, 200.0, 0.0, 100.0, false)]
    #[case(0.0, 100.0, 100.0, 200.0, false)]
    #[case(10.0, 20.0, 0.0, 100.0, true)]
    #[case(f64::NAN, 20.0, 0.0, 100.0, false)]
    fn test_overlap(
        #[case] start: f64,
        #[case] end: f64,
        #[case] query_start: f64,
        #[case] query_end: f64,
        #[case] expected: bool,
    ) {
        assert_eq!(iv(start, end).overlap(query_start, query_end), expected);
    }

    #[rstest]
    fn test_intersect() {
        assert_eq!(iv(50.0, 140.0).intersect(100.0, 200.0), 40.0);
        assert_eq!(iv(50.0, 140.0).intersect(0.0, 100.0), 50.0);
        assert_eq!(iv(50.0, 140.0).intersect(200.0, 300.0), 0.0);
    }

    #[rstest]
    fn test_len() {
        assert_eq!(iv(140.0, 320.0).len(), 180.0);
        assert_eq!(iv(10.0, 5.0).len(), 0.0);
        assert!(iv(10.0, 10.0).is_empty());
    }

    #[rstest]
    fn test_cmp_position() {
        assert_eq!(iv(0.0, 5.0).cmp_position(&iv(0.0, 6.0)), Ordering::Less);
        assert_eq!(iv(1.0, 2.0).cmp_position(&iv(0.0, 6.0)), Ordering::Greater);
        assert_eq!(
            iv(f64::NAN, 2.0).cmp_position(&iv(0.0, 6.0)),
            Ordering::Greater
        );
    }
}
