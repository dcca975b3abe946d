use slkmerge_overlaprs::{Bits, Overlapper};

///
/// A data row overlapping a target segment.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selected {
    /// Position of the row in the data table
    pub row: usize,
    /// `min(data_to, target_to) - max(data_from, target_from)`
    pub overlap_len: f64,
    /// `data_to - data_from`
    pub row_len: f64,
}

///
/// Select every row of `group` whose interval strictly overlaps
/// `[from, to)`, with its overlap length, in data table row order.
///
/// Touching endpoints are not an overlap, so every selected row has a
/// positive overlap length.
pub fn select_overlapping(group: &Bits<f64, usize>, from: f64, to: f64) -> Vec<Selected> {
    let mut selected: Vec<Selected> = group
        .find_iter(from, to)
        .map(|interval| Selected {
            row: interval.val,
            overlap_len: interval.intersect(from, to),
            row_len: interval.end - interval.start,
        })
        .collect();

    selected.sort_by_key(|s| s.row);
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use slkmerge_overlaprs::Interval;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn group() -> Bits<f64, usize> {
        // rows given out of start order
        Bits::build(vec![
            Interval {
                start: 140.0,
                end: 320.0,
                val: 0,
            },
            Interval {
                start: 50.0,
                end: 140.0,
                val: 1,
            },
        ])
    }

    #[rstest]
    #[case(0.0, 100.0, vec![(1, 50.0)])]
    #[case(100.0, 200.0, vec![(0, 60.0), (1, 40.0)])]
    #[case(200.0, 300.0, vec![(0, 100.0)])]
    #[case(320.0, 400.0, vec![])]
    #[case(0.0, 50.0, vec![])]
    fn test_select_overlapping(
        group: Bits<f64, usize>,
        #[case] from: f64,
        #[case] to: f64,
        #[case] expected: Vec<(usize, f64)>,
    ) {
        let selected: Vec<(usize, f64)> = select_overlapping(&group, from, to)
            .into_iter()
            .map(|s| (s.row, s.overlap_len))
            .collect();
        assert_eq!(selected, expected);
    }

    #[rstest]
    fn test_row_len(group: Bits<f64, usize>) {
        let selected = select_overlapping(&group, 100.0, 200.0);
        assert_eq!(selected[0].row_len, 180.0);
        assert_eq!(selected[1].row_len, 90.0);
    }

    #[rstest]
    fn test_overlap_is_positive(group: Bits<f64, usize>) {
        for from in (0..400).step_by(7) {
            let from = from as f64;
            for s in select_overlapping(&group, from, from + 13.0) {
                assert!(s.overlap_len > 0.0);
            }
        }
    }
}
