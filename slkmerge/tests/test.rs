use rstest::*;

use slkmerge::core::lookups::CN;
use slkmerge::core::models::{Column, ColumnData, Table, Value};
use slkmerge::core::utils::km_to_metres;
use slkmerge::merge::{Action, Aggregation, merge};

#[fixture]
fn segments() -> Table {
    Table::new(vec![
        Column::new(CN.road_number, vec!["H001", "H001"]),
        Column::new(CN.slk_from, vec![0.0, 0.1]),
        Column::new(CN.slk_to, vec![0.1, 0.2]),
    ])
    .unwrap()
}

#[rstest]
fn test_merge_through_umbrella(segments: Table) {
    let data = Table::new(vec![
        Column::new(CN.road_number, vec!["H001"]),
        Column::new(CN.slk_from, vec![0.05]),
        Column::new(CN.slk_to, vec![0.3]),
        Column::new(CN.deflection, vec![0.42]),
    ])
    .unwrap();

    let result = merge(
        &segments,
        &data,
        &[CN.road_number],
        &[Action::new(CN.deflection, Aggregation::KeepLongestSegment)],
    )
    .unwrap();

    assert_eq!(result.value(0, CN.deflection), Some(Value::Float(0.42)));
    assert_eq!(result.value(1, CN.deflection), Some(Value::Float(0.42)));
}

#[rstest]
fn test_segment_lengths_in_metres(segments: Table) {
    let from = km_to_metres(&segments.column(CN.slk_from).unwrap().data).unwrap();
    let to = km_to_metres(&segments.column(CN.slk_to).unwrap().data).unwrap();

    assert_eq!(from, ColumnData::Int(vec![Some(0), Some(100)]));
    assert_eq!(to, ColumnData::Int(vec![Some(100), Some(200)]));
}
