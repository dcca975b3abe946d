use fxhash::FxHashSet as HashSet;
use log::{debug, trace};
use rayon::prelude::*;

use slkmerge_core::models::{ColumnData, DataType, RowLabel, Table, Value};

use crate::action::Action;
use crate::aggregation::Observation;
use crate::assembler::{OutputColumn, ResultAssembler};
use crate::config::MergeConfig;
use crate::errors::{AggregationError, MergeError, TableRole};
use crate::group_index::{GroupIndex, JoinKey, group_rows, interval_columns, key_columns};
use crate::overlap::{Selected, select_overlapping};

///
/// Merge `data` onto `target` using the default [MergeConfig]
/// (`slk_from`/`slk_to` interval columns, sequential processing).
///
/// See [on_slk_intervals].
pub fn merge<S: AsRef<str>>(
    target: &Table,
    data: &Table,
    join_columns: &[S],
    actions: &[Action],
) -> Result<Table, MergeError> {
    on_slk_intervals(target, data, join_columns, actions, &MergeConfig::default())
}

///
/// Merge `data` onto `target` along SLK intervals.
///
/// For every target row, the data rows with the same join key whose interval
/// strictly overlaps the target interval are aggregated into one value per
/// action. The result is the target table, with its rows and columns in their
/// original order, followed by one column per action.
///
/// All configuration is validated before any row is processed.
///
/// # Arguments:
/// - target: the segments to merge onto
/// - data: the measurements to aggregate
/// - join_columns: columns, present in both tables, that must match exactly
/// - actions: one per output column
/// - config: interval column names and parallelism
///
/// ```rust
/// use slkmerge_core::models::{Column, Table, Value};
/// use slkmerge_merge::{Action, Aggregation, merge};
///
/// let target = Table::new(vec![
///     Column::new("road", vec!["H1", "H1", "H1"]),
///     Column::new("slk_from", vec![0.0, 100.0, 200.0]),
///     Column::new("slk_to", vec![100.0, 200.0, 300.0]),
/// ]).unwrap();
///
/// let data = Table::new(vec![
///     Column::new("road", vec!["H1", "H1"]),
///     Column::new("slk_from", vec![50.0, 140.0]),
///     Column::new("slk_to", vec![140.0, 320.0]),
///     Column::new("val", vec![1.0, 8.0]),
/// ]).unwrap();
///
/// let result = merge(
///     &target,
///     &data,
///     &["road"],
///     &[Action::new("val", Aggregation::LengthWeightedAverage)],
/// ).unwrap();
///
/// assert_eq!(result.value(0, "val"), Some(Value::Float(1.0)));
/// assert_eq!(result.value(2, "val"), Some(Value::Float(8.0)));
/// ```
pub fn on_slk_intervals<S: AsRef<str>>(
    target: &Table,
    data: &Table,
    join_columns: &[S],
    actions: &[Action],
    config: &MergeConfig,
) -> Result<Table, MergeError> {
    let join_columns: Vec<String> = join_columns
        .iter()
        .map(|c| c.as_ref().to_string())
        .collect();
    let from_to = config.from_to();

    // validate everything up front
    let target_keys = key_columns(target, &join_columns, TableRole::Target)?;
    let data_keys = key_columns(data, &join_columns, TableRole::Data)?;
    check_key_types(&join_columns, &target_keys, &data_keys)?;

    let (target_from, target_to) = interval_columns(target, from_to, TableRole::Target)?;
    interval_columns(data, from_to, TableRole::Data)?;

    let (label_type, labels) = label_values(data.index());
    let outputs = output_columns(target, data, actions, label_type)?;

    let action_columns = actions
        .iter()
        .map(|action| {
            data.column(&action.column_name)
                .map(|c| &c.data)
                .ok_or_else(|| MergeError::ActionColumnNotFound(action.column_name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let index = GroupIndex::build(data, &join_columns, from_to)?;
    let target_groups = group_rows(&target_keys, target.n_rows());

    debug!(
        "merging {} target rows in {} groups with {} data groups (parallel: {})",
        target.n_rows(),
        target_groups.len(),
        index.len(),
        config.parallel
    );

    let context = MergeContext {
        index: &index,
        target_from,
        target_to,
        action_columns,
        actions,
        labels: &labels,
    };

    let merged: Vec<Vec<(usize, Vec<Value>)>> = if config.parallel {
        target_groups
            .par_iter()
            .map(|(key, rows)| context.merge_group(key, rows))
            .collect::<Result<_, _>>()?
    } else {
        target_groups
            .iter()
            .map(|(key, rows)| context.merge_group(key, rows))
            .collect::<Result<_, _>>()?
    };

    let mut assembler = ResultAssembler::new(outputs);
    for (row, values) in merged.into_iter().flatten() {
        assembler.push(row, values);
    }

    debug!(
        "aggregated data onto {} of {} target rows",
        assembler.len(),
        target.n_rows()
    );

    assembler.finish(target)
}

struct MergeContext<'a> {
    index: &'a GroupIndex,
    target_from: &'a ColumnData,
    target_to: &'a ColumnData,
    action_columns: Vec<&'a ColumnData>,
    actions: &'a [Action],
    labels: &'a [Value],
}

impl MergeContext<'_> {
    ///
    /// Aggregate every target row of one join key group. Rows without any
    /// overlapping data row are left out.
    ///
    fn merge_group(
        &self,
        key: &JoinKey,
        rows: &[usize],
    ) -> Result<Vec<(usize, Vec<Value>)>, MergeError> {
        let Some(group) = self.index.lookup(key) else {
            trace!("no data for {}, skipping {} target rows", key, rows.len());
            return Ok(Vec::new());
        };

        let mut merged = Vec::with_capacity(rows.len());
        for &row in rows {
            let (Some(from), Some(to)) = (self.target_from.get_f64(row), self.target_to.get_f64(row))
            else {
                trace!("target row {} has a missing interval", row);
                continue;
            };

            let selected = select_overlapping(group, from, to);
            if selected.is_empty() {
                continue;
            }

            let values = self
                .actions
                .iter()
                .zip(&self.action_columns)
                .map(|(action, column)| self.aggregate(action, column, &selected))
                .collect::<Result<Vec<_>, _>>()?;

            merged.push((row, values));
        }

        Ok(merged)
    }

    ///
    /// Apply one action to the selected rows. Only rows with a value in the
    /// action's own column and a positive overlap take part; if none do the
    /// result is missing.
    ///
    fn aggregate(
        &self,
        action: &Action,
        column: &ColumnData,
        selected: &[Selected],
    ) -> Result<Value, AggregationError> {
        let observations: Vec<Observation> = selected
            .iter()
            .filter(|s| s.overlap_len > 0.0)
            .filter_map(|s| {
                let value = column.get(s.row);
                if value.is_missing() {
                    return None;
                }
                Some(Observation {
                    value,
                    overlap_len: s.overlap_len,
                    row_len: s.row_len,
                    label: self.labels[s.row].clone(),
                })
            })
            .collect();

        if observations.is_empty() {
            return Ok(Value::Null);
        }

        action.aggregation.apply(&observations)
    }
}

///
/// Join columns must have the same type in both tables; keys are never coerced.
///
fn check_key_types(
    join_columns: &[String],
    target_keys: &[&ColumnData],
    data_keys: &[&ColumnData],
) -> Result<(), MergeError> {
    for ((name, target), data) in join_columns.iter().zip(target_keys).zip(data_keys) {
        if target.data_type() != data.data_type() {
            let key = (0..target.len())
                .map(|row| target.get(row))
                .find(|value| !value.is_missing())
                .unwrap_or(Value::Null);
            return Err(MergeError::JoinKeyTypeMismatch {
                column: name.clone(),
                target_type: target.data_type(),
                data_type: data.data_type(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

///
/// Data row labels as cell values: integers when every label is an integer,
/// strings otherwise.
///
fn label_values(index: &[RowLabel]) -> (DataType, Vec<Value>) {
    if index.iter().all(|label| matches!(label, RowLabel::Int(_))) {
        (
            DataType::Int,
            index.iter().cloned().map(Value::from).collect(),
        )
    } else {
        (
            DataType::Str,
            index
                .iter()
                .map(|label| Value::Str(label.to_string()))
                .collect(),
        )
    }
}

///
/// Validate the actions against both tables and derive the output schema.
///
fn output_columns(
    target: &Table,
    data: &Table,
    actions: &[Action],
    label_type: DataType,
) -> Result<Vec<OutputColumn>, MergeError> {
    let mut names: HashSet<&str> = HashSet::default();
    for action in actions {
        let name = action.output_name();
        if !names.insert(name) {
            return Err(MergeError::DuplicateOutputColumn(name.to_string()));
        }
        if target.has_column(name) {
            return Err(MergeError::OutputColumnConflict(name.to_string()));
        }
    }

    actions
        .iter()
        .map(|action| {
            let column = data
                .column(&action.column_name)
                .ok_or_else(|| MergeError::ActionColumnNotFound(action.column_name.clone()))?;

            if action.aggregation.requires_numeric() && !column.data_type().is_numeric() {
                return Err(MergeError::ActionColumnNotNumeric {
                    column: action.column_name.clone(),
                    aggregation: action.aggregation.to_string(),
                    found: column.data_type(),
                });
            }

            let data_type = action
                .aggregation
                .output_type(column.data_type(), label_type);
            let infill = action.infill.as_value();
            if !infill.fits(data_type) {
                return Err(MergeError::InfillTypeMismatch {
                    column: action.output_name().to_string(),
                    expected: data_type,
                    value: infill.to_string(),
                });
            }

            Ok(OutputColumn {
                name: action.output_name().to_string(),
                data_type,
                infill,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Infill;
    use crate::aggregation::Aggregation;
    use slkmerge_core::models::Column;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn target() -> Table {
        Table::new(vec![
            Column::new("road", vec!["H1", "H1", "H1"]),
            Column::new("slk_from", vec![0.0, 100.0, 200.0]),
            Column::new("slk_to", vec![100.0, 200.0, 300.0]),
        ])
        .unwrap()
    }

    #[fixture]
    fn data() -> Table {
        Table::new(vec![
            Column::new("road", vec!["H1", "H1"]),
            Column::new("slk_from", vec![50.0, 140.0]),
            Column::new("slk_to", vec![140.0, 320.0]),
            Column::new("val", vec![1.0, 8.0]),
            Column::new("surface", vec!["chip", "asphalt"]),
        ])
        .unwrap()
    }

    #[rstest]
    fn test_duplicate_output_column(target: Table, data: Table) {
        let actions = vec![
            Action::new("val", Aggregation::Average),
            Action::new("surface", Aggregation::First).with_rename("val"),
        ];
        let result = merge(&target, &data, &["road"], &actions);
        assert!(matches!(result, Err(MergeError::DuplicateOutputColumn(name)) if name == "val"));
    }

    #[rstest]
    fn test_output_column_conflict(target: Table, data: Table) {
        let actions = vec![Action::new("val", Aggregation::Average).with_rename("slk_from")];
        let result = merge(&target, &data, &["road"], &actions);
        assert!(matches!(result, Err(MergeError::OutputColumnConflict(_))));
    }

    #[rstest]
    fn test_action_column_not_found(target: Table, data: Table) {
        let actions = vec![Action::new("roughness", Aggregation::Average)];
        let result = merge(&target, &data, &["road"], &actions);
        assert!(matches!(result, Err(MergeError::ActionColumnNotFound(name)) if name == "roughness"));
    }

    #[rstest]
    #[case(Aggregation::Average)]
    #[case(Aggregation::LengthWeightedAverage)]
    #[case(Aggregation::Sum)]
    #[case(Aggregation::ProportionalSum)]
    #[case(Aggregation::IndexOfMax)]
    fn test_numeric_aggregation_on_text_column(
        target: Table,
        data: Table,
        #[case] aggregation: Aggregation,
    ) {
        let actions = vec![Action::new("surface", aggregation)];
        let result = merge(&target, &data, &["road"], &actions);
        assert!(matches!(result, Err(MergeError::ActionColumnNotNumeric { .. })));
    }

    #[rstest]
    fn test_infill_type_mismatch(target: Table, data: Table) {
        let actions =
            vec![Action::new("val", Aggregation::Average).with_infill(Infill::value("none"))];
        let result = merge(&target, &data, &["road"], &actions);
        assert!(matches!(result, Err(MergeError::InfillTypeMismatch { .. })));
    }

    #[rstest]
    fn test_join_columns_missing_from_target(target: Table, data: Table) {
        let actions = vec![Action::new("val", Aggregation::Average)];
        let result = merge(&target, &data, &["road", "cwy"], &actions);
        match result {
            Err(MergeError::JoinColumnsNotFound { table, matched, .. }) => {
                assert_eq!(table, TableRole::Target);
                assert_eq!(matched, vec!["road".to_string()]);
            }
            other => panic!("expected JoinColumnsNotFound, got {:?}", other),
        }
    }

    #[rstest]
    fn test_join_key_type_mismatch(target: Table) {
        let data = Table::new(vec![
            Column::new("road", vec![1i64]),
            Column::new("slk_from", vec![0.0]),
            Column::new("slk_to", vec![10.0]),
            Column::new("val", vec![1.0]),
        ])
        .unwrap();

        let actions = vec![Action::new("val", Aggregation::Average)];
        let result = merge(&target, &data, &["road"], &actions);
        match result {
            Err(MergeError::JoinKeyTypeMismatch {
                column,
                target_type,
                data_type,
                key,
            }) => {
                assert_eq!(column, "road");
                assert_eq!(target_type, DataType::Str);
                assert_eq!(data_type, DataType::Int);
                assert_eq!(key, "H1");
            }
            other => panic!("expected JoinKeyTypeMismatch, got {:?}", other),
        }
    }

    #[rstest]
    fn test_missing_values_are_filtered_per_action(target: Table) {
        let data = Table::new(vec![
            Column::new("road", vec!["H1", "H1"]),
            Column::new("slk_from", vec![0.0, 50.0]),
            Column::new("slk_to", vec![50.0, 100.0]),
            Column::new("a", vec![Some(1.0), None]),
            Column::new("b", vec![None, Some(f64::NAN)]),
            Column::new("c", vec![None, Some(4.0)]),
        ])
        .unwrap();

        let actions = vec![
            Action::new("a", Aggregation::LengthWeightedAverage),
            Action::new("b", Aggregation::LengthWeightedAverage),
            Action::new("c", Aggregation::First),
        ];
        let result = merge(&target, &data, &["road"], &actions).unwrap();

        assert_eq!(result.value(0, "a"), Some(Value::Float(1.0)));
        assert_eq!(result.value(0, "b"), Some(Value::Null));
        assert_eq!(result.value(0, "c"), Some(Value::Float(4.0)));
    }

    #[rstest]
    fn test_missing_target_interval(data: Table) {
        let target = Table::new(vec![
            Column::new("road", vec!["H1", "H1"]),
            Column::new("slk_from", vec![None, Some(0.0)]),
            Column::new("slk_to", vec![100.0, 100.0]),
        ])
        .unwrap();

        let actions = vec![Action::new("val", Aggregation::Sum)];
        let result = merge(&target, &data, &["road"], &actions).unwrap();
        assert_eq!(result.value(0, "val"), Some(Value::Null));
        assert_eq!(result.value(1, "val"), Some(Value::Float(1.0)));
    }

    #[rstest]
    fn test_label_values() {
        let (data_type, values) = label_values(&[RowLabel::Int(3), RowLabel::Int(1)]);
        assert_eq!(data_type, DataType::Int);
        assert_eq!(values, vec![Value::Int(3), Value::Int(1)]);

        let (data_type, values) = label_values(&[RowLabel::Int(3), RowLabel::from("A")]);
        assert_eq!(data_type, DataType::Str);
        assert_eq!(values, vec![Value::from("3"), Value::from("A")]);
    }
}
