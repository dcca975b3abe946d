use slkmerge_core::models::{Column, ColumnData, DataType, Table, Value};

use crate::errors::MergeError;

///
/// Schema of one appended output column.
///
#[derive(Debug, Clone, PartialEq)]
pub struct OutputColumn {
    pub name: String,
    pub data_type: DataType,
    /// Written for every target row without an aggregated value
    pub infill: Value,
}

///
/// Collects aggregated rows keyed by target row position and left joins them
/// onto the target table.
///
#[derive(Debug)]
pub struct ResultAssembler {
    outputs: Vec<OutputColumn>,
    rows: Vec<(usize, Vec<Value>)>,
}

impl ResultAssembler {
    pub fn new(outputs: Vec<OutputColumn>) -> Self {
        ResultAssembler {
            outputs,
            rows: Vec::new(),
        }
    }

    /// Record the aggregated values of one target row, one per output column.
    pub fn push(&mut self, target_row: usize, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.outputs.len());
        self.rows.push((target_row, values));
    }

    /// Number of target rows that received values
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    ///
    /// Join the collected rows onto `target`.
    ///
    /// The result has the target's index, columns and row order followed by
    /// one column per output. Rows that were never pushed, and missing
    /// values, receive the output's infill.
    pub fn finish(self, target: &Table) -> Result<Table, MergeError> {
        let n_rows = target.n_rows();

        let mut columns: Vec<Vec<Value>> = self
            .outputs
            .iter()
            .map(|output| vec![output.infill.clone(); n_rows])
            .collect();

        for (row, values) in self.rows {
            for (column, value) in columns.iter_mut().zip(values) {
                if !value.is_missing() {
                    column[row] = value;
                }
            }
        }

        let mut result = target.clone();
        for (output, values) in self.outputs.into_iter().zip(columns) {
            let data = ColumnData::from_values(output.data_type, values)?;
            result.push_column(Column {
                name: output.name,
                data,
            })?;
        }

        Ok(result)
    }
}
