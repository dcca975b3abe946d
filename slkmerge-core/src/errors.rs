use thiserror::Error;

use crate::models::DataType;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Index has {found} labels but the table has {expected} rows")]
    IndexLengthMismatch { expected: usize, found: usize },

    #[error("Value {value} (row {row}) does not fit a column of type {expected}")]
    TypeMismatch {
        row: usize,
        expected: DataType,
        value: String,
    },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[cfg(feature = "dataframe")]
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}

#[derive(Error, Debug, PartialEq)]
pub enum UnitConversionError {
    #[error("Can't convert a column of type {0} to metres")]
    NotNumeric(DataType),

    #[error("Missing value at row {0}")]
    MissingValue(usize),

    #[error("Non-finite value {value} at row {row}")]
    NonFinite { row: usize, value: f64 },

    #[error("Value {value} km at row {row} does not fit in integer metres")]
    OutOfRange { row: usize, value: f64 },
}
