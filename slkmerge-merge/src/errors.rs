use std::fmt::{self, Display};

use slkmerge_core::errors::TableError;
use slkmerge_core::models::DataType;
use thiserror::Error;

/// Which side of the merge a table is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    Target,
    Data,
}

impl Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableRole::Target => write!(f, "target"),
            TableRole::Data => write!(f, "data"),
        }
    }
}

fn percent_hint(percentile: &f64) -> &'static str {
    if *percentile > 1.0 {
        " Did you need to divide by 100?"
    } else {
        ""
    }
}

fn match_summary(table: &TableRole, matched: &[String]) -> String {
    if matched.is_empty() {
        format!("any columns in the {} table", table)
    } else {
        format!(
            "all columns in the {} table. Only matched columns {:?}",
            table, matched
        )
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum AggregationError {
    #[error(
        "Percentile out of range. Must be between 0.0 and 1.0 inclusive. Got {0}.{hint}",
        hint = percent_hint(.0)
    )]
    PercentileOutOfRange(f64),

    #[error("{aggregation} has no rows to aggregate")]
    EmptySelection { aggregation: String },

    #[error("{aggregation} can't aggregate non-numeric value {value}")]
    NonNumericValue { aggregation: String, value: String },
}

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("At least one join column is required")]
    NoJoinColumns,

    #[error(
        "Parameter join_columns={requested:?} did not match {summary}",
        summary = match_summary(.table, .matched)
    )]
    JoinColumnsNotFound {
        table: TableRole,
        requested: Vec<String>,
        matched: Vec<String>,
    },

    #[error("Interval column '{column}' not found in the {table} table")]
    IntervalColumnNotFound { table: TableRole, column: String },

    #[error("Interval column '{column}' in the {table} table must be numeric, found {found}")]
    IntervalColumnNotNumeric {
        table: TableRole,
        column: String,
        found: DataType,
    },

    #[error("Column '{0}' referenced by an action not found in the data table")]
    ActionColumnNotFound(String),

    #[error("{aggregation} needs a numeric column but '{column}' is {found}")]
    ActionColumnNotNumeric {
        column: String,
        aggregation: String,
        found: DataType,
    },

    #[error("More than one action produces the output column '{0}'")]
    DuplicateOutputColumn(String),

    #[error("Output column '{0}' already exists in the target table")]
    OutputColumnConflict(String),

    #[error("Infill {value} does not fit output column '{column}' of type {expected}")]
    InfillTypeMismatch {
        column: String,
        expected: DataType,
        value: String,
    },

    #[error(
        "Could not group by join column '{column}': the target has type {target_type} but the data has type {data_type} (offending key: {key})"
    )]
    JoinKeyTypeMismatch {
        column: String,
        target_type: DataType,
        data_type: DataType,
        key: String,
    },

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error(transparent)]
    Table(#[from] TableError),
}
