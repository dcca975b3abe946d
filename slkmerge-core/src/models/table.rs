use std::collections::HashSet;
use std::fmt::{self, Display};

#[cfg(feature = "dataframe")]
use polars::prelude as pl;
#[cfg(feature = "dataframe")]
use polars::prelude::{NamedFrom, PolarsResult};

use crate::errors::TableError;
use crate::models::{DataType, RowLabel, Value};

///
/// Typed, nullable storage for one column of a [Table].
///
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Str(Vec<Option<String>>),
    Bool(Vec<Option<bool>>),
}

impl ColumnData {
    pub fn data_type(&self) -> DataType {
        match self {
            ColumnData::Int(_) => DataType::Int,
            ColumnData::Float(_) => DataType::Float,
            ColumnData::Str(_) => DataType::Str,
            ColumnData::Bool(_) => DataType::Bool,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Str(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    ///
    /// Get the cell at `row` as a [Value]. Out of range rows read as `Null`.
    ///
    pub fn get(&self, row: usize) -> Value {
        match self {
            ColumnData::Int(v) => v.get(row).copied().flatten().into(),
            ColumnData::Float(v) => v.get(row).copied().flatten().into(),
            ColumnData::Str(v) => v.get(row).cloned().flatten().into(),
            ColumnData::Bool(v) => v.get(row).copied().flatten().into(),
        }
    }

    ///
    /// Numeric view of the cell at `row`; `None` when the cell is missing
    /// (null or NaN) or the column is not numeric.
    ///
    pub fn get_f64(&self, row: usize) -> Option<f64> {
        match self {
            ColumnData::Int(v) => v.get(row).copied().flatten().map(|x| x as f64),
            ColumnData::Float(v) => v.get(row).copied().flatten().filter(|x| !x.is_nan()),
            _ => None,
        }
    }

    pub fn is_missing(&self, row: usize) -> bool {
        self.get(row).is_missing()
    }

    ///
    /// Build a column of type `data_type` from values. `Null` becomes a
    /// missing cell; integers are widened when stored in a float column.
    ///
    pub fn from_values(data_type: DataType, values: Vec<Value>) -> Result<Self, TableError> {
        let mismatch = |row: usize, value: &Value| TableError::TypeMismatch {
            row,
            expected: data_type,
            value: value.to_string(),
        };

        let data = match data_type {
            DataType::Int => ColumnData::Int(
                values
                    .iter()
                    .enumerate()
                    .map(|(row, value)| match value {
                        Value::Null => Ok(None),
                        Value::Int(v) => Ok(Some(*v)),
                        other => Err(mismatch(row, other)),
                    })
                    .collect::<Result<_, _>>()?,
            ),
            DataType::Float => ColumnData::Float(
                values
                    .iter()
                    .enumerate()
                    .map(|(row, value)| match value {
                        Value::Null => Ok(None),
                        Value::Int(v) => Ok(Some(*v as f64)),
                        Value::Float(v) => Ok(Some(*v)),
                        other => Err(mismatch(row, other)),
                    })
                    .collect::<Result<_, _>>()?,
            ),
            DataType::Bool => ColumnData::Bool(
                values
                    .iter()
                    .enumerate()
                    .map(|(row, value)| match value {
                        Value::Null => Ok(None),
                        Value::Bool(v) => Ok(Some(*v)),
                        other => Err(mismatch(row, other)),
                    })
                    .collect::<Result<_, _>>()?,
            ),
            DataType::Str => ColumnData::Str(
                values
                    .into_iter()
                    .enumerate()
                    .map(|(row, value)| match value {
                        Value::Null => Ok(None),
                        Value::Str(v) => Ok(Some(v)),
                        other => Err(mismatch(row, &other)),
                    })
                    .collect::<Result<_, _>>()?,
            ),
        };

        Ok(data)
    }
}

macro_rules! impl_column_data_from {
    ($variant:ident, $ty:ty) => {
        impl From<Vec<$ty>> for ColumnData {
            fn from(values: Vec<$ty>) -> Self {
                ColumnData::$variant(values.into_iter().map(Some).collect())
            }
        }

        impl From<Vec<Option<$ty>>> for ColumnData {
            fn from(values: Vec<Option<$ty>>) -> Self {
                ColumnData::$variant(values)
            }
        }
    };
}

impl_column_data_from!(Int, i64);
impl_column_data_from!(Float, f64);
impl_column_data_from!(Str, String);
impl_column_data_from!(Bool, bool);

impl From<Vec<&str>> for ColumnData {
    fn from(values: Vec<&str>) -> Self {
        ColumnData::Str(values.into_iter().map(|v| Some(v.to_string())).collect())
    }
}

impl From<Vec<Option<&str>>> for ColumnData {
    fn from(values: Vec<Option<&str>>) -> Self {
        ColumnData::Str(
            values
                .into_iter()
                .map(|v| v.map(str::to_string))
                .collect(),
        )
    }
}

///
/// A named column of a [Table].
///
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: impl Into<ColumnData>) -> Self {
        Column {
            name: name.into(),
            data: data.into(),
        }
    }

    pub fn data_type(&self) -> DataType {
        self.data.data_type()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

///
/// In-memory table: an ordered list of equal-length named columns and a
/// row index of stable [RowLabel]s.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index: Vec<RowLabel>,
    columns: Vec<Column>,
}

impl Table {
    ///
    /// Create a new [Table] with the default range index `0..n`.
    ///
    /// # Arguments:
    /// - columns: the columns, all of the same length with unique names.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let n_rows = columns.first().map_or(0, Column::len);

        let mut seen: HashSet<&str> = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn(column.name.clone()));
            }
            if column.len() != n_rows {
                return Err(TableError::LengthMismatch {
                    column: column.name.clone(),
                    expected: n_rows,
                    found: column.len(),
                });
            }
        }

        let index = (0..n_rows as i64).map(RowLabel::Int).collect();

        Ok(Table { index, columns })
    }

    ///
    /// Replace the row index.
    ///
    pub fn with_index(mut self, index: Vec<RowLabel>) -> Result<Self, TableError> {
        if index.len() != self.n_rows() {
            return Err(TableError::IndexLengthMismatch {
                expected: self.n_rows(),
                found: index.len(),
            });
        }
        self.index = index;
        Ok(self)
    }

    ///
    /// Use an existing column as the row index, removing it from the columns.
    /// Missing cells are not allowed in an index.
    ///
    pub fn set_index(mut self, name: &str) -> Result<Self, TableError> {
        let position = self
            .columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))?;

        let column = self.columns.remove(position);
        let index = (0..column.len())
            .map(|row| match column.data.get(row) {
                Value::Int(v) => Ok(RowLabel::Int(v)),
                Value::Str(v) => Ok(RowLabel::Str(v)),
                other => Err(TableError::TypeMismatch {
                    row,
                    expected: column.data_type(),
                    value: other.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.index = index;
        Ok(self)
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[RowLabel] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    ///
    /// Get a single cell, `None` if the column does not exist.
    ///
    pub fn value(&self, row: usize, column: &str) -> Option<Value> {
        self.column(column).map(|c| c.data.get(row))
    }

    ///
    /// Append a column to the right of the table.
    ///
    pub fn push_column(&mut self, column: Column) -> Result<(), TableError> {
        if self.has_column(&column.name) {
            return Err(TableError::DuplicateColumn(column.name));
        }
        let found = column.len();
        if found != self.n_rows() {
            return Err(TableError::LengthMismatch {
                column: column.name,
                expected: self.n_rows(),
                found,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    ///
    /// Create a polars DataFrame from the columns. The row index is not
    /// carried over.
    ///
    #[cfg(feature = "dataframe")]
    pub fn to_polars(&self) -> PolarsResult<pl::DataFrame> {
        let columns = self
            .columns
            .iter()
            .map(|column| {
                let name = column.name.as_str().into();
                let series = match &column.data {
                    ColumnData::Int(v) => pl::Series::new(name, v.as_slice()),
                    ColumnData::Float(v) => pl::Series::new(name, v.as_slice()),
                    ColumnData::Str(v) => pl::Series::new(name, v.as_slice()),
                    ColumnData::Bool(v) => pl::Series::new(name, v.as_slice()),
                };
                pl::Column::from(series)
            })
            .collect::<Vec<_>>();

        pl::DataFrame::new(columns)
    }
}

#[cfg(feature = "dataframe")]
impl TryFrom<&pl::DataFrame> for Table {
    type Error = TableError;

    ///
    /// Create a new [Table] from a polars DataFrame. Integer columns are
    /// widened to `i64`, float columns to `f64`, everything else that is not
    /// boolean is cast to strings.
    fn try_from(df: &pl::DataFrame) -> Result<Self, TableError> {
        let mut columns = Vec::with_capacity(df.width());

        for column in df.get_columns() {
            let series = column.as_materialized_series();
            let name = series.name().to_string();
            let dtype = series.dtype();

            let data = if dtype == &pl::DataType::Boolean {
                ColumnData::Bool(series.bool()?.into_iter().collect())
            } else if dtype.is_float() {
                let cast = series.cast(&pl::DataType::Float64)?;
                ColumnData::Float(cast.f64()?.into_iter().collect())
            } else if dtype.is_integer() {
                let cast = series.cast(&pl::DataType::Int64)?;
                ColumnData::Int(cast.i64()?.into_iter().collect())
            } else {
                let cast = series.cast(&pl::DataType::String)?;
                ColumnData::Str(
                    cast.str()?
                        .into_iter()
                        .map(|v| v.map(str::to_string))
                        .collect(),
                )
            };

            columns.push(Column { name, data });
        }

        Table::new(columns)
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Table with {} rows and {} columns: [{}]",
            self.n_rows(),
            self.n_columns(),
            self.column_names().join(", ")
        )
    }
}
