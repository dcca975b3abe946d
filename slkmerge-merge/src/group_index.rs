//! Partitioning of tables by their join columns.
//!
//! Both tables of a merge are split by the tuple of values in the join columns
//! (road number, carriageway, ...). The data table is indexed once into a
//! [`GroupIndex`]; target rows are grouped with [`group_rows`] and each group
//! looks up its data with [`GroupIndex::lookup`].
use std::fmt::{self, Display};

use fxhash::FxHashMap as HashMap;
use log::{debug, trace};

use slkmerge_core::models::{ColumnData, Table, Value};
use slkmerge_overlaprs::{Bits, Interval, Overlapper};

use crate::errors::{MergeError, TableRole};

///
/// One hashable component of a [JoinKey].
///
/// Floats are keyed by bit pattern with `-0.0` folded into `0.0`.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Int(i64),
    Float(u64),
    Str(String),
    Bool(bool),
}

impl KeyPart {
    ///
    /// Key component for a cell; `None` when the cell is missing.
    ///
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Float(v) if v.is_nan() => None,
            Value::Float(v) => Some(KeyPart::Float((v + 0.0).to_bits())),
            Value::Int(v) => Some(KeyPart::Int(v)),
            Value::Str(v) => Some(KeyPart::Str(v)),
            Value::Bool(v) => Some(KeyPart::Bool(v)),
        }
    }
}

impl Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Int(v) => write!(f, "{}", v),
            KeyPart::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            KeyPart::Str(v) => write!(f, "{:?}", v),
            KeyPart::Bool(v) => write!(f, "{}", v),
        }
    }
}

///
/// Owned tuple of join column values, in join column order.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinKey(pub Vec<KeyPart>);

impl JoinKey {
    ///
    /// Build the key of `row` from the join columns. `None` if any component
    /// is missing; such rows never join.
    ///
    pub fn from_row(columns: &[&ColumnData], row: usize) -> Option<Self> {
        columns
            .iter()
            .map(|column| KeyPart::from_value(column.get(row)))
            .collect::<Option<Vec<_>>>()
            .map(JoinKey)
    }
}

impl Display for JoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|p| p.to_string()).collect();
        write!(f, "({})", parts.join(", "))
    }
}

///
/// Resolve the join columns of a table, failing with the list of columns that
/// did match when any is absent.
///
pub fn key_columns<'a>(
    table: &'a Table,
    join_columns: &[String],
    role: TableRole,
) -> Result<Vec<&'a ColumnData>, MergeError> {
    if join_columns.is_empty() {
        return Err(MergeError::NoJoinColumns);
    }

    let found: Vec<Option<&ColumnData>> = join_columns
        .iter()
        .map(|name| table.column(name).map(|c| &c.data))
        .collect();

    if found.iter().any(Option::is_none) {
        let matched = join_columns
            .iter()
            .zip(&found)
            .filter(|(_, column)| column.is_some())
            .map(|(name, _)| name.clone())
            .collect();
        return Err(MergeError::JoinColumnsNotFound {
            table: role,
            requested: join_columns.to_vec(),
            matched,
        });
    }

    Ok(found.into_iter().flatten().collect())
}

///
/// Resolve the `(from, to)` interval columns of a table. Both must be numeric.
///
pub fn interval_columns<'a>(
    table: &'a Table,
    from_to: (&str, &str),
    role: TableRole,
) -> Result<(&'a ColumnData, &'a ColumnData), MergeError> {
    let resolve = |name: &str| -> Result<&'a ColumnData, MergeError> {
        let column = table
            .column(name)
            .ok_or_else(|| MergeError::IntervalColumnNotFound {
                table: role,
                column: name.to_string(),
            })?;
        if !column.data_type().is_numeric() {
            return Err(MergeError::IntervalColumnNotNumeric {
                table: role,
                column: name.to_string(),
                found: column.data_type(),
            });
        }
        Ok(&column.data)
    };

    Ok((resolve(from_to.0)?, resolve(from_to.1)?))
}

///
/// Group row positions by join key, in order of first appearance. Rows with a
/// missing key component are left out.
///
pub fn group_rows(columns: &[&ColumnData], n_rows: usize) -> Vec<(JoinKey, Vec<usize>)> {
    let mut positions: HashMap<JoinKey, usize> = HashMap::default();
    let mut groups: Vec<(JoinKey, Vec<usize>)> = Vec::new();

    for row in 0..n_rows {
        let Some(key) = JoinKey::from_row(columns, row) else {
            trace!("row {} has a missing join key and is not grouped", row);
            continue;
        };

        match positions.get(&key) {
            Some(&group) => groups[group].1.push(row),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push((key, vec![row]));
            }
        }
    }

    groups
}

///
/// The data table partitioned by join key. Each group holds the positions of
/// its rows in an interval index sorted by SLK start.
///
pub struct GroupIndex {
    groups: HashMap<JoinKey, Bits<f64, usize>>,
}

impl GroupIndex {
    ///
    /// Build the index over the rows of `data`.
    ///
    /// # Arguments:
    /// - data: the table to index
    /// - join_columns: names of the columns forming the key
    /// - from_to: names of the interval start and end columns
    pub fn build(
        data: &Table,
        join_columns: &[String],
        from_to: (&str, &str),
    ) -> Result<Self, MergeError> {
        let keys = key_columns(data, join_columns, TableRole::Data)?;
        let (from, to) = interval_columns(data, from_to, TableRole::Data)?;

        let mut intervals: HashMap<JoinKey, Vec<Interval<f64, usize>>> = HashMap::default();
        for (key, rows) in group_rows(&keys, data.n_rows()) {
            let group = rows
                .into_iter()
                .filter_map(|row| match (from.get_f64(row), to.get_f64(row)) {
                    (Some(start), Some(end)) => Some(Interval {
                        start,
                        end,
                        val: row,
                    }),
                    _ => {
                        trace!("data row {} has a missing interval and is not indexed", row);
                        None
                    }
                })
                .collect();
            intervals.insert(key, group);
        }

        let groups: HashMap<JoinKey, Bits<f64, usize>> = intervals
            .into_iter()
            .map(|(key, group)| (key, Bits::build(group)))
            .collect();

        debug!(
            "indexed {} data rows into {} groups by {:?}",
            data.n_rows(),
            groups.len(),
            join_columns
        );

        Ok(GroupIndex { groups })
    }

    ///
    /// The rows sharing `key`. `None` means no data row has this key, which
    /// callers treat as an empty group.
    ///
    pub fn lookup(&self, key: &JoinKey) -> Option<&Bits<f64, usize>> {
        self.groups.get(key)
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
