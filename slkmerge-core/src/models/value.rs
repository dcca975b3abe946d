use std::cmp::Ordering;
use std::fmt::{self, Display};

///
/// The kind of data stored in a [crate::models::Column].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    Int,
    Float,
    Str,
    Bool,
}

impl DataType {
    /// `Int` and `Float` columns can be fed to arithmetic aggregations.
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int | DataType::Float)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Str => "str",
            DataType::Bool => "bool",
        };
        write!(f, "{}", name)
    }
}

///
/// A single cell of a [crate::models::Table].
///
/// `Null` and NaN floats are both treated as missing.
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// The runtime type of the value, `None` for `Null`.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Int(_) => Some(DataType::Int),
            Value::Float(_) => Some(DataType::Float),
            Value::Str(_) => Some(DataType::Str),
            Value::Bool(_) => Some(DataType::Bool),
        }
    }

    /// Numeric view of the value. Non-numeric and `Null` values give `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    ///
    /// Total order between two values of the same kind, used to sort
    /// categorical and numeric values alike. Values of different kinds
    /// are ordered by kind so the result is always deterministic.
    ///
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Str(_) => 3,
        }
    }

    /// Whether this value can be stored in a column of type `data_type`.
    pub fn fits(&self, data_type: DataType) -> bool {
        match (self, data_type) {
            (Value::Null, _) => true,
            (Value::Int(_), DataType::Int | DataType::Float) => true,
            (Value::Float(_), DataType::Float) => true,
            (Value::Str(_), DataType::Str) => true,
            (Value::Bool(_), DataType::Bool) => true,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

///
/// Stable row identifier of a [crate::models::Table].
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowLabel {
    Int(i64),
    Str(String),
}

impl Display for RowLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowLabel::Int(v) => write!(f, "{}", v),
            RowLabel::Str(v) => write!(f, "{}", v),
        }
    }
}

impl From<RowLabel> for Value {
    fn from(label: RowLabel) -> Self {
        match label {
            RowLabel::Int(v) => Value::Int(v),
            RowLabel::Str(v) => Value::Str(v),
        }
    }
}

impl From<i64> for RowLabel {
    fn from(value: i64) -> Self {
        RowLabel::Int(value)
    }
}

impl From<&str> for RowLabel {
    fn from(value: &str) -> Self {
        RowLabel::Str(value.to_string())
    }
}

impl From<String> for RowLabel {
    fn from(value: String) -> Self {
        RowLabel::Str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case(Value::Null, true)]
    #[case(Value::Float(f64::NAN), true)]
    #[case(Value::Float(0.0), false)]
    #[case(Value::Int(0), false)]
    #[case(Value::Str(String::new()), false)]
    fn test_is_missing(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(value.is_missing(), expected);
    }

    #[rstest]
    fn test_total_cmp_mixed_numeric() {
        assert_eq!(Value::Int(2).total_cmp(&Value::Float(2.5)), Ordering::Less);
        assert_eq!(Value::Float(3.0).total_cmp(&Value::Int(3)), Ordering::Equal);
        assert_eq!(
            Value::from("B").total_cmp(&Value::from("A")),
            Ordering::Greater
        );
    }

    #[rstest]
    fn test_fits() {
        assert!(Value::Int(1).fits(DataType::Float));
        assert!(!Value::Float(1.0).fits(DataType::Int));
        assert!(Value::Null.fits(DataType::Str));
        assert!(!Value::from("x").fits(DataType::Bool));
    }

    #[rstest]
    fn test_option_into_value() {
        assert_eq!(Value::from(None::<f64>), Value::Null);
        assert_eq!(Value::from(Some(4i64)), Value::Int(4));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_deserialize_values() {
        let values: Vec<Value> =
            serde_json::from_str(r#"["Null", {"Int": 3}, {"Float": 0.5}, {"Str": "H001"}]"#)
                .unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Int(3),
                Value::Float(0.5),
                Value::from("H001")
            ]
        );

        let data_type: DataType = serde_json::from_str(r#""Float""#).unwrap();
        assert_eq!(data_type, DataType::Float);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_row_label_serde_round_trip() {
        let labels = vec![RowLabel::Int(7), RowLabel::from("A")];
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"[{"Int":7},{"Str":"A"}]"#);

        let parsed: Vec<RowLabel> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, labels);
    }
}
