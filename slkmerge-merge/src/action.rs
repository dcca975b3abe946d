use slkmerge_core::models::Value;

use crate::aggregation::Aggregation;

///
/// What an action outputs for a target row that no data row qualifies for.
///
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Infill {
    /// Leave the cell missing.
    #[default]
    None,
    /// Fill the cell with a fixed value.
    Value(Value),
}

impl Infill {
    pub fn value(value: impl Into<Value>) -> Self {
        Infill::Value(value.into())
    }

    /// The cell value written when nothing qualifies.
    pub fn as_value(&self) -> Value {
        match self {
            Infill::None => Value::Null,
            Infill::Value(value) => value.clone(),
        }
    }
}

///
/// One output column of a merge: which data column to read, how to aggregate
/// it, and what to call the result.
///
/// ```rust
/// use slkmerge_merge::{Action, Aggregation, Infill};
///
/// let action = Action::new("AADT", Aggregation::LengthWeightedAverage)
///     .with_rename("aadt_lwa")
///     .with_infill(Infill::value(0.0));
///
/// assert_eq!(action.output_name(), "aadt_lwa");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub column_name: String,
    pub aggregation: Aggregation,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rename: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub infill: Infill,
}

impl Action {
    pub fn new(column_name: impl Into<String>, aggregation: Aggregation) -> Self {
        Action {
            column_name: column_name.into(),
            aggregation,
            rename: None,
            infill: Infill::None,
        }
    }

    pub fn with_rename(mut self, rename: impl Into<String>) -> Self {
        self.rename = Some(rename.into());
        self
    }

    pub fn with_infill(mut self, infill: Infill) -> Self {
        self.infill = infill;
        self
    }

    /// Name of the output column: the rename if given, else the source column name.
    pub fn output_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.column_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_output_name() {
        let action = Action::new("Curv", Aggregation::Average);
        assert_eq!(action.output_name(), "Curv");

        let action = action.with_rename("curvature");
        assert_eq!(action.output_name(), "curvature");
    }

    #[rstest]
    fn test_infill_value() {
        assert_eq!(Infill::None.as_value(), Value::Null);
        assert_eq!(Infill::value("none").as_value(), Value::from("none"));
        assert_eq!(Action::new("x", Aggregation::Sum).infill, Infill::None);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_deserialize_action() {
        let action: Action = serde_json::from_str(
            r#"{"column_name": "Defl", "aggregation": {"LengthWeightedPercentile": 0.9}, "rename": "defl_90"}"#,
        )
        .unwrap();

        assert_eq!(action.output_name(), "defl_90");
        assert_eq!(action.infill, Infill::None);
        assert_eq!(
            action.aggregation,
            Aggregation::length_weighted_percentile(0.9).unwrap()
        );
    }
}
