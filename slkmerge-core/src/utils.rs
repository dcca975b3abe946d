use crate::errors::UnitConversionError;
use crate::models::ColumnData;

///
/// Convert a column of kilometres to whole metres.
///
/// Values are multiplied by 1000 and rounded half to even. Every value must be
/// present, finite and representable as a 32 bit integer.
///
pub fn km_to_metres(km: &ColumnData) -> Result<ColumnData, UnitConversionError> {
    let metres = match km {
        ColumnData::Int(values) => values
            .iter()
            .enumerate()
            .map(|(row, v)| {
                let v = v.ok_or(UnitConversionError::MissingValue(row))?;
                to_metres(row, v as f64)
            })
            .collect::<Result<Vec<_>, _>>()?,
        ColumnData::Float(values) => values
            .iter()
            .enumerate()
            .map(|(row, v)| {
                let v = v.ok_or(UnitConversionError::MissingValue(row))?;
                if v.is_nan() {
                    return Err(UnitConversionError::MissingValue(row));
                }
                to_metres(row, v)
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => return Err(UnitConversionError::NotNumeric(other.data_type())),
    };

    Ok(ColumnData::Int(metres.into_iter().map(Some).collect()))
}

fn to_metres(row: usize, km: f64) -> Result<i64, UnitConversionError> {
    if !km.is_finite() {
        return Err(UnitConversionError::NonFinite { row, value: km });
    }
    let metres = (km * 1000.0).round_ties_even();
    if metres < i32::MIN as f64 || metres > i32::MAX as f64 {
        return Err(UnitConversionError::OutOfRange { row, value: km });
    }
    Ok(metres as i64)
}
