//! Cell values
//!
//! A single cell in a parsed table. Serializes untagged so a merged dataset
//! renders as plain JSON scalars.

use serde::{Serialize, Serializer};

/// Value of one table cell
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    /// Missing or empty cell
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    /// Check if this cell is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Normalize a float: whole numbers that fit in an i64 become `Int`
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite()
            && value.fract() == 0.0
            && value >= i64::MIN as f64
            && value < i64::MAX as f64
        {
            CellValue::Int(value as i64)
        } else {
            CellValue::Float(value)
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Null => serializer.serialize_unit(),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Int(i) => serializer.serialize_i64(*i),
            // NaN and infinities have no JSON form
            CellValue::Float(f) if !f.is_finite() => serializer.serialize_unit(),
            CellValue::Float(f) => serializer.serialize_f64(*f),
            CellValue::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_scalars() {
        let cells = vec![
            CellValue::Null,
            CellValue::Bool(true),
            CellValue::Int(-3),
            CellValue::Float(2.5),
            CellValue::from("abc"),
        ];
        let value = serde_json::to_value(&cells).unwrap();
        assert_eq!(value, json!([null, true, -3, 2.5, "abc"]));
    }

    #[test]
    fn test_non_finite_float_is_null() {
        let value = serde_json::to_value(CellValue::Float(f64::NAN)).unwrap();
        assert_eq!(value, json!(null));
    }

    #[test]
    fn test_from_f64_whole_number() {
        assert_eq!(CellValue::from_f64(42.0), CellValue::Int(42));
        assert_eq!(CellValue::from_f64(-1.0), CellValue::Int(-1));
        assert_eq!(CellValue::from_f64(0.25), CellValue::Float(0.25));
        assert!(matches!(CellValue::from_f64(1e300), CellValue::Float(_)));
    }
}
