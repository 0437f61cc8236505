use crate::core::value::{FieldValue, Value};
use serde::{Deserialize, Serialize};

/// One record returned by the backend, as an ordered list of named cells.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowData {
    pub field_values: Vec<FieldValue>,
}

impl RowData {
    pub fn new(field_values: Vec<FieldValue>) -> Self {
        RowData { field_values }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.field_values
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(field))
    }

    pub fn get_value(&self, field: &str) -> Value {
        self.get(field)
            .and_then(|f| f.value.clone())
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_is_case_insensitive() {
        let row = RowData::new(vec![FieldValue::new("_Value", Some(Value::Float(1.0)))]);
        assert!(row.get("_value").is_some());
        assert_eq!(row.get_value("_VALUE"), Value::Float(1.0));
    }

    #[test]
    fn test_missing_field_is_null() {
        let row = RowData::new(vec![]);
        assert_eq!(row.get_value("id"), Value::Null);
    }
}
