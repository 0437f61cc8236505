use crate::{core::value::Value, records::row::RowData};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tabular query result: named columns and row-major cells.
///
/// Built fresh per query call and owned by the caller afterwards. The schema
/// is whatever the backend returned; no typing is enforced across rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl ResultTable {
    pub fn new() -> Self {
        ResultTable::default()
    }

    /// Assembles a table from backend rows.
    ///
    /// Column order is first-seen order across all rows; cells missing from a
    /// given row become `Value::Null`.
    pub fn from_rows(rows: &[RowData]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in rows {
            for field in &row.field_values {
                if !columns.iter().any(|c| c == &field.name) {
                    columns.push(field.name.clone());
                }
            }
        }

        let data = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .map(|col| {
                        row.field_values
                            .iter()
                            .find(|f| &f.name == col)
                            .and_then(|f| f.value.clone())
                            .unwrap_or(Value::Null)
                    })
                    .collect()
            })
            .collect();

        ResultTable {
            columns,
            rows: data,
        }
    }

    /// (row count, column count)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns a copy of the first `n` rows.
    pub fn head(&self, n: usize) -> ResultTable {
        ResultTable {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// All cells of a named column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Removes the named columns where present and returns the names that
    /// were actually removed. Absent names are skipped, not an error.
    pub fn drop_columns(&mut self, names: &[String]) -> Vec<String> {
        let mut dropped = Vec::new();
        for name in names {
            if let Some(idx) = self.columns.iter().position(|c| c == name) {
                self.columns.remove(idx);
                for row in &mut self.rows {
                    row.remove(idx);
                }
                dropped.push(name.clone());
            }
        }
        dropped
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &Vec<Value>> {
        self.rows.iter()
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.len()).collect();
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect();
        for row in &rendered {
            for (i, cell) in row.iter().enumerate() {
                if cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }

        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, "  ")?;
            }
            write!(f, "{:<width$}", col, width = widths[i])?;
        }
        writeln!(f)?;

        for row in &rendered {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:<width$}", cell, width = widths[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::FieldValue;

    fn sample_rows() -> Vec<RowData> {
        vec![
            RowData::new(vec![
                FieldValue::new("result", Some(Value::String("_result".into()))),
                FieldValue::new("table", Some(Value::Int(0))),
                FieldValue::new("_value", Some(Value::Float(1.5))),
                FieldValue::new("id", Some(Value::String("sensor1".into()))),
            ]),
            RowData::new(vec![
                FieldValue::new("result", Some(Value::String("_result".into()))),
                FieldValue::new("table", Some(Value::Int(0))),
                FieldValue::new("_value", Some(Value::Float(2.5))),
                FieldValue::new("id", Some(Value::String("sensor2".into()))),
            ]),
        ]
    }

    #[test]
    fn test_from_rows_shape_and_order() {
        let table = ResultTable::from_rows(&sample_rows());
        assert_eq!(table.shape(), (2, 4));
        assert_eq!(table.columns, vec!["result", "table", "_value", "id"]);
    }

    #[test]
    fn test_from_rows_pads_missing_cells() {
        let rows = vec![
            RowData::new(vec![FieldValue::new("a", Some(Value::Int(1)))]),
            RowData::new(vec![FieldValue::new("b", Some(Value::Int(2)))]),
        ];
        let table = ResultTable::from_rows(&rows);
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows[0], vec![Value::Int(1), Value::Null]);
        assert_eq!(table.rows[1], vec![Value::Null, Value::Int(2)]);
    }

    #[test]
    fn test_drop_columns_best_effort() {
        let mut table = ResultTable::from_rows(&sample_rows());
        let dropped = table.drop_columns(&[
            "result".to_string(),
            "table".to_string(),
            "no_such_column".to_string(),
        ]);
        assert_eq!(dropped, vec!["result", "table"]);
        assert_eq!(table.columns, vec!["_value", "id"]);
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_head_truncates() {
        let table = ResultTable::from_rows(&sample_rows());
        assert_eq!(table.head(1).shape(), (1, 4));
        assert_eq!(table.head(10).shape(), (2, 4));
    }

    #[test]
    fn test_column_lookup() {
        let table = ResultTable::from_rows(&sample_rows());
        let values = table.column("_value").unwrap();
        assert_eq!(values, vec![&Value::Float(1.5), &Value::Float(2.5)]);
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn test_empty_table() {
        let table = ResultTable::from_rows(&[]);
        assert!(table.is_empty());
        assert_eq!(table.shape(), (0, 0));
    }
}
