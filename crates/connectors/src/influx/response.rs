use crate::error::DbError;
use chrono::{DateTime, Utc};
use model::{
    core::value::{FieldValue, Value},
    records::row::RowData,
};
use tracing::warn;

/// Decodes an annotated-CSV query response into rows.
///
/// The InfluxDB 2.x query API streams one or more CSV tables, each preceded
/// by `#datatype`, `#group` and `#default` annotation rows and a header row.
/// The first column of every row is the annotation column and is skipped.
/// Tables are concatenated into a single row sequence.
pub fn decode_annotated_csv(raw: &str) -> Result<Vec<RowData>, DbError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut rows = Vec::new();
    let mut datatypes: Vec<String> = Vec::new();
    let mut defaults: Vec<String> = Vec::new();
    let mut headers: Option<Vec<String>> = None;

    for record in reader.records() {
        let record = record.map_err(|e| DbError::Decode(e.to_string()))?;
        let fields: Vec<&str> = record.iter().collect();
        if fields.is_empty() {
            continue;
        }

        match fields[0] {
            // A new annotation block marks the start of the next table.
            "#datatype" => {
                datatypes = fields.iter().map(|s| s.to_string()).collect();
                defaults.clear();
                headers = None;
            }
            "#default" => {
                defaults = fields.iter().map(|s| s.to_string()).collect();
            }
            s if s.starts_with('#') => {}
            _ => {
                if let Some(header) = headers.as_ref() {
                    rows.push(decode_row(&fields, header, &datatypes, &defaults));
                } else {
                    headers = Some(fields.iter().map(|s| s.to_string()).collect());
                }
            }
        }
    }

    Ok(rows)
}

fn decode_row(
    fields: &[&str],
    headers: &[String],
    datatypes: &[String],
    defaults: &[String],
) -> RowData {
    let mut field_values = Vec::with_capacity(headers.len().saturating_sub(1));

    // Column 0 is the annotation column.
    for (idx, name) in headers.iter().enumerate().skip(1) {
        let raw = fields.get(idx).copied().unwrap_or("");
        let raw = if raw.is_empty() {
            defaults.get(idx).map(String::as_str).unwrap_or("")
        } else {
            raw
        };
        let datatype = datatypes.get(idx).map(String::as_str).unwrap_or("string");

        let value = if raw.is_empty() {
            None
        } else {
            Some(parse_value(datatype, raw))
        };
        field_values.push(FieldValue::new(name, value));
    }

    RowData::new(field_values)
}

fn parse_value(datatype: &str, raw: &str) -> Value {
    match datatype {
        "long" => match raw.parse::<i64>() {
            Ok(v) => Value::Int(v),
            Err(_) => fallback(datatype, raw),
        },
        "unsignedLong" => match raw.parse::<u64>() {
            Ok(v) => Value::Uint(v),
            Err(_) => fallback(datatype, raw),
        },
        "double" => match raw.parse::<f64>() {
            Ok(v) => Value::Float(v),
            Err(_) => fallback(datatype, raw),
        },
        "boolean" => match raw {
            "true" => Value::Boolean(true),
            "false" => Value::Boolean(false),
            _ => fallback(datatype, raw),
        },
        s if s.starts_with("dateTime") => match DateTime::parse_from_rfc3339(raw) {
            Ok(v) => Value::Timestamp(v.with_timezone(&Utc)),
            Err(_) => fallback(datatype, raw),
        },
        _ => Value::String(raw.to_string()),
    }
}

fn fallback(datatype: &str, raw: &str) -> Value {
    warn!("Could not parse '{raw}' as {datatype}, keeping it as a string");
    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = "\
#datatype,string,long,dateTime:RFC3339,double,string\n\
#group,false,false,false,false,true\n\
#default,_result,,,,\n\
,result,table,_time,_value,id\n\
,,0,2024-05-15T08:00:00Z,1.5,sensor1\n\
,,0,2024-05-15T08:00:10Z,2.5,sensor2\n";

    #[test]
    fn test_decode_single_table() {
        let rows = decode_annotated_csv(SAMPLE).unwrap();
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.get_value("result"), Value::String("_result".into()));
        assert_eq!(first.get_value("table"), Value::Int(0));
        assert_eq!(first.get_value("_value"), Value::Float(1.5));
        assert_eq!(first.get_value("id"), Value::String("sensor1".into()));
        assert_eq!(
            first.get_value("_time"),
            Value::Timestamp(Utc.with_ymd_and_hms(2024, 5, 15, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_decode_multiple_tables() {
        let raw = format!(
            "{SAMPLE}\n\
#datatype,string,long,boolean\n\
#group,false,false,false\n\
#default,_result,,\n\
,result,table,healthy\n\
,,1,true\n"
        );
        let rows = decode_annotated_csv(&raw).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].get_value("healthy"), Value::Boolean(true));
        assert_eq!(rows[2].get_value("table"), Value::Int(1));
    }

    #[test]
    fn test_default_annotation_fills_empty_cells() {
        let rows = decode_annotated_csv(SAMPLE).unwrap();
        // The result column is empty in the data rows; the #default row
        // supplies "_result".
        assert!(
            rows.iter()
                .all(|r| r.get_value("result") == Value::String("_result".into()))
        );
    }

    #[test]
    fn test_empty_response_yields_no_rows() {
        assert!(decode_annotated_csv("").unwrap().is_empty());
        assert!(decode_annotated_csv("\r\n").unwrap().is_empty());
    }

    #[test]
    fn test_unparsable_cell_falls_back_to_string() {
        let raw = "\
#datatype,string,long\n\
#group,false,false\n\
#default,_result,\n\
,result,table\n\
,,not-a-number\n";
        let rows = decode_annotated_csv(raw).unwrap();
        assert_eq!(
            rows[0].get_value("table"),
            Value::String("not-a-number".into())
        );
    }
}
