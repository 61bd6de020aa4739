use crate::error::RowRejection;

use super::{
    columns::{ColumnKind, ColumnMap, TableSpec},
    delimited::Record,
};

/// Missing-value spellings produced by spreadsheet and dataframe exports.
/// `null` itself is matched case-insensitively.
const MISSING_MARKERS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "None", "<NA>", "#N/A", "#N/A N/A", "#NA",
    "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

/// Intermediate row: one optional text value per required column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: usize,
    pub values: Vec<Option<String>>,
}

/// A coerced value ready to be bound.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(Option<i64>),
    Text(Option<String>),
}

pub fn is_null_marker(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v.eq_ignore_ascii_case("null") || MISSING_MARKERS.contains(&v)
}

/// Project a record onto the required columns, turning sentinels into `None`.
pub fn raw_row(map: &ColumnMap, record: &Record) -> Result<RawRow, RowRejection> {
    if record.fields.len() > map.width {
        return Err(RowRejection {
            line: record.line,
            reason: format!(
                "expected at most {} fields, found {}",
                map.width,
                record.fields.len()
            ),
        });
    }

    let values = map
        .positions
        .iter()
        .map(|pos| {
            pos.and_then(|i| record.fields.get(i))
                .filter(|v| !is_null_marker(v))
                .cloned()
        })
        .collect();

    Ok(RawRow {
        line: record.line,
        values,
    })
}

pub fn coerce(spec: &TableSpec, row: RawRow) -> Result<Vec<Value>, RowRejection> {
    let line = row.line;
    spec.columns
        .iter()
        .zip(row.values)
        .map(|(col, raw)| {
            let reject = |reason: String| RowRejection { line, reason };
            match col.kind {
                ColumnKind::Text => Ok(Value::Text(raw)),
                ColumnKind::Integer => raw
                    .map(|v| parse_int(&v).ok_or_else(|| reject(bad_int(col.canonical, &v))))
                    .transpose()
                    .map(Value::Int),
                ColumnKind::Key => {
                    let v = raw.ok_or_else(|| reject(format!("{} is missing", col.canonical)))?;
                    parse_int(&v)
                        .map(|n| Value::Int(Some(n)))
                        .ok_or_else(|| reject(bad_int(col.canonical, &v)))
                }
            }
        })
        .collect()
}

fn bad_int(column: &str, value: &str) -> String {
    format!("{column}: {value:?} is not an integer")
}

/// Accepts `42` and integral floats such as `42.0`.
fn parse_int(value: &str) -> Option<i64> {
    let v = value.trim();
    if let Ok(n) = v.parse::<i64>() {
        return Some(n);
    }
    let f = v.parse::<f64>().ok()?;
    let in_range = f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15;
    in_range.then_some(f as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::tables::{COMMENTS, REQUESTS, USERS};

    fn record(line: usize, fields: &[&str]) -> Record {
        Record {
            line,
            fields: fields.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn null_markers() {
        for v in ["", "  ", "null", "NULL", "Null", " nUlL ", "NaN", "NA", "None", "<NA>"] {
            assert!(is_null_marker(v), "{v:?} should be null");
        }
        for v in ["0", "nullable", "Нет", "none of them"] {
            assert!(!is_null_marker(v), "{v:?} should be kept");
        }
    }

    #[test]
    fn raw_row_fills_missing_columns_and_sentinels_with_none() {
        let map = USERS.reconcile(&["id".into(), "login".into(), "fio".into()]);
        let row = raw_row(&map, &record(2, &["7", "login7", "NULL"])).unwrap();
        assert_eq!(
            row.values,
            vec![Some("7".into()), None, None, Some("login7".into()), None, None]
        );
    }

    #[test]
    fn short_records_pad_with_none_and_long_records_are_rejected() {
        let map = COMMENTS.reconcile(&["message".into(), "masterID".into(), "requestID".into()]);
        let short = raw_row(&map, &record(2, &["ok"])).unwrap();
        assert_eq!(short.values, vec![Some("ok".into()), None, None]);

        let err = raw_row(&map, &record(3, &["a", "1", "2", "extra"])).unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn coerce_parses_integer_columns() {
        let row = RawRow {
            line: 4,
            values: vec![Some("hi".into()), Some("2.0".into()), None],
        };
        let values = coerce(&COMMENTS, row).unwrap();
        assert_eq!(
            values,
            vec![Value::Text(Some("hi".into())), Value::Int(Some(2)), Value::Int(None)]
        );
    }

    #[test]
    fn coerce_rejects_non_numeric_foreign_key() {
        let mut values: Vec<Option<String>> = vec![None; REQUESTS.columns.len()];
        values[7] = Some("abc".into());
        let err = coerce(&REQUESTS, RawRow { line: 4, values }).unwrap_err();
        assert_eq!(err.line, 4);
        assert!(err.reason.contains("master_id"));
    }

    #[test]
    fn coerce_requires_user_key() {
        let values = vec![None, Some("Ivanov".into()), None, None, None, None];
        let err = coerce(&USERS, RawRow { line: 2, values }).unwrap_err();
        assert_eq!(err.reason, "user_id is missing");

        let values = vec![Some("1.5".into()), None, None, None, None, None];
        assert!(coerce(&USERS, RawRow { line: 2, values }).is_err());
    }
}
