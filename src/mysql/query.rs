use std::sync::Arc;

use chrono::NaiveDate;
use mysql_async::{Column, Row, Value};

use crate::results::ResultSet;
use crate::types::RowValue;

/// Convert a `mysql_async` value into a `RowValue`.
///
/// Text columns arrive as bytes and are decoded as UTF-8 where possible. Zero dates and
/// TIME values have no timestamp form and are returned as text.
#[must_use]
pub fn mysql_value_to_row_value(value: &Value) -> RowValue {
    match value {
        Value::NULL => RowValue::Null,
        Value::Int(i) => RowValue::Int(*i),
        Value::UInt(u) => i64::try_from(*u).map_or_else(|_| RowValue::Text(u.to_string()), RowValue::Int),
        Value::Float(f) => RowValue::Float(f64::from(*f)),
        Value::Double(d) => RowValue::Float(*d),
        Value::Bytes(bytes) => match String::from_utf8(bytes.clone()) {
            Ok(text) => RowValue::Text(text),
            Err(e) => RowValue::Blob(e.into_bytes()),
        },
        Value::Date(year, month, day, hour, minute, second, micros) => {
            NaiveDate::from_ymd_opt(i32::from(*year), u32::from(*month), u32::from(*day))
                .and_then(|date| {
                    date.and_hms_micro_opt(
                        u32::from(*hour),
                        u32::from(*minute),
                        u32::from(*second),
                        *micros,
                    )
                })
                .map_or_else(
                    || {
                        RowValue::Text(format!(
                            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                        ))
                    },
                    RowValue::Timestamp,
                )
        }
        Value::Time(negative, days, hours, minutes, seconds, _micros) => {
            let sign = if *negative { "-" } else { "" };
            let total_hours = u64::from(*days) * 24 + u64::from(*hours);
            RowValue::Text(format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}"))
        }
    }
}

/// Build a result set from fetched rows; `columns` comes from the prepared statement
/// so empty results still carry column names.
#[must_use]
pub fn build_result_set(columns: &[Column], rows: Vec<Row>) -> ResultSet {
    let column_names: Vec<String> = columns.iter().map(|c| c.name_str().into_owned()).collect();
    let col_count = column_names.len();
    let mut result_set = ResultSet::with_capacity(rows.len());
    result_set.set_column_names(Arc::new(column_names));

    for row in rows {
        let row_values = (0..col_count)
            .map(|i| row.as_ref(i).map_or(RowValue::Null, mysql_value_to_row_value))
            .collect();
        result_set.add_row_values(row_values);
    }
    result_set
}
