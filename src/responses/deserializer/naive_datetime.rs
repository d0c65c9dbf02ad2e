use crate::errors::SnowflakeError;
use crate::responses::deserializer::wrap_nullable;
use crate::responses::types::{row_type::RowType, value::Value};

use anyhow::anyhow;
use chrono::prelude::*;

/// Parses `TIMESTAMP_NTZ` cells, sent as `<epoch seconds>.<fraction>`.
pub(super) fn from_json(json: &str, row_type: &RowType) -> Result<Value, SnowflakeError> {
    let invalid = || {
        SnowflakeError::new_deserialization_error_with_field_and_value(
            anyhow!("Invalid epoch timestamp"),
            row_type.name.clone(),
            json.to_owned(),
        )
    };

    let negative = json.starts_with('-');
    let (secs, fraction) = json.split_once('.').unwrap_or((json, ""));
    let secs: i64 = secs.parse().map_err(|_| invalid())?;

    if fraction.len() > 9 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let nanos: u32 = if fraction.is_empty() {
        0
    }
    else {
        format!("{fraction:0<9}").parse().map_err(|_| invalid())?
    };

    // Negative epochs carry the fraction towards zero, e.g. "-1.5" is 1.5s before the epoch.
    let value = if negative && nanos > 0 {
        DateTime::from_timestamp(secs - 1, 1_000_000_000 - nanos)
    }
    else {
        DateTime::from_timestamp(secs, nanos)
    }
    .ok_or_else(invalid)?
    .naive_utc();

    Ok(wrap_nullable(Value::NaiveDateTime(value), row_type.nullable))
}
