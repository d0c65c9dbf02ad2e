use crate::errors::SnowflakeError;
use crate::responses::deserializer::wrap_nullable;
use crate::responses::types::{row_type::RowType, value::Value};

pub(super) fn from_json(json: &str, row_type: &RowType) -> Result<Value, SnowflakeError> {
    let parsed: f64 = json.parse().map_err(|e: std::num::ParseFloatError| {
        SnowflakeError::new_deserialization_error_with_field_and_value(
            e.into(),
            row_type.name.clone(),
            json.to_owned(),
        )
    })?;

    Ok(wrap_nullable(Value::Float(parsed), row_type.nullable))
}
