use crate::errors::SnowflakeError;
use crate::responses::deserializer::wrap_nullable;
use crate::responses::types::{row_type::RowType, value::Value};

use anyhow::anyhow;

pub(super) fn from_json(json: &str, row_type: &RowType) -> Result<Value, SnowflakeError> {
    let v = match json {
        "1" | "true" | "TRUE" => true,
        "0" | "false" | "FALSE" => false,
        x => {
            return Err(SnowflakeError::new_deserialization_error_with_field_and_value(
                anyhow!("Unexpected boolean value {x}"),
                row_type.name.clone(),
                x.to_owned(),
            ))
        }
    };

    Ok(wrap_nullable(Value::Boolean(v), row_type.nullable))
}
