use crate::errors::SnowflakeError;
use crate::responses::deserializer::wrap_nullable;
use crate::responses::types::{row_type::RowType, value::Value};

pub(super) fn from_json(json: &str, row_type: &RowType) -> Result<Value, SnowflakeError> {
    Ok(wrap_nullable(Value::String(json.to_owned()), row_type.nullable))
}
