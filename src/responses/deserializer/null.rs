use crate::errors::SnowflakeError;
use crate::responses::types::{row_type::RowType, value::Value};
use anyhow::anyhow;

pub(super) fn from_json(row_type: &RowType) -> Result<Value, SnowflakeError> {
    if row_type.nullable {
        Ok(Value::Nullable(None))
    }
    else {
        let e = anyhow!("Encountered NULL value for non-nullable field {}", row_type.name);
        Err(SnowflakeError::DeserializationError(e, None))
    }
}
