pub mod boolean;
pub mod float;
pub mod integer;
pub mod naive_datetime;
pub mod null;
pub mod string;

use crate::errors::SnowflakeError;
use crate::responses::types::{
    row_type::RowType,
    value::{Value, ValueType},
};

/// Decodes a JSON rowset. Snowflake sends every non-NULL cell as a string,
/// whatever the column type.
pub trait QueryDeserializer: Sized {
    type ReturnType;

    fn deserialize_rowset(
        rowset: &[Vec<serde_json::Value>],
        rowtype: &[RowType],
    ) -> Result<Vec<Self::ReturnType>, SnowflakeError>;

    fn deserialize_value(value: &serde_json::Value, row_type: &RowType) -> Result<Value, SnowflakeError> {
        use crate::responses::deserializer::boolean::from_json as boolean_from_json;
        use crate::responses::deserializer::float::from_json as float_from_json;
        use crate::responses::deserializer::integer::from_json as integer_from_json;
        use crate::responses::deserializer::naive_datetime::from_json as naive_datetime_from_json;
        use crate::responses::deserializer::null::from_json as null_from_json;
        use crate::responses::deserializer::string::from_json as string_from_json;

        if value.is_null() {
            return null_from_json(row_type);
        }

        let text = match value.as_str() {
            Some(s) => s.to_owned(),
            None => value.to_string(),
        };

        let value_type = match row_type.value_type() {
            ValueType::Nullable(v) => *v,
            v => v,
        };

        match value_type {
            ValueType::Boolean => boolean_from_json(&text, row_type),
            ValueType::Integer => integer_from_json(&text, row_type),
            ValueType::Float => float_from_json(&text, row_type),
            ValueType::String => string_from_json(&text, row_type),
            ValueType::NaiveDateTime => naive_datetime_from_json(&text, row_type),
            _ => Ok(wrap_nullable(Value::Unsupported(value.to_owned()), row_type.nullable)),
        }
    }
}

pub(crate) fn wrap_nullable(value: Value, nullable: bool) -> Value {
    if nullable {
        Value::Nullable(Some(Box::new(value)))
    }
    else {
        value
    }
}
