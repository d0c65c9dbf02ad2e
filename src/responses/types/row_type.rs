use crate::responses::types::value::ValueType;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RowType {
    #[serde(rename = "type")]
    pub data_type: String,
    pub name: String,
    pub nullable: bool,
    pub precision: Option<u32>,
    pub scale: Option<i32>,
    pub length: Option<usize>,
}

impl RowType {
    pub fn value_type(&self) -> ValueType {
        if self.nullable {
            ValueType::Nullable(Box::new(self.inner_value_type()))
        }
        else {
            self.inner_value_type()
        }
    }

    fn inner_value_type(&self) -> ValueType {
        match self.data_type.as_str() {
            "boolean" => ValueType::Boolean,
            "fixed" => {
                if self.scale.unwrap_or(0) == 0 {
                    ValueType::Integer
                }
                else {
                    ValueType::Float
                }
            }
            "real" => ValueType::Float,
            "text" => ValueType::String,
            "timestamp_ntz" => ValueType::NaiveDateTime,
            _ => ValueType::Unsupported,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn row_type(data_type: &str, scale: Option<i32>, nullable: bool) -> RowType {
        RowType {
            data_type: data_type.to_owned(),
            name: "COL".to_owned(),
            nullable,
            precision: None,
            scale,
            length: None,
        }
    }

    #[test]
    fn test_fixed_scale_selects_integer_or_float() {
        assert_eq!(row_type("fixed", Some(0), false).value_type(), ValueType::Integer);
        assert_eq!(row_type("fixed", Some(2), false).value_type(), ValueType::Float);
    }

    #[test]
    fn test_nullable_wraps_inner_type() {
        assert_eq!(
            row_type("text", None, true).value_type(),
            ValueType::Nullable(Box::new(ValueType::String))
        );
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        assert_eq!(row_type("geography", None, false).value_type(), ValueType::Unsupported);
    }

}
