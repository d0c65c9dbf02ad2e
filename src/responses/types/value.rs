use chrono::prelude::*;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i128),
    Float(f64),
    String(String),
    NaiveDateTime(NaiveDateTime),
    Nullable(Option<Box<Value>>),
    Unsupported(serde_json::Value),
}

impl Value {
    /// Unwraps `Nullable`, returning `None` for SQL NULL.
    pub fn inner(&self) -> Option<&Value> {
        match self {
            Value::Nullable(Some(v)) => v.inner(),
            Value::Nullable(None) => None,
            v => Some(v),
        }
    }

    pub fn as_integer(&self) -> Option<i128> {
        match self.inner() {
            Some(Value::Integer(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.inner() {
            Some(Value::String(v)) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{:?}", *v),
            Value::Integer(v) => write!(f, "{:?}", *v),
            Value::Float(v) => write!(f, "{:?}", *v),
            Value::String(v) => write!(f, "{}", *v),
            Value::NaiveDateTime(v) => write!(f, "{:?}", *v),
            Value::Unsupported(v) => write!(f, "{:?}", *v),
            Value::Nullable(b) => match b {
                Some(v) => write!(f, "{}", *v),
                None => write!(f, "NULL"),
            },
        }
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub enum ValueType {
    Boolean,
    Integer,
    Float,
    String,
    NaiveDateTime,
    Nullable(Box<ValueType>),
    Unsupported,
}
