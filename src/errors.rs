use crate::keys::KeyError;
use crate::responses::types::error::ErrorResult;

#[derive(thiserror::Error, Debug)]
pub enum SnowflakeError {
    #[error("Snowflake authentication error: {0:#}")]
    AuthenticationError(anyhow::Error),
    #[error("Private key error: {0}")]
    KeyError(#[from] KeyError),
    #[error("Snowflake deserialization error: {0:#}")]
    DeserializationError(anyhow::Error, Option<DeserializationErrorContext>),
    #[error("Snowflake execution error: {0:#}")]
    ExecutionError(anyhow::Error, Option<ErrorResult>),
    #[error("Snowflake error: {0:#}")]
    GeneralError(anyhow::Error),
}

impl SnowflakeError {

    pub(crate) fn new_deserialization_error(err: anyhow::Error) -> Self {
        Self::DeserializationError(err, None)
    }

    pub(crate) fn new_deserialization_error_with_value(err: anyhow::Error, value: String) -> Self {
        Self::DeserializationError(err, Some(DeserializationErrorContext {
            field: None,
            value: Some(value)
        }))
    }

    pub(crate) fn new_deserialization_error_with_field_and_value(
        err: anyhow::Error,
        field: String,
        value: String
    ) -> Self {
        Self::DeserializationError(err, Some(DeserializationErrorContext {
            field: Some(field),
            value: Some(value)
        }))
    }

}

#[derive(Debug)]
pub struct DeserializationErrorContext {
    pub field: Option<String>,
    pub value: Option<String>
}

#[cfg(test)]
mod tests {

    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn test_display_is_one_line() {
        let source: Result<(), _> = Err(anyhow!("Connection refused (os error 111)"));
        let chained = source
            .context("tcp connect error")
            .context("error sending request")
            .unwrap_err();

        let message = SnowflakeError::AuthenticationError(chained).to_string();
        assert_eq!(
            message,
            "Snowflake authentication error: error sending request: tcp connect error: Connection refused (os error 111)"
        );
        assert!(!message.contains('\n'));
    }

    #[test]
    fn test_display_omits_context_value() {
        let err = SnowflakeError::new_deserialization_error_with_value(
            anyhow!("expected value at line 1 column 1"),
            "<html>\nBad Gateway\n</html>".to_owned()
        );
        assert_eq!(err.to_string(), "Snowflake deserialization error: expected value at line 1 column 1");
    }

}
