use crate::errors::SnowflakeError;
use crate::responses::get_query_detail_url;
use crate::session::Session;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InternalErrorResult {
    #[serde(rename = "type")]
    error_type: Option<String>,
    error_code: String,
    #[serde(default)]
    internal_error: bool,
    line: Option<i32>,
    pos: Option<i32>,
    query_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResult {
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub error_code: String,
    pub internal_error: bool,
    pub line: Option<i32>,
    pub pos: Option<i32>,
    pub query_id: Option<String>,
    pub query_detail_url: Option<String>,
}

impl ErrorResult {
    pub(crate) fn deserialize(json: serde_json::Value, session: &Session) -> Result<Self, SnowflakeError> {
        let res: InternalErrorResult = serde_json::from_value(json.clone())
            .map_err(|e| SnowflakeError::new_deserialization_error_with_value(e.into(), json.to_string()))?;
        let query_detail_url = res.query_id.as_deref().map(|id| get_query_detail_url(session, id));
        Ok(Self {
            error_type: res.error_type,
            error_code: res.error_code,
            internal_error: res.internal_error,
            line: res.line,
            pos: res.pos,
            query_id: res.query_id,
            query_detail_url,
        })
    }
}
