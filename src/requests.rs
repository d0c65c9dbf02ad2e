use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct DataRequest<S> {
    pub data: S
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct LoginRequest<'a> {
    pub account_name: &'a str,
    pub login_name: &'a str,
    pub authenticator: &'a str,
    pub token: &'a str,
    pub client_app_id: &'a str,
    pub client_app_version: &'a str,
    pub session_parameters: Option<serde_json::Value>
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest<'a> {
    pub async_exec: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bindings: Option<BTreeMap<String, Binding>>,
    pub parameters: Option<serde_json::Value>,
    pub query_submission_time: i64,
    pub sequence_id: u32,
    pub sql_text: &'a str
}

/// A positional `?` bind value, sent as Snowflake's typed string form.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Binding {
    #[serde(rename = "type")]
    pub data_type: &'static str,
    pub value: String
}

impl Binding {

    /// Numbers bindings from 1, the way the server expects them.
    pub(crate) fn positional(bindings: &[Binding]) -> Option<BTreeMap<String, Binding>> {
        if bindings.is_empty() {
            return None;
        }

        Some(bindings
            .iter()
            .enumerate()
            .map(|(i, b)| ((i + 1).to_string(), b.clone()))
            .collect())
    }

}

impl From<i64> for Binding {
    fn from(value: i64) -> Self {
        Binding { data_type: "FIXED", value: value.to_string() }
    }
}

impl From<&str> for Binding {
    fn from(value: &str) -> Self {
        Binding { data_type: "TEXT", value: value.to_owned() }
    }
}
