use crate::responses::types::row_type::RowType;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalResult {
    pub rowtype: Vec<RowType>,
    pub rowset: Option<Vec<Vec<serde_json::Value>>>,
    pub rowset_base64: Option<String>,
    pub query_id: String,
    #[serde(default)]
    pub total: usize,
    pub query_result_format: Option<String>,
}
