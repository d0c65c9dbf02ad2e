use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DataResponse<S> {
    #[serde(default)]
    pub data: S,
    pub code: Option<String>,
    pub message: Option<String>,
    pub success: bool,
}
