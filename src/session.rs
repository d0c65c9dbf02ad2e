use crate::checklist::Connection;
use crate::errors::SnowflakeError;
use crate::requests::{Binding, QueryRequest};
use crate::responses::result::vec::VecResult;
use crate::responses::types::{error::ErrorResult, internal::InternalResult};
use crate::responses::{data::DataResponse, QueryResult};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::prelude::*;
use log::Level;
use logging_timer::{finish, timer};
use serde_json::json;
use std::str;
use std::sync::atomic::{AtomicU32, Ordering};

/// An authenticated Snowflake session.
///
/// Dropping a session does not log it out; call [`Session::close`].
#[derive(Debug)]
pub struct Session {
    pub(crate) client: reqwest::Client,
    pub(crate) host: String,
    pub(crate) account: String,
    pub(crate) region: Option<String>,
    pub(crate) sequence_counter: AtomicU32
}

impl Session {

    pub fn new(client: reqwest::Client, host: &str, account: &str, region: Option<&str>) -> Self {
        Session {
            client,
            host: host.to_owned(),
            account: account.to_owned(),
            region: region.map(str::to_string),
            sequence_counter: AtomicU32::new(1)
        }
    }

    pub async fn execute<T: QueryResult>(&self, query: &str) -> Result<T, SnowflakeError> {
        self.execute_with_bindings(query, &[]).await
    }

    /// Executes a statement with positional `?` bindings.
    pub async fn execute_with_bindings<T: QueryResult>(
        &self,
        query: &str,
        bindings: &[Binding]
    ) -> Result<T, SnowflakeError> {
        let tmr = timer!(Level::Debug; "QUERY");
        let now = Utc::now();
        let req = QueryRequest {
            async_exec: false,
            bindings: Binding::positional(bindings),
            parameters: Some(json!({"TIMESTAMP": "UTC"})),
            query_submission_time: now.timestamp_millis(),
            sequence_id: self.sequence_counter.fetch_add(1, Ordering::Relaxed),
            sql_text: query
        };

        let json = self.client
            .post(self.get_queries_url("query-request"))
            .json(&req)
            .build()
            .map_err(|e| SnowflakeError::ExecutionError(e.into(), None))?;

        let body = self.client
            .execute(json).await
            .map_err(|e| SnowflakeError::ExecutionError(e.into(), None))?;

        let text = body
            .text().await
            .map_err(|e| SnowflakeError::ExecutionError(e.into(), None))?;

        let res: DataResponse<serde_json::Value> = serde_json::from_str(&text)
            .map_err(|e| {
                log::error!("Failed to execute query {query} due to deserialization error.");
                SnowflakeError::new_deserialization_error_with_value(e.into(), text.to_owned())
            })?;

        if !res.success {
            let err = ErrorResult::deserialize(res.data, self).ok();
            if let Some(message) = res.message {
                return Err(SnowflakeError::ExecutionError(
                    anyhow!("Failed to execute query {query} with reason: {message}"),
                    err
                ));
            }
            else {
                return Err(SnowflakeError::ExecutionError(
                    anyhow!("Failed to execute query {query}, but no reason was given by Snowflake API"),
                    err
                ));
            }
        }

        let res: InternalResult = serde_json::from_value(res.data)
            .map_err(|e| {
                log::error!("Failed to execute query {query} due to data deserialization error.");
                SnowflakeError::new_deserialization_error_with_value(e.into(), text.to_owned())
            })?;

        let rowset = match (&res.rowset, &res.rowset_base64) {
            (Some(rowset), _) => T::deserialize_rowset(rowset, &res.rowtype)?,
            (None, Some(encoded)) if !encoded.is_empty() => {
                return Err(SnowflakeError::new_deserialization_error(anyhow!(
                    "Query {query} returned {} results, only JSON is supported",
                    res.query_result_format.as_deref().unwrap_or("binary")
                )));
            }
            _ => Vec::new(),
        };

        finish!(tmr, "Executed {}", query);
        Ok(T::new(&res, rowset, self))
    }

    /// Logs the session out on the server side.
    pub async fn close(self) -> Result<(), SnowflakeError> {
        let url = self.get_session_url();
        let body = self.client
            .post(&url)
            .send().await
            .map_err(|e| SnowflakeError::GeneralError(e.into()))?;

        let text = body
            .text().await
            .map_err(|e| SnowflakeError::GeneralError(e.into()))?;

        let res: DataResponse<serde_json::Value> = serde_json::from_str(&text)
            .map_err(|e| SnowflakeError::new_deserialization_error_with_value(e.into(), text.to_owned()))?;

        if !res.success {
            let message = res.message.unwrap_or_else(|| "no reason was given by Snowflake API".to_owned());
            return Err(SnowflakeError::GeneralError(anyhow!("Failed to close session: {message}")));
        }

        log::debug!("Session closed");
        Ok(())
    }

    fn get_queries_url(&self, command: &str) -> String {
        let uuid = uuid::Uuid::new_v4();
        let guid = uuid::Uuid::new_v4();
        let url = format!("{}/queries/v1/{command}?requestId={uuid}&request_guid={guid}", self.host);
        log::debug!("Using query url {url}");
        url
    }

    fn get_session_url(&self) -> String {
        let uuid = uuid::Uuid::new_v4();
        let guid = uuid::Uuid::new_v4();
        let url = format!("{}/session?delete=true&request_id={uuid}&request_guid={guid}", self.host);
        log::debug!("Using session url {url}");
        url
    }

}

#[async_trait]
impl Connection for Session {

    async fn query(&self, sql: &str, bindings: &[Binding]) -> Result<VecResult, SnowflakeError> {
        self.execute_with_bindings::<VecResult>(sql, bindings).await
    }

    async fn release(self) -> Result<(), SnowflakeError> {
        self.close().await
    }

}
