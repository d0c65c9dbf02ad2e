pub mod checklist;
pub mod cli;
pub mod config;
pub mod errors;
pub mod keys;
pub mod report;
pub mod requests;
pub mod responses;
pub mod session;

mod jwt;

use anyhow::anyhow;
use async_trait::async_trait;
use checklist::Connector;
use config::Config;
use errors::SnowflakeError;
use keys::PrivateKey;
use requests::{DataRequest, LoginRequest};
use responses::{data::DataResponse, login::LoginResponse};
use serde_json::json;
use session::Session;
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};


#[derive(Debug)]
pub struct Snowprobe {
    // Required properties
    pub account: String,
    pub user: String,

    // Session context, applied right after login
    role: Option<String>,
    database: Option<String>,
    schema: Option<String>,
    warehouse: Option<String>,

    // Optional settings
    host: Option<String>
}

impl Snowprobe {

    /// Creates a minimal client instance able to connect to Snowflake with a key pair.
    pub fn new(account: String, user: String) -> Self {
        Snowprobe {
            account,
            user,
            role: None,
            database: None,
            schema: None,
            warehouse: None,
            host: None
        }
    }

    /// Creates a client carrying the account, user and session context of a config file.
    pub fn from_config(config: &Config) -> Self {
        let client = Snowprobe::new(config.account.clone(), config.user.clone())
            .role(&config.role)
            .database(&config.database)
            .schema(&config.schema)
            .warehouse(&config.warehouse);

        match &config.host {
            Some(host) => client.host(host),
            None => client
        }
    }

    pub fn role(mut self, role: &str) -> Self {
        self.role = Some(role.to_owned());
        self
    }

    pub fn database(mut self, database: &str) -> Self {
        self.database = Some(database.to_owned());
        self
    }

    pub fn schema(mut self, schema: &str) -> Self {
        self.schema = Some(schema.to_owned());
        self
    }

    pub fn warehouse(mut self, warehouse: &str) -> Self {
        self.warehouse = Some(warehouse.to_owned());
        self
    }

    /// Overrides the `https://{account}.snowflakecomputing.com` base URL.
    pub fn host(mut self, host: &str) -> Self {
        self.host = Some(host.trim_end_matches('/').to_owned());
        self
    }

    /// Creates a connection to Snowflake using key-pair authentication.
    ///
    /// The key is only used to sign the login token and is dropped before
    /// this returns. Role, database, schema and warehouse are sent with the
    /// login request if set.
    pub async fn connect(&self, private_key: PrivateKey) -> Result<Session, SnowflakeError> {
        let token = jwt::generate_token(&self.account, &self.user, &private_key)?;
        drop(private_key);

        let headers = Snowprobe::get_headers(None)
            .map_err(SnowflakeError::GeneralError)?;

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SnowflakeError::GeneralError(e.into()))?;

        let (account_name, region) = self.account.split_once('.').unwrap_or((self.account.as_str(), ""));

        let req = DataRequest {
            data: LoginRequest {
                account_name,
                login_name: &self.user,
                authenticator: "SNOWFLAKE_JWT",
                token: &token,
                client_app_id: "PythonConnector",
                client_app_version: "3.12.0",
                session_parameters: Some(json!({
                    "TIMEZONE": "Etc/GMT",
                    "PYTHON_CONNECTOR_QUERY_RESULT_FORMAT": "JSON"
                }))
            }
        };

        let body = client
            .post(self.get_session_url("login-request"))
            .query(&self.get_context_params())
            .json(&req)
            .send().await
            .map_err(|e| SnowflakeError::AuthenticationError(e.into()))?;

        let text = body
            .text().await
            .map_err(|e| SnowflakeError::AuthenticationError(e.into()))?;

        let res: DataResponse<serde_json::Value> = serde_json::from_str(&text)
            .map_err(|e| {
                log::error!("Failed to authenticate due to deserialization error.");
                SnowflakeError::new_deserialization_error_with_value(e.into(), text.to_owned())
            })?;

        if !res.success {
            if let Some(message) = res.message {
                return Err(SnowflakeError::AuthenticationError(anyhow!(message)));
            }
            else {
                return Err(SnowflakeError::AuthenticationError(
                    anyhow!("Failed to authenticate, but no reason was given by Snowflake API")
                ));
            }
        }

        let data: LoginResponse = serde_json::from_value(res.data)
            .map_err(|e| {
                log::error!(
                    "Failed to authenticate due to data deserialization error."
                );
                SnowflakeError::new_deserialization_error_with_value(e.into(), text.to_owned())
            })?;

        log::debug!("Authenticated as {} with session {:?}", self.user, data.session_id);

        let session_headers = Snowprobe::get_headers(Some(data.token.as_str()))
            .map_err(SnowflakeError::GeneralError)?;

        let session_client = reqwest::Client::builder()
            .gzip(true)
            .deflate(true)
            .default_headers(session_headers)
            .build()
            .map_err(|e| SnowflakeError::GeneralError(e.into()))?;

        Ok(Session::new(
            session_client,
            &self.get_host(),
            account_name,
            (!region.is_empty()).then_some(region)
        ))
    }

    /// Session context, applied by the server at login. Values are passed
    /// as-is and never become SQL text.
    fn get_context_params(&self) -> Vec<(&'static str, &str)> {
        [
            ("databaseName", &self.database),
            ("schemaName", &self.schema),
            ("warehouse", &self.warehouse),
            ("roleName", &self.role),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }

    #[inline]
    fn get_host(&self) -> String {
        match &self.host {
            Some(host) => host.clone(),
            None => format!("https://{}.snowflakecomputing.com", &self.account)
        }
    }

    fn get_session_url(&self, command: &str) -> String {
        let uuid = uuid::Uuid::new_v4();
        let guid = uuid::Uuid::new_v4();
        let url = format!("{}/session/v1/{command}?request_id={uuid}&request_guid={guid}", self.get_host());
        log::debug!("Using session url {url}");
        url
    }

    fn get_headers(token: Option<&str>) -> Result<HeaderMap, anyhow::Error> {
        let mut headers = HeaderMap::with_capacity(4);
        headers.append(ACCEPT, "application/snowflake".parse()?);
        headers.append(AUTHORIZATION, format!("Snowflake Token=\"{}\"", token.unwrap_or("None")).parse()?);
        headers.append(CONTENT_TYPE, "application/json".parse()?);
        headers.append(USER_AGENT, concat!(env!("CARGO_PKG_NAME"), '/', env!("CARGO_PKG_VERSION")).parse()?);
        Ok(headers)
    }

}

#[async_trait]
impl Connector for Snowprobe {

    type Connection = Session;

    async fn open(&self, private_key: PrivateKey) -> Result<Session, SnowflakeError> {
        self.connect(private_key).await
    }

}
