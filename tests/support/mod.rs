#![allow(dead_code)]

use rotenv::dotenv;
use serde_json::{json, Value};
use simple_logger;
use snowprobe::config::Config;
use snowprobe::keys::PrivateKey;
use std::path::PathBuf;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SESSION_TOKEN: &str = "ver:1-hint:1234-ETMsDgAAAYtest";

pub fn common_init() {
    dotenv().ok();
    _ = simple_logger::init_with_env();
}

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

pub fn private_key() -> PrivateKey {
    PrivateKey::load(&fixture("rsa_key.p8")).expect("Fixture key should load")
}

/// Config pointing at a fake server.
pub fn config_for(server: &MockServer) -> Config {
    Config {
        account: "xy12345.us-east-2".to_owned(),
        user: "etl_service".to_owned(),
        warehouse: "ETL_WH".to_owned(),
        database: "ANALYTICS".to_owned(),
        schema: "STAGING".to_owned(),
        role: "ETL_ROLE".to_owned(),
        host: Some(server.uri()),
    }
}

/// Config read from `SNOWFLAKE_*` variables, if all of them are set.
pub fn live_config() -> Option<(Config, PathBuf)> {
    let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
    let config = Config {
        account: var("SNOWFLAKE_ACCOUNT")?,
        user: var("SNOWFLAKE_USER")?,
        warehouse: var("SNOWFLAKE_WAREHOUSE")?,
        database: var("SNOWFLAKE_DATABASE")?,
        schema: var("SNOWFLAKE_SCHEMA")?,
        role: var("SNOWFLAKE_ROLE")?,
        host: None,
    };
    Some((config, PathBuf::from(var("SNOWFLAKE_PRIVATE_KEY_PATH")?)))
}

pub fn success(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": data,
        "code": null,
        "message": null,
        "success": true
    }))
}

pub fn failure(code: &str, message: &str, data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": data,
        "code": code,
        "message": message,
        "success": false
    }))
}

/// A JSON result set in the shape Snowflake returns it.
pub fn rows(rowtype: Value, rowset: Value) -> Value {
    let total = rowset.as_array().map(Vec::len).unwrap_or(0);
    json!({
        "rowtype": rowtype,
        "rowset": rowset,
        "total": total,
        "queryId": "01b2c3d4-0000-1111-0000-000000000001",
        "queryResultFormat": "json"
    })
}

pub fn status_result() -> Value {
    rows(
        json!([{"name": "status", "type": "text", "nullable": true, "length": 16777216}]),
        json!([["Statement executed successfully."]])
    )
}

pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/session/v1/login-request"))
        .and(body_partial_json(json!({"data": {"AUTHENTICATOR": "SNOWFLAKE_JWT"}})))
        .respond_with(success(json!({
            "token": SESSION_TOKEN,
            "masterToken": "master",
            "sessionId": 1172562260498_i64
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Answers every statement that has no more specific mock.
pub async fn mount_statements(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/queries/v1/query-request"))
        .respond_with(success(status_result()))
        .with_priority(10)
        .mount(server)
        .await;
}

pub async fn mount_close(server: &MockServer, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(success(Value::Null))
        .expect(expected)
        .mount(server)
        .await;
}

#[macro_export]
macro_rules! assert_err {
    ($expression:expr, $($pattern:tt)+) => {
        match $expression {
            $($pattern)+ => (),
            ref e => panic!("expected `{}` but got `{:?}`", stringify!($($pattern)+), e),
        }
    }
}
