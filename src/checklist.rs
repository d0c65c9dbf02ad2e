//! The connection test itself: a fixed, linear sequence of steps run over a
//! single session.
//!
//! Every step aborts the sequence on failure except dropping the test table,
//! which only warns. Once connected, the session is released on every path.

use crate::config::Config;
use crate::errors::SnowflakeError;
use crate::keys::{KeyError, PrivateKey};
use crate::report::{Reporter, SampleRow};
use crate::requests::Binding;
use crate::responses::result::vec::VecResult;
use crate::responses::types::value::Value;

use anyhow::anyhow;
use async_trait::async_trait;
use std::io::Write;
use std::path::Path;

pub const TEST_TABLE: &str = "test_etl_connection";

pub const CREATE_TABLE_SQL: &str = "CREATE OR REPLACE TABLE test_etl_connection (
    id INTEGER,
    name VARCHAR(100),
    created_at TIMESTAMP_NTZ DEFAULT CURRENT_TIMESTAMP(),
    description VARCHAR(500)
)";
pub const INSERT_SQL: &str = "INSERT INTO test_etl_connection (id, name, description) VALUES (?, ?, ?)";
pub const SELECT_SQL: &str = "SELECT * FROM test_etl_connection ORDER BY id";
pub const COUNT_SQL: &str = "SELECT COUNT(*) FROM test_etl_connection";
pub const DROP_SQL: &str = "DROP TABLE IF EXISTS test_etl_connection";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TestRecord {
    pub id: i64,
    pub name: &'static str,
    pub description: &'static str,
}

impl TestRecord {
    fn bindings(&self) -> [Binding; 3] {
        [self.id.into(), self.name.into(), self.description.into()]
    }
}

pub const TEST_RECORDS: [TestRecord; 5] = [
    TestRecord { id: 1, name: "Test Record 1", description: "First test record for ETL service account" },
    TestRecord { id: 2, name: "Test Record 2", description: "Second test record with RSA authentication" },
    TestRecord { id: 3, name: "Test Record 3", description: "Third test record to verify INSERT permissions" },
    TestRecord { id: 4, name: "Test Record 4", description: "Fourth test record for validation" },
    TestRecord { id: 5, name: "Test Record 5", description: "Fifth and final test record" },
];

#[derive(thiserror::Error, Debug)]
pub enum StepError {
    #[error("Error loading private key: {0}")]
    Key(#[source] KeyError),
    #[error("Connection failed: {0}")]
    Connection(#[source] SnowflakeError),
    #[error("Error creating table: {0}")]
    CreateTable(#[source] SnowflakeError),
    #[error("Error inserting data: {0}")]
    Insert(#[source] SnowflakeError),
    #[error("Error querying data: {0}")]
    Query(#[source] SnowflakeError),
    #[error("Error verifying data: {0}")]
    Verify(#[source] SnowflakeError),
    #[error("Error verifying data: Row count mismatch! Inserted {expected}, found {actual}")]
    CountMismatch { expected: usize, actual: i128 },
}

/// Opens the one session a run uses.
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: Connection;

    async fn open(&self, private_key: PrivateKey) -> Result<Self::Connection, SnowflakeError>;
}

/// An open session, owned by the run until it is released.
#[async_trait]
pub trait Connection: Send + Sync {
    async fn query(&self, sql: &str, bindings: &[Binding]) -> Result<VecResult, SnowflakeError>;

    async fn release(self) -> Result<(), SnowflakeError>
    where
        Self: Sized;
}

/// Runs the whole test and prints its progress. The final banner is left
/// to the caller.
pub async fn run<C: Connector, W: Write>(
    config: &Config,
    connector: &C,
    key_path: &Path,
    reporter: &mut Reporter<W>,
) -> Result<(), StepError> {
    reporter.header("ETL Service Account Connection Test");

    reporter.step(1, "Loading RSA private key...");
    let private_key = check(reporter, PrivateKey::load(key_path).map_err(StepError::Key))?;
    reporter.ok("Private key loaded successfully");

    reporter.step(2, "Connecting to Snowflake...");
    let connection = check(reporter, connector.open(private_key).await.map_err(StepError::Connection))?;
    reporter.ok("Connected successfully!");
    reporter.detail(&format!("Account: {}", config.account));
    reporter.detail(&format!("User: {}", config.user));
    reporter.detail(&format!("Role: {}", config.role));

    let outcome = exercise(&connection, reporter).await;

    if let Err(e) = connection.release().await {
        log::warn!("Could not close session cleanly: {e}");
    }
    reporter.step(8, "Connection closed");

    outcome
}

async fn exercise<C: Connection, W: Write>(connection: &C, reporter: &mut Reporter<W>) -> Result<(), StepError> {
    reporter.step(3, "Creating test table...");
    check(reporter, connection.query(CREATE_TABLE_SQL, &[]).await.map_err(StepError::CreateTable))?;
    reporter.ok(&format!("Table '{TEST_TABLE}' created successfully"));

    reporter.step(4, "Inserting test data...");
    for record in TEST_RECORDS.iter() {
        let res = connection.query(INSERT_SQL, &record.bindings()).await;
        check(reporter, res.map_err(StepError::Insert))?;
    }
    reporter.ok(&format!("Inserted {} test records", TEST_RECORDS.len()));

    reporter.step(5, "Querying test data...");
    let res = check(reporter, connection.query(SELECT_SQL, &[]).await.map_err(StepError::Query))?;
    reporter.ok(&format!("Query successful! Retrieved {} records", res.rowset.len()));
    let sample: Vec<SampleRow> = res.rowset.iter().map(|row| sample_row(row)).collect();
    reporter.sample(&sample);

    reporter.step(6, "Verifying data integrity...");
    let res = check(reporter, connection.query(COUNT_SQL, &[]).await.map_err(StepError::Verify))?;
    let count = check(reporter, row_count(&res).map_err(StepError::Verify))?;
    reporter.ok(&format!("Total records in table: {count}"));
    if count != TEST_RECORDS.len() as i128 {
        let err = StepError::CountMismatch { expected: TEST_RECORDS.len(), actual: count };
        return check(reporter, Err(err));
    }

    reporter.step(7, "Cleaning up test table...");
    match connection.query(DROP_SQL, &[]).await {
        Ok(_) => reporter.ok("Test table dropped"),
        Err(e) => {
            log::warn!("Dropping {TEST_TABLE} failed: {e:?}");
            reporter.warn(&format!("Could not drop test table: {e}"));
        }
    }

    Ok(())
}

/// Prints a failed step at its boundary and passes the result through.
fn check<T, W: Write>(reporter: &mut Reporter<W>, res: Result<T, StepError>) -> Result<T, StepError> {
    res.map_err(|e| {
        log::debug!("Step failed: {e:?}");
        reporter.fail(&e);
        e
    })
}

fn sample_row(row: &[Value]) -> SampleRow {
    let cell = |i: usize| row.get(i).map(Value::to_string).unwrap_or_default();
    SampleRow {
        id: cell(0),
        name: cell(1),
        description: cell(3),
    }
}

fn row_count(res: &VecResult) -> Result<i128, SnowflakeError> {
    res.rowset
        .first()
        .and_then(|row| row.first())
        .and_then(Value::as_integer)
        .ok_or_else(|| SnowflakeError::new_deserialization_error(anyhow!("COUNT(*) returned no integer value")))
}
