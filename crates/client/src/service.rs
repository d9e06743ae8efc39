//! The remote query-service capability and its wire types.

use std::fmt;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Lifecycle state reported by the service for one query execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionState {
    Queued,
    Running,
    Succeeded,
    Failed,
    /// Any state outside the documented enumeration. Terminal: observing
    /// it fails the query with an unexpected-status error.
    Other(String),
}

impl From<&str> for ExecutionState {
    fn from(raw: &str) -> Self {
        match raw {
            "QUEUED" => Self::Queued,
            "RUNNING" => Self::Running,
            "SUCCEEDED" => Self::Succeeded,
            "FAILED" => Self::Failed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => f.write_str("QUEUED"),
            Self::Running => f.write_str("RUNNING"),
            Self::Succeeded => f.write_str("SUCCEEDED"),
            Self::Failed => f.write_str("FAILED"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

/// One poll observation: the classified state plus the raw status payload
/// exactly as the service returned it, kept for error observations.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub state: ExecutionState,
    pub raw: serde_json::Value,
}

impl StatusSnapshot {
    pub fn new(state: ExecutionState, raw: serde_json::Value) -> Self {
        Self { state, raw }
    }
}

/// Metadata for one result column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Service type tag, e.g. "varchar", "integer", "array".
    #[serde(rename = "type")]
    pub column_type: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
        }
    }
}

/// One result row. Every cell is a string as far as the wire is concerned,
/// and any cell may be null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub data: Vec<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMetadata {
    pub columns: Vec<ColumnInfo>,
}

/// Raw tabular output of a completed query. The service can omit the rows
/// and the metadata independently; both are modeled as optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultGrid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Row>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GridMetadata>,
}

/// Remote query-service capability: submit, poll, abort, fetch.
///
/// Implementations wrap a concrete transport; everything above this trait
/// stays transport-agnostic.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Submit a query for execution. Returns the execution id, or `None`
    /// when the service response carried no id.
    async fn submit(&self, work_group: &str, query: &str) -> Result<Option<String>>;

    /// Poll the current execution state.
    async fn status(&self, execution_id: &str) -> Result<StatusSnapshot>;

    /// Best-effort cancellation of an in-flight execution.
    async fn abort(&self, execution_id: &str) -> Result<()>;

    /// Fetch the result grid of a completed execution, or `None` when the
    /// service returned no resultset.
    async fn fetch_results(&self, execution_id: &str) -> Result<Option<ResultGrid>>;
}
