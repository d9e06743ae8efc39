//! Client helpers for a managed SQL-on-object-storage query service.
//!
//! Submits a query, polls it to completion on two independently budgeted
//! backoff schedules (queued, then running), aborts on timeout, fetches
//! the raw result grid, and parses the service's string-encoded grid into
//! typed records.
//!
//! The remote service is consumed through the [`service::QueryService`]
//! trait; everything here is transport-agnostic. The typical flow:
//!
//! ```ignore
//! let runner = QueryRunner::new(service, "analytics");
//! let grid = runner.run("SELECT date, value FROM readings").await?;
//! let records = parse_result_grid(&grid, &ParseOptions::new().skip(1));
//! ```

pub mod error;
pub mod monitor;
pub mod parse;
pub mod runner;
pub mod service;

pub use error::QueryError;
pub use monitor::ExecutionMonitor;
pub use parse::{parse_result_grid, CellValue, ParseOptions, TypedRecord};
pub use runner::QueryRunner;
pub use service::{
    ColumnInfo, ExecutionState, GridMetadata, QueryService, ResultGrid, Row, StatusSnapshot,
};
