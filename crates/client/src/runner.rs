//! Top-level query orchestration.

use tarn_common::backoff::{BackoffSchedule, ExponentialBackoff};
use tarn_common::config::{BackoffSettings, QueryConfig};
use tracing::{debug, error};

use crate::error::QueryError;
use crate::monitor::ExecutionMonitor;
use crate::service::{QueryService, ResultGrid};

/// Runs one query at a time against the remote service: submit, wait to a
/// terminal outcome, fetch the raw grid.
///
/// Parsing the grid into typed records is the caller's composable next
/// step via [`crate::parse::parse_result_grid`]. Independent runner
/// instances do not interact; each `run` call owns its execution id and
/// backoff state exclusively.
pub struct QueryRunner<S> {
    service: S,
    work_group: String,
    queued_backoff: BackoffSettings,
    running_backoff: BackoffSettings,
}

impl<S: QueryService> QueryRunner<S> {
    pub fn new(service: S, work_group: impl Into<String>) -> Self {
        Self {
            service,
            work_group: work_group.into(),
            queued_backoff: BackoffSettings::queued(),
            running_backoff: BackoffSettings::running(),
        }
    }

    pub fn from_config(service: S, config: &QueryConfig) -> Self {
        Self {
            service,
            work_group: config.work_group.clone(),
            queued_backoff: config.queued_backoff,
            running_backoff: config.running_backoff,
        }
    }

    /// Replace the queued-phase schedule settings.
    pub fn with_queued_backoff(mut self, settings: BackoffSettings) -> Self {
        self.queued_backoff = settings;
        self
    }

    /// Replace the running-phase schedule settings.
    pub fn with_running_backoff(mut self, settings: BackoffSettings) -> Self {
        self.running_backoff = settings;
        self
    }

    /// Execute `query` and return the raw result grid.
    pub async fn run(&self, query: &str) -> Result<ResultGrid, QueryError> {
        let mut queued = ExponentialBackoff::new(self.queued_backoff);
        let mut running = ExponentialBackoff::new(self.running_backoff);
        self.run_with_schedules(query, &mut queued, &mut running)
            .await
    }

    /// Execute `query` with caller-supplied polling schedules.
    pub async fn run_with_schedules(
        &self,
        query: &str,
        queued: &mut dyn BackoffSchedule,
        running: &mut dyn BackoffSchedule,
    ) -> Result<ResultGrid, QueryError> {
        debug!(
            work_group = %self.work_group,
            query = query.trim(),
            "submitting query"
        );
        let execution_id = self
            .service
            .submit(&self.work_group, query)
            .await?
            .filter(|id| !id.is_empty())
            .ok_or(QueryError::Submission)?;
        debug!(execution_id = %execution_id, "query accepted");

        ExecutionMonitor::new(&self.service, &execution_id)
            .wait_for_completion(queued, running)
            .await?;

        match self.service.fetch_results(&execution_id).await? {
            Some(grid) if grid.rows.is_some() => {
                let row_count = grid.rows.as_ref().map(Vec::len).unwrap_or(0);
                debug!(execution_id = %execution_id, rows = row_count, "resultset fetched");
                Ok(grid)
            }
            _ => {
                error!(execution_id = %execution_id, "no resultset returned");
                Err(QueryError::EmptyResult { execution_id })
            }
        }
    }

    /// Access the underlying service capability.
    pub fn service(&self) -> &S {
        &self.service
    }
}
