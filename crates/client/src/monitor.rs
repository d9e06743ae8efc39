//! Two-phase polling state machine for one in-flight query.
//!
//! Phase 1 polls on the queued schedule while the service reports QUEUED;
//! phase 2 polls on an independent running schedule until a terminal state.
//! Exhausting either schedule aborts the execution best-effort and fails
//! with that phase's timeout error.

use tarn_common::backoff::BackoffSchedule;
use tracing::{debug, error, warn};

use crate::error::QueryError;
use crate::service::{ExecutionState, QueryService, StatusSnapshot};

pub struct ExecutionMonitor<'a> {
    service: &'a dyn QueryService,
    execution_id: &'a str,
}

impl<'a> ExecutionMonitor<'a> {
    pub fn new(service: &'a dyn QueryService, execution_id: &'a str) -> Self {
        Self {
            service,
            execution_id,
        }
    }

    /// Drive the execution to a terminal outcome, returning the final
    /// SUCCEEDED snapshot.
    pub async fn wait_for_completion(
        &self,
        queued: &mut dyn BackoffSchedule,
        running: &mut dyn BackoffSchedule,
    ) -> Result<StatusSnapshot, QueryError> {
        while let Some(delay) = queued.next_delay() {
            tokio::time::sleep(delay).await;
            let snapshot = self.poll().await?;
            match snapshot.state {
                ExecutionState::Queued => continue,
                ExecutionState::Succeeded => return Ok(snapshot),
                ExecutionState::Running => return self.wait_while_running(running).await,
                ExecutionState::Failed => return Err(self.failed(snapshot)),
                ExecutionState::Other(_) => return Err(self.unexpected(snapshot)),
            }
        }
        self.abort_best_effort().await;
        Err(QueryError::QueuedTimeout {
            execution_id: self.execution_id.to_string(),
        })
    }

    async fn wait_while_running(
        &self,
        running: &mut dyn BackoffSchedule,
    ) -> Result<StatusSnapshot, QueryError> {
        while let Some(delay) = running.next_delay() {
            tokio::time::sleep(delay).await;
            let snapshot = self.poll().await?;
            match snapshot.state {
                ExecutionState::Succeeded => return Ok(snapshot),
                ExecutionState::Failed => return Err(self.failed(snapshot)),
                ExecutionState::Other(_) => return Err(self.unexpected(snapshot)),
                // A QUEUED report after RUNNING is a service hiccup; keep polling.
                ExecutionState::Queued | ExecutionState::Running => continue,
            }
        }
        self.abort_best_effort().await;
        Err(QueryError::RunningTimeout {
            execution_id: self.execution_id.to_string(),
        })
    }

    async fn poll(&self) -> Result<StatusSnapshot, QueryError> {
        let snapshot = self.service.status(self.execution_id).await?;
        debug!(
            execution_id = self.execution_id,
            state = %snapshot.state,
            "polled execution state"
        );
        Ok(snapshot)
    }

    fn failed(&self, snapshot: StatusSnapshot) -> QueryError {
        error!(
            execution_id = self.execution_id,
            status = %snapshot.raw,
            "query failed"
        );
        QueryError::Failed {
            execution_id: self.execution_id.to_string(),
        }
    }

    fn unexpected(&self, snapshot: StatusSnapshot) -> QueryError {
        error!(
            execution_id = self.execution_id,
            status = %snapshot.raw,
            "unexpected execution state"
        );
        QueryError::UnexpectedStatus {
            execution_id: self.execution_id.to_string(),
            status: snapshot.state.to_string(),
        }
    }

    /// Abort failures are logged and swallowed so they never mask the
    /// timeout that triggered the cleanup.
    async fn abort_best_effort(&self) {
        if let Err(err) = self.service.abort(self.execution_id).await {
            warn!(
                execution_id = self.execution_id,
                error = %err,
                "abort after timeout failed"
            );
        }
    }
}
