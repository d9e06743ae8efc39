use thiserror::Error;

/// Terminal failures for one query lifecycle.
///
/// Nothing here is retried beyond the backoff-governed polling loop itself;
/// every variant propagates as the failed outcome of the top-level call.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The service accepted the submission but returned no execution id.
    #[error("query submission returned no execution id")]
    Submission,

    /// The queued-phase backoff budget ran out before the query started.
    #[error("timed out waiting for query {execution_id} to start")]
    QueuedTimeout { execution_id: String },

    /// The running-phase backoff budget ran out before the query finished.
    #[error("timed out waiting for query {execution_id}")]
    RunningTimeout { execution_id: String },

    #[error("query {execution_id} failed")]
    Failed { execution_id: String },

    /// The service reported a state outside the documented enumeration.
    #[error("query {execution_id} has unexpected status {status:?}")]
    UnexpectedStatus {
        execution_id: String,
        status: String,
    },

    /// The query succeeded but the fetch returned no resultset.
    #[error("no resultset returned for query {execution_id}")]
    EmptyResult { execution_id: String },

    /// Transport or service-call failure bubbling out of the capability.
    #[error(transparent)]
    Service(#[from] anyhow::Error),
}
