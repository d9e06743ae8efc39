use serde::Deserialize;

// Default constants
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1000;
pub const DEFAULT_MAX_DELAY_MS: u64 = 5000;
/// Attempt budget while a query is queued (~2 minutes of waiting).
pub const DEFAULT_QUEUED_ATTEMPTS: u32 = 26;
/// Attempt budget while a query is running (~1 minute of waiting).
pub const DEFAULT_RUNNING_ATTEMPTS: u32 = 14;

/// Parameters for one bounded exponential backoff schedule.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct BackoffSettings {
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    pub max_attempts: u32,
}

impl BackoffSettings {
    /// Default schedule for the queued wait phase.
    pub fn queued() -> Self {
        Self {
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            max_attempts: DEFAULT_QUEUED_ATTEMPTS,
        }
    }

    /// Default schedule for the running wait phase.
    pub fn running() -> Self {
        Self {
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
            max_attempts: DEFAULT_RUNNING_ATTEMPTS,
        }
    }
}

fn default_initial_delay_ms() -> u64 {
    DEFAULT_INITIAL_DELAY_MS
}
fn default_max_delay_ms() -> u64 {
    DEFAULT_MAX_DELAY_MS
}

/// Settings for one query runner, loadable from a config file.
#[derive(Debug, Deserialize, Clone)]
pub struct QueryConfig {
    pub work_group: String,
    #[serde(default = "BackoffSettings::queued")]
    pub queued_backoff: BackoffSettings,
    #[serde(default = "BackoffSettings::running")]
    pub running_backoff: BackoffSettings,
}
