//! Shared building blocks for the Tarn query helpers.
//!
//! - **Backoff**: bounded exponential polling schedules (`backoff`).
//! - **Configuration**: strongly typed settings with serde defaults (`config`).
//! - **Telemetry**: `tracing` subscriber setup (`telemetry`).
pub mod backoff;
pub mod config;
pub mod telemetry;
