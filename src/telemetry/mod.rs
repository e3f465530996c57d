// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Logging and metrics.
//!
//! - **Tracing**: structured events and spans, written to stderr
//! - **Metrics**: upstream latency, handler outcomes and message counts
//!
//! # Usage
//!
//! ```rust,ignore
//! use bible_mcp::telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(&TelemetryConfig::from_flags(verbose, debug))?;
//! ```
//!
//! Debug events and metric recording sit behind the `telemetry` feature
//! (on by default).

mod init;
pub mod metrics;

pub use init::{init_telemetry, TelemetryConfig, TelemetryGuard};
pub use metrics::{HandlerMetrics, Metrics, MetricsSnapshot, OperationMetrics, GLOBAL_METRICS};
