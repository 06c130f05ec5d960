//! metricstage core: the unique metric record, its value model, and the
//! shared error type.
//!
//! This crate carries no filesystem access. It defines what a staged
//! metric is (a Zabbix item sample plus a unique staging identity) and how
//! inbound requests decode into records. The directory-backed store lives
//! in `metricstage-store`.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed input surfaces as `MetricStageError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod record;

/// Shared result type.
pub use error::{ErrorKind, MetricStageError, Result};
pub use record::{
    filename_for, HeartbeatValue, MetricSample, MetricSource, MetricValue, NameList,
    SystemSource, UniqueMetric, HEARTBEAT_KEY, METRIC_FILE_EXT,
};
