//! metricstage store library entry.
//!
//! Wires the directory-backed metric store, its YAML document codec, the
//! strict config loader, and the drain loop. Consumed by the `metricstage`
//! binary and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod drain;
pub mod store;

pub use drain::{drain, DrainReport, MetricSender};
pub use store::{MetricManager, StagedMetric};
