//! Top-level facade crate for metricstage.
//!
//! Re-exports the record types and the directory-backed store so users can
//! depend on a single crate.

pub mod core {
    pub use metricstage_core::*;
}

pub mod store {
    pub use metricstage_store::*;
}

pub use metricstage_core::{MetricStageError, MetricValue, Result, UniqueMetric};
pub use metricstage_store::MetricManager;
