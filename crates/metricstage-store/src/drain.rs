//! Drain: forward staged metrics and unstage the ones that went through.
//!
//! Zabbix metrics are sent before heartbeats. A send failure is logged and
//! the record stays staged for the next run; read and remove failures abort.
//! Removal goes through the path each record was read from, so documents
//! staged under another name are unstaged too.

use metricstage_core::error::Result;
use metricstage_core::MetricSample;

use crate::store::{MetricManager, StagedMetric};

/// Transmits one sample to the monitoring backend.
pub trait MetricSender {
    fn send(&self, sample: MetricSample<'_>) -> Result<()>;
}

/// Outcome of one drain pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrainReport {
    pub sent: usize,
    pub failed: usize,
}

pub fn drain<S: MetricSender + ?Sized>(store: &MetricManager, sender: &S) -> Result<DrainReport> {
    let staged = store.read_staged()?;
    let (heartbeats, zbx): (Vec<&StagedMetric>, Vec<&StagedMetric>) =
        staged.iter().partition(|s| s.metric.is_heartbeat());

    let mut report = DrainReport::default();
    for entry in zbx.into_iter().chain(heartbeats) {
        let metric = &entry.metric;
        match sender.send(metric.sample()) {
            Ok(()) => {
                store.remove_staged(entry)?;
                report.sent += 1;
            }
            Err(e) => {
                tracing::warn!(
                    unique_id = %metric.unique_id(),
                    host = %metric.host(),
                    key = %metric.key(),
                    error = %e,
                    "send failed, metric stays staged"
                );
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        dir = %store.metrics_directory().display(),
        sent = report.sent,
        failed = report.failed,
        "drain finished"
    );
    Ok(report)
}
