//! metricstage: list the metrics staged in a directory.
//!
//! Usage: `metricstage [CONFIG]` (default `metricstage.yaml`).
//! Read-only; zabbix metrics are printed first, then heartbeats.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use metricstage_core::Result;
use metricstage_store::{config, MetricManager};

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "metricstage.yaml".to_string());

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(config = %path, kind = e.kind().as_str(), error = %e, "metricstage failed");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str) -> Result<()> {
    let cfg = config::load_from_file(path)?;
    let store = MetricManager::from_config(&cfg);

    let staged = store.read_metrics()?;
    let zbx = MetricManager::filter_zbx_metrics(&staged);
    let heartbeats = MetricManager::filter_heartbeat_metrics(&staged);

    tracing::info!(
        dir = %store.metrics_directory().display(),
        zbx = zbx.len(),
        heartbeats = heartbeats.len(),
        "staged metrics"
    );

    for metric in zbx.into_iter().chain(heartbeats) {
        println!("{metric:?}");
    }
    Ok(())
}
