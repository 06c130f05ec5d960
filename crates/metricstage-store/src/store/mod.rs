//! Directory-backed metric store.
//!
//! Each staged metric is its own `<unique_id>.yml` file in the staging
//! directory. There is no index and no cache: reads rescan the directory.
//! Nothing here locks; one producer and one consumer are expected to share
//! a directory without writing the same ids.

pub mod document;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use metricstage_core::error::{MetricStageError, Result};
use metricstage_core::UniqueMetric;

use crate::config::StageConfig;

/// Extensions (lowercase) read back as metric documents.
const METRIC_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// A metric together with the file it was read from.
///
/// The path can differ from `metric_full_path(metric.filename())` when a
/// document was staged under another name (`x.yaml`, a renamed copy).
#[derive(Debug, Clone, PartialEq)]
pub struct StagedMetric {
    pub path: PathBuf,
    pub metric: UniqueMetric,
}

/// Manages a disk cache of metrics.
#[derive(Debug, Clone)]
pub struct MetricManager {
    metrics_directory: PathBuf,
}

impl MetricManager {
    /// The directory must already exist; it is never created here.
    pub fn new(metrics_directory: impl Into<PathBuf>) -> Self {
        Self {
            metrics_directory: metrics_directory.into(),
        }
    }

    pub fn from_config(cfg: &StageConfig) -> Self {
        Self::new(cfg.store.metrics_directory.clone())
    }

    pub fn metrics_directory(&self) -> &Path {
        &self.metrics_directory
    }

    /// Full path of a metric file inside the staging directory.
    pub fn metric_full_path(&self, filename: &str) -> PathBuf {
        self.metrics_directory.join(filename)
    }

    pub fn write_metric(&self, metric: &UniqueMetric) -> Result<()> {
        let path = self.metric_full_path(metric.filename());
        let doc = document::encode(metric)?;
        fs::write(&path, doc).map_err(|e| MetricStageError::io(&path, e))?;
        tracing::debug!(path = %path.display(), unique_id = %metric.unique_id(), "metric written");
        Ok(())
    }

    /// Write each metric to its own file, overwriting existing ones.
    ///
    /// Stops at the first failure; files already written stay on disk.
    pub fn write_metrics<'a, I>(&self, metrics: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a UniqueMetric>,
    {
        for metric in metrics {
            self.write_metric(metric)?;
        }
        Ok(())
    }

    /// Read every metric document in the staging directory.
    ///
    /// Only `.yml`/`.yaml` entries are considered (case-insensitive).
    /// A malformed document aborts the scan. Order follows the directory
    /// listing and is not stable across platforms.
    pub fn read_metrics(&self) -> Result<Vec<UniqueMetric>> {
        Ok(self
            .read_staged()?
            .into_iter()
            .map(|staged| staged.metric)
            .collect())
    }

    /// Like [`MetricManager::read_metrics`], keeping each source path.
    pub fn read_staged(&self) -> Result<Vec<StagedMetric>> {
        let dir = &self.metrics_directory;
        let entries = fs::read_dir(dir).map_err(|e| MetricStageError::io(dir, e))?;

        let mut staged = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MetricStageError::io(dir, e))?;
            let path = entry.path();

            if !is_metric_file(&path) {
                tracing::debug!(path = %path.display(), "skipping non-metric file");
                continue;
            }

            let text = fs::read_to_string(&path).map_err(|e| MetricStageError::io(&path, e))?;
            let metric = document::decode(&path, &text)?;
            staged.push(StagedMetric { path, metric });
        }

        tracing::debug!(dir = %dir.display(), count = staged.len(), "metrics read");
        Ok(staged)
    }

    pub fn remove_metric(&self, metric: &UniqueMetric) -> Result<()> {
        let path = self.metric_full_path(metric.filename());
        remove_file(&path)?;
        tracing::debug!(path = %path.display(), unique_id = %metric.unique_id(), "metric removed");
        Ok(())
    }

    /// Delete the file a staged metric was read from.
    pub fn remove_staged(&self, staged: &StagedMetric) -> Result<()> {
        remove_file(&staged.path)?;
        tracing::debug!(
            path = %staged.path.display(),
            unique_id = %staged.metric.unique_id(),
            "metric removed"
        );
        Ok(())
    }

    /// Delete the file of each metric. A file that is already gone is an
    /// error; removals before it stay committed.
    pub fn remove_metrics<'a, I>(&self, metrics: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a UniqueMetric>,
    {
        for metric in metrics {
            self.remove_metric(metric)?;
        }
        Ok(())
    }

    /// Only zabbix metrics (everything but heartbeats), in input order.
    pub fn filter_zbx_metrics<'a, I>(metrics: I) -> Vec<&'a UniqueMetric>
    where
        I: IntoIterator<Item = &'a UniqueMetric>,
    {
        metrics.into_iter().filter(|m| !m.is_heartbeat()).collect()
    }

    /// Only heartbeat metrics, in input order.
    pub fn filter_heartbeat_metrics<'a, I>(metrics: I) -> Vec<&'a UniqueMetric>
    where
        I: IntoIterator<Item = &'a UniqueMetric>,
    {
        metrics.into_iter().filter(|m| m.is_heartbeat()).collect()
    }
}

fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => MetricStageError::NotFound {
            path: path.to_path_buf(),
        },
        _ => MetricStageError::io(path, e),
    })
}

fn is_metric_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.trim().to_ascii_lowercase())
        .is_some_and(|ext| METRIC_EXTENSIONS.contains(&ext.as_str()))
}
