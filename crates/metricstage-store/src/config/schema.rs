use std::path::PathBuf;

use serde::Deserialize;
use metricstage_core::error::{MetricStageError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageConfig {
    pub version: u32,

    pub store: StoreSection,
}

impl StageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricStageError::UnsupportedVersion);
        }

        self.store.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Staging directory; must exist, is not created.
    pub metrics_directory: PathBuf,
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.metrics_directory.as_os_str().is_empty() {
            return Err(MetricStageError::BadRequest(
                "store.metrics_directory must not be empty".into(),
            ));
        }
        Ok(())
    }
}
