//! Staging config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use metricstage_core::error::{MetricStageError, Result};

pub use schema::{StageConfig, StoreSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<StageConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| MetricStageError::io(path, e))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<StageConfig> {
    let cfg: StageConfig = serde_yaml::from_str(s)
        .map_err(|e| MetricStageError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
