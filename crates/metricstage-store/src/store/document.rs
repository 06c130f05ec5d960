//! On-disk metric document (YAML, block style).
//!
//! ```yaml
//! clock: 1446674234
//! filename: 3d7f2c0a9b8e4f1da6c5b4e3d2f1a0b9.yml
//! host: a.example.com
//! key: a.b.c
//! unique_id: 3d7f2c0a9b8e4f1da6c5b4e3d2f1a0b9
//! value: '10'
//! ```
//!
//! `filename` is written for humans and tooling; on read it is re-derived
//! from `unique_id`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use metricstage_core::error::{MetricStageError, Result};
use metricstage_core::{MetricValue, UniqueMetric};

const REQUIRED_FIELDS: [&str; 5] = ["host", "key", "value", "clock", "unique_id"];

#[derive(Debug, Serialize)]
struct DocumentRef<'a> {
    clock: i64,
    filename: &'a str,
    host: &'a str,
    key: &'a str,
    unique_id: &'a str,
    value: &'a MetricValue,
}

#[derive(Debug, Deserialize)]
struct Document {
    clock: i64,
    host: String,
    key: String,
    unique_id: String,
    value: MetricValue,
}

/// Render the full field set of `metric` as a YAML document.
pub fn encode(metric: &UniqueMetric) -> Result<String> {
    let doc = DocumentRef {
        clock: metric.clock(),
        filename: metric.filename(),
        host: metric.host(),
        key: metric.key(),
        unique_id: metric.unique_id(),
        value: metric.value(),
    };
    serde_yaml::to_string(&doc).map_err(|e| {
        MetricStageError::InvalidData(format!("encode {}: {e}", metric.unique_id()))
    })
}

/// Parse a metric document read from `path`.
///
/// `unique_id` is kept verbatim but must not contain path separators, since
/// it names the file the metric is later removed through.
pub fn decode(path: &Path, text: &str) -> Result<UniqueMetric> {
    let raw: serde_yaml::Value =
        serde_yaml::from_str(text).map_err(|e| MetricStageError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let map = raw.as_mapping().ok_or_else(|| {
        MetricStageError::InvalidData(format!("{}: document is not a mapping", path.display()))
    })?;
    for field in REQUIRED_FIELDS {
        if !map.contains_key(field) {
            return Err(MetricStageError::MissingField(format!(
                "{field} in {}",
                path.display()
            )));
        }
    }

    let doc: Document = serde_yaml::from_value(raw)
        .map_err(|e| MetricStageError::InvalidData(format!("{}: {e}", path.display())))?;

    if doc.unique_id.is_empty() || doc.unique_id.contains(['/', '\\']) {
        return Err(MetricStageError::InvalidData(format!(
            "{}: unique_id {:?} is not a plain file stem",
            path.display(),
            doc.unique_id
        )));
    }

    Ok(UniqueMetric::new(
        doc.host,
        doc.key,
        doc.value,
        Some(doc.clock),
        Some(doc.unique_id),
    ))
}
