//! Decoding of inbound metric requests.
//!
//! A request body is either one metric mapping or an array of them. Each
//! element must carry `host`, `key`, `value` and `clock`. The staging id is
//! always generated here; an id supplied by the client is ignored.

use serde_json::{Map, Value};

use crate::error::{MetricStageError, Result};

use super::{MetricSource, MetricValue, SystemSource, UniqueMetric};

impl UniqueMetric {
    /// Decode a request body into records, preserving element order.
    pub fn from_request(data: &Value) -> Result<Vec<UniqueMetric>> {
        Self::from_request_with(&SystemSource, data)
    }

    pub fn from_request_with<S: MetricSource + ?Sized>(
        source: &S,
        data: &Value,
    ) -> Result<Vec<UniqueMetric>> {
        let elements = match data {
            Value::Array(items) => items.as_slice(),
            single => std::slice::from_ref(single),
        };

        let out = elements
            .iter()
            .enumerate()
            .map(|(idx, el)| decode_element(source, idx, el))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(count = out.len(), "decoded metric request");
        Ok(out)
    }
}

fn decode_element<S: MetricSource + ?Sized>(
    source: &S,
    idx: usize,
    el: &Value,
) -> Result<UniqueMetric> {
    let obj = el.as_object().ok_or_else(|| {
        MetricStageError::BadRequest(format!("metric #{idx} must be a mapping"))
    })?;

    let host = required_str(obj, "host")?;
    let key = required_str(obj, "key")?;

    let value: MetricValue = serde_json::from_value(required(obj, "value")?.clone())
        .map_err(|e| MetricStageError::InvalidData(format!("value: {e}")))?;

    let clock = required(obj, "clock")?
        .as_i64()
        .ok_or_else(|| MetricStageError::InvalidData("clock must be an integer".into()))?;

    Ok(UniqueMetric::new_with(
        source,
        host,
        key,
        value,
        Some(clock),
        None,
    ))
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value> {
    obj.get(field)
        .ok_or_else(|| MetricStageError::MissingField(field.to_string()))
}

fn required_str<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a str> {
    required(obj, field)?
        .as_str()
        .ok_or_else(|| MetricStageError::InvalidData(format!("{field} must be a string")))
}
