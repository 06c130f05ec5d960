//! Unique metric record.
//!
//! A `UniqueMetric` is a Zabbix item sample (`host`, `key`, `value`,
//! `clock`) plus the staging identity (`unique_id`, `filename`) that lets
//! it live as its own file in a staging directory. Identity is fixed at
//! construction; fields are read-only afterwards.

pub mod request;
pub mod source;
pub mod value;

use std::fmt;

use serde_json::{Map, Value};

pub use source::{MetricSource, SystemSource};
pub use value::{HeartbeatValue, MetricValue, NameList};

/// Reserved key marking a heartbeat record.
pub const HEARTBEAT_KEY: &str = "heartbeat";

/// Extension of staged metric files.
pub const METRIC_FILE_EXT: &str = "yml";

/// Staged filename for a unique id.
pub fn filename_for(unique_id: &str) -> String {
    format!("{unique_id}.{METRIC_FILE_EXT}")
}

/// The fields a telemetry sender consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample<'a> {
    pub host: &'a str,
    pub key: &'a str,
    pub value: &'a MetricValue,
    pub clock: i64,
}

/// One metric (or heartbeat) with a unique staging identity.
#[derive(Clone, PartialEq)]
pub struct UniqueMetric {
    host: String,
    key: String,
    value: MetricValue,
    clock: i64,
    unique_id: String,
    filename: String,
}

impl UniqueMetric {
    /// Build a record; `None` clock means now, `None` id means a fresh one.
    pub fn new(
        host: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<MetricValue>,
        clock: Option<i64>,
        unique_id: Option<String>,
    ) -> Self {
        Self::new_with(&SystemSource, host, key, value, clock, unique_id)
    }

    /// Like [`UniqueMetric::new`], resolving defaults through `source`.
    pub fn new_with<S: MetricSource + ?Sized>(
        source: &S,
        host: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<MetricValue>,
        clock: Option<i64>,
        unique_id: Option<String>,
    ) -> Self {
        let clock = clock.unwrap_or_else(|| source.now());
        let unique_id = unique_id.unwrap_or_else(|| source.unique_id());
        let filename = filename_for(&unique_id);

        Self {
            host: host.into(),
            key: key.into(),
            value: value.into(),
            clock,
            unique_id,
            filename,
        }
    }

    /// Build a heartbeat record for `host`.
    ///
    /// `templates` and `hostgroups` accept a list or a comma-separated
    /// string (`"t1,t2"`).
    pub fn heartbeat(
        host: impl Into<String>,
        templates: impl Into<NameList>,
        hostgroups: impl Into<NameList>,
        clock: Option<i64>,
        unique_id: Option<String>,
    ) -> Self {
        Self::heartbeat_with(&SystemSource, host, templates, hostgroups, clock, unique_id)
    }

    pub fn heartbeat_with<S: MetricSource + ?Sized>(
        source: &S,
        host: impl Into<String>,
        templates: impl Into<NameList>,
        hostgroups: impl Into<NameList>,
        clock: Option<i64>,
        unique_id: Option<String>,
    ) -> Self {
        let value = HeartbeatValue {
            hostgroups: hostgroups.into().into_names(),
            templates: templates.into().into_names(),
        };
        Self::new_with(source, host, HEARTBEAT_KEY, value, clock, unique_id)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &MetricValue {
        &self.value
    }

    pub fn clock(&self) -> i64 {
        self.clock
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn is_heartbeat(&self) -> bool {
        self.key == HEARTBEAT_KEY
    }

    /// Structured heartbeat payload, if this record carries one.
    pub fn heartbeat_value(&self) -> Option<&HeartbeatValue> {
        self.value.as_heartbeat()
    }

    /// Sender-facing projection (no staging fields).
    pub fn sample(&self) -> MetricSample<'_> {
        MetricSample {
            host: &self.host,
            key: &self.key,
            value: &self.value,
            clock: self.clock,
        }
    }

    /// Plain mapping of `host`, `key`, `value`, `clock`, `unique_id`.
    /// `filename` is derived and therefore left out.
    pub fn to_dict(&self) -> Value {
        let mut map = Map::new();
        map.insert("host".into(), Value::String(self.host.clone()));
        map.insert("key".into(), Value::String(self.key.clone()));
        map.insert("value".into(), self.value.to_json());
        map.insert("clock".into(), Value::Number(self.clock.into()));
        map.insert("unique_id".into(), Value::String(self.unique_id.clone()));
        Value::Object(map)
    }
}

impl fmt::Debug for UniqueMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UniqueMetric")
            .field(&self.host)
            .field(&self.key)
            .field(&self.value)
            .field(&self.clock)
            .field(&self.unique_id)
            .finish()
    }
}
