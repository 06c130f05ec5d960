//! Metric value model.
//!
//! A value is either a scalar (what Zabbix stores for an item) or the
//! heartbeat mapping describing a host's hostgroup/template membership.
//! Serialized untagged so the on-disk document carries the bare value.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Value carried by a metric record.
///
/// Integers above `i64::MAX` land in `UInt` rather than `Float`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Structured heartbeat payload.
    Heartbeat(HeartbeatValue),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

/// Heartbeat payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeartbeatValue {
    pub hostgroups: Vec<String>,
    pub templates: Vec<String>,
}

impl MetricValue {
    /// Plain JSON rendering (infallible; non-finite floats become `null`).
    pub fn to_json(&self) -> Value {
        match self {
            MetricValue::Heartbeat(hb) => {
                let mut map = Map::new();
                map.insert("hostgroups".into(), string_array(&hb.hostgroups));
                map.insert("templates".into(), string_array(&hb.templates));
                Value::Object(map)
            }
            MetricValue::Bool(b) => Value::Bool(*b),
            MetricValue::Int(i) => Value::Number((*i).into()),
            MetricValue::UInt(u) => Value::Number((*u).into()),
            MetricValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            MetricValue::Text(s) => Value::String(s.clone()),
        }
    }

    pub fn as_heartbeat(&self) -> Option<&HeartbeatValue> {
        match self {
            MetricValue::Heartbeat(hb) => Some(hb),
            _ => None,
        }
    }
}

/// Bare value, without the variant name: `"10"`, `42`,
/// `{"hostgroups": [..], "templates": [..]}`.
impl fmt::Debug for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Heartbeat(hb) => f
                .debug_map()
                .entry(&"hostgroups", &hb.hostgroups)
                .entry(&"templates", &hb.templates)
                .finish(),
            MetricValue::Bool(b) => fmt::Debug::fmt(b, f),
            MetricValue::Int(i) => fmt::Debug::fmt(i, f),
            MetricValue::UInt(u) => fmt::Debug::fmt(u, f),
            MetricValue::Float(x) => fmt::Debug::fmt(x, f),
            MetricValue::Text(s) => fmt::Debug::fmt(s, f),
        }
    }
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Text(v)
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Int(v)
    }
}

impl From<i32> for MetricValue {
    fn from(v: i32) -> Self {
        MetricValue::Int(v.into())
    }
}

impl From<u64> for MetricValue {
    fn from(v: u64) -> Self {
        MetricValue::UInt(v)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

impl From<bool> for MetricValue {
    fn from(v: bool) -> Self {
        MetricValue::Bool(v)
    }
}

impl From<HeartbeatValue> for MetricValue {
    fn from(v: HeartbeatValue) -> Self {
        MetricValue::Heartbeat(v)
    }
}

/// Hostgroup or template names, given either as a list or as one
/// comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameList {
    /// Split on `,` only; surrounding whitespace is kept.
    Joined(String),
    List(Vec<String>),
}

impl NameList {
    pub fn into_names(self) -> Vec<String> {
        match self {
            NameList::Joined(s) => s.split(',').map(str::to_string).collect(),
            NameList::List(v) => v,
        }
    }
}

impl From<&str> for NameList {
    fn from(v: &str) -> Self {
        NameList::Joined(v.to_string())
    }
}

impl From<String> for NameList {
    fn from(v: String) -> Self {
        NameList::Joined(v)
    }
}

impl From<Vec<String>> for NameList {
    fn from(v: Vec<String>) -> Self {
        NameList::List(v)
    }
}

impl From<Vec<&str>> for NameList {
    fn from(v: Vec<&str>) -> Self {
        NameList::List(v.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for NameList {
    fn from(v: &[&str]) -> Self {
        NameList::List(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for NameList {
    fn from(v: [&str; N]) -> Self {
        NameList::List(v.iter().map(|s| s.to_string()).collect())
    }
}
