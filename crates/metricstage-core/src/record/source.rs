//! Clock and identity sources used when a record omits `clock`/`unique_id`.

use uuid::Uuid;

/// Supplies defaults for record construction.
///
/// Production code uses [`SystemSource`]; tests can inject a fixed clock
/// or a deterministic id sequence.
pub trait MetricSource {
    /// Current time as UTC Unix seconds.
    fn now(&self) -> i64;
    /// Fresh 32-char lowercase hex id.
    fn unique_id(&self) -> String;
}

/// Wall clock + random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSource;

impl MetricSource for SystemSource {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn unique_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}
