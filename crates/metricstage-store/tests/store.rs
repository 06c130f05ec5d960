//! Metric store tests against a temporary staging directory.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use metricstage_core::{HeartbeatValue, MetricValue, UniqueMetric};
use metricstage_store::{MetricManager, StagedMetric};

fn identity(m: &UniqueMetric) -> String {
    format!("{m:?}")
}

fn identities<'a>(ms: impl IntoIterator<Item = &'a UniqueMetric>) -> HashSet<String> {
    ms.into_iter().map(identity).collect()
}

fn copy_vector(dir: &Path, name: &str) {
    fs::copy(format!("tests/vectors/{name}"), dir.join(name)).unwrap();
}

#[test]
fn full_path_joins_directory() {
    let mm = MetricManager::new("/tmp/metrics");
    assert_eq!(mm.metric_full_path("abc.yml"), Path::new("/tmp/metrics/abc.yml"));
}

#[test]
fn write_then_read_returns_same_set() {
    let tmp = TempDir::new().unwrap();
    let mm = MetricManager::new(tmp.path());

    let r1 = UniqueMetric::new("a.example.com", "a.b.c", "10", None, None);
    let r2 = UniqueMetric::heartbeat("a.example.com", ["host template"], ["default"], None, None);
    let r3 = UniqueMetric::new("b.example.com", "load.avg", 0.25, Some(1446674234), None);
    mm.write_metrics([&r1, &r2, &r3]).unwrap();

    let read = mm.read_metrics().unwrap();
    assert_eq!(read.len(), 3);
    assert_eq!(identities(&read), identities([&r1, &r2, &r3]));

    for m in &read {
        assert_eq!(m.filename(), format!("{}.yml", m.unique_id()));
    }
}

#[test]
fn write_creates_one_file_per_metric() {
    let tmp = TempDir::new().unwrap();
    let mm = MetricManager::new(tmp.path());

    let r1 = UniqueMetric::new("h", "k", 1i64, None, None);
    mm.write_metric(&r1).unwrap();

    let path = tmp.path().join(r1.filename());
    let doc = fs::read_to_string(&path).unwrap();
    assert!(doc.contains(&format!("unique_id: {}", r1.unique_id())));
    assert!(doc.contains(&format!("filename: {}", r1.filename())));
    assert!(doc.contains("host: h"));
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
}

#[test]
fn heartbeat_is_written_block_style() {
    let tmp = TempDir::new().unwrap();
    let mm = MetricManager::new(tmp.path());

    let hb = UniqueMetric::heartbeat("h", "t1,t2", "g1", Some(1), None);
    mm.write_metric(&hb).unwrap();

    let doc = fs::read_to_string(tmp.path().join(hb.filename())).unwrap();
    assert!(doc.contains("hostgroups:\n"));
    assert!(doc.contains("- t2"));
    assert!(!doc.contains('{'));
}

#[test]
fn rewrite_overwrites_existing_file() {
    let tmp = TempDir::new().unwrap();
    let mm = MetricManager::new(tmp.path());

    let id = "0123456789abcdef0123456789abcdef".to_string();
    let first = UniqueMetric::new("h", "k", "first", Some(1), Some(id.clone()));
    let second = UniqueMetric::new("h", "k", "second", Some(2), Some(id));
    mm.write_metric(&first).unwrap();
    mm.write_metric(&second).unwrap();

    let read = mm.read_metrics().unwrap();
    assert_eq!(read, vec![second]);
}

#[test]
fn write_into_missing_directory_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let mm = MetricManager::new(tmp.path().join("missing"));

    let err = mm
        .write_metric(&UniqueMetric::new("h", "k", "v", None, None))
        .expect_err("must fail");
    assert_eq!(err.kind().as_str(), "IO");
}

#[test]
fn read_missing_directory_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let mm = MetricManager::new(tmp.path().join("missing"));

    let err = mm.read_metrics().expect_err("must fail");
    assert_eq!(err.kind().as_str(), "IO");
}

#[test]
fn read_skips_non_yaml_files() {
    let tmp = TempDir::new().unwrap();
    let mm = MetricManager::new(tmp.path());

    let r1 = UniqueMetric::new("h", "k", "v", None, None);
    mm.write_metric(&r1).unwrap();
    fs::write(tmp.path().join("notes.txt"), "not: a metric").unwrap();
    fs::write(tmp.path().join("README"), "no extension").unwrap();

    let read = mm.read_metrics().unwrap();
    assert_eq!(read, vec![r1]);
}

#[test]
fn read_accepts_yaml_extension_any_case() {
    let tmp = TempDir::new().unwrap();
    let mm = MetricManager::new(tmp.path());

    let scalar = fs::read_to_string("tests/vectors/metric_scalar.yml").unwrap();
    let heartbeat = fs::read_to_string("tests/vectors/metric_heartbeat.yml").unwrap();
    fs::write(tmp.path().join("one.YAML"), scalar).unwrap();
    fs::write(tmp.path().join("two.Yml"), heartbeat).unwrap();

    assert_eq!(mm.read_metrics().unwrap().len(), 2);
}

#[test]
fn read_keeps_stored_identity() {
    let tmp = TempDir::new().unwrap();
    copy_vector(tmp.path(), "metric_scalar.yml");
    copy_vector(tmp.path(), "metric_heartbeat.yml");
    let mm = MetricManager::new(tmp.path());

    let mut read = mm.read_metrics().unwrap();
    read.sort_by_key(|m| m.clock());

    let scalar = &read[0];
    assert_eq!(scalar.host(), "a.example.com");
    assert_eq!(scalar.key(), "a.b.c");
    assert_eq!(scalar.value(), &MetricValue::Text("10".into()));
    assert_eq!(scalar.clock(), 1446674234);
    assert_eq!(scalar.unique_id(), "9b1f3c6e2a7d4e0f8c5b1a2d3e4f5a6b");
    assert_eq!(scalar.filename(), "9b1f3c6e2a7d4e0f8c5b1a2d3e4f5a6b.yml");

    let hb = &read[1];
    assert!(hb.is_heartbeat());
    assert_eq!(
        hb.heartbeat_value(),
        Some(&HeartbeatValue {
            hostgroups: vec!["default".into()],
            templates: vec!["host template".into()],
        })
    );
}

#[test]
fn malformed_document_aborts_read() {
    let tmp = TempDir::new().unwrap();
    copy_vector(tmp.path(), "metric_scalar.yml");
    copy_vector(tmp.path(), "metric_malformed.yml");
    let mm = MetricManager::new(tmp.path());

    let err = mm.read_metrics().expect_err("must fail");
    assert_eq!(err.kind().as_str(), "PARSE");
}

#[test]
fn missing_field_aborts_read() {
    let tmp = TempDir::new().unwrap();
    copy_vector(tmp.path(), "metric_missing_clock.yml");
    let mm = MetricManager::new(tmp.path());

    let err = mm.read_metrics().expect_err("must fail");
    assert_eq!(err.kind().as_str(), "MISSING_FIELD");
    assert!(err.to_string().contains("clock"));
}

#[test]
fn wrong_typed_field_aborts_read() {
    let tmp = TempDir::new().unwrap();
    copy_vector(tmp.path(), "metric_bad_clock.yml");
    let mm = MetricManager::new(tmp.path());

    let err = mm.read_metrics().expect_err("must fail");
    assert_eq!(err.kind().as_str(), "INVALID_DATA");
}

#[test]
fn remove_deletes_only_that_metric() {
    let tmp = TempDir::new().unwrap();
    let mm = MetricManager::new(tmp.path());

    let r1 = UniqueMetric::new("h", "k", "1", None, None);
    let r2 = UniqueMetric::new("h", "k", "2", None, None);
    mm.write_metrics([&r1, &r2]).unwrap();

    mm.remove_metric(&r1).unwrap();
    assert!(!tmp.path().join(r1.filename()).exists());

    let read = mm.read_metrics().unwrap();
    assert_eq!(read, vec![r2.clone()]);

    mm.remove_metrics(&read).unwrap();
    assert!(mm.read_metrics().unwrap().is_empty());
}

#[test]
fn remove_unwritten_metric_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let mm = MetricManager::new(tmp.path());

    let err = mm
        .remove_metric(&UniqueMetric::new("h", "k", "v", None, None))
        .expect_err("must fail");
    assert_eq!(err.kind().as_str(), "NOT_FOUND");
}

#[test]
fn remove_twice_fails_second_time() {
    let tmp = TempDir::new().unwrap();
    let mm = MetricManager::new(tmp.path());

    let r1 = UniqueMetric::new("h", "k", "v", None, None);
    let r2 = UniqueMetric::new("h", "k", "w", None, None);
    mm.write_metrics([&r1, &r2]).unwrap();
    mm.remove_metric(&r1).unwrap();

    // r1 fails; r2 comes after it and is left alone.
    let err = mm.remove_metrics([&r1, &r2]).expect_err("must fail");
    assert_eq!(err.kind().as_str(), "NOT_FOUND");
    assert!(tmp.path().join(r2.filename()).exists());
}

#[test]
fn filters_partition_in_order() {
    let metrics = vec![
        UniqueMetric::new("h", "a", "1", Some(1), None),
        UniqueMetric::heartbeat("h", "t", "g", Some(2), None),
        UniqueMetric::new("h", "b", "2", Some(3), None),
        UniqueMetric::heartbeat("i", "t", "g", Some(4), None),
        UniqueMetric::new("h", "c", "3", Some(5), None),
    ];

    let zbx = MetricManager::filter_zbx_metrics(&metrics);
    let hb = MetricManager::filter_heartbeat_metrics(&metrics);

    assert_eq!(zbx.iter().map(|m| m.clock()).collect::<Vec<_>>(), vec![1, 3, 5]);
    assert_eq!(hb.iter().map(|m| m.clock()).collect::<Vec<_>>(), vec![2, 4]);

    let mut union = identities(zbx.iter().copied());
    let hb_ids = identities(hb.iter().copied());
    assert!(union.is_disjoint(&hb_ids));
    union.extend(hb_ids);
    assert_eq!(union, identities(&metrics));
}

#[test]
fn filters_on_empty_input() {
    let metrics: Vec<UniqueMetric> = Vec::new();
    assert!(MetricManager::filter_zbx_metrics(&metrics).is_empty());
    assert!(MetricManager::filter_heartbeat_metrics(&metrics).is_empty());
}

#[test]
fn request_metrics_stage_and_read_back() {
    let tmp = TempDir::new().unwrap();
    let mm = MetricManager::new(tmp.path());

    let body = serde_json::json!([
        { "host": "a.example.com", "key": "a.b.c", "value": 10, "clock": 1446674234 },
        { "host": "a.example.com", "key": "a.b.d", "value": "up", "clock": 1446674235 }
    ]);
    let metrics = UniqueMetric::from_request(&body).unwrap();
    mm.write_metrics(&metrics).unwrap();

    assert_eq!(identities(&mm.read_metrics().unwrap()), identities(&metrics));
}

#[test]
fn read_staged_keeps_source_path() {
    let tmp = TempDir::new().unwrap();
    copy_vector(tmp.path(), "staged_renamed.yaml");
    let mm = MetricManager::new(tmp.path());

    let staged = mm.read_staged().unwrap();
    assert_eq!(staged.len(), 1);
    let StagedMetric { path, metric } = &staged[0];
    assert_eq!(path, &tmp.path().join("staged_renamed.yaml"));
    assert_eq!(metric.filename(), "0123456789abcdef0123456789abcdef.yml");

    mm.remove_staged(&staged[0]).unwrap();
    assert!(mm.read_metrics().unwrap().is_empty());
}

#[test]
fn unique_id_with_path_separator_is_rejected() {
    let tmp = TempDir::new().unwrap();
    copy_vector(tmp.path(), "metric_path_id.yml");
    let mm = MetricManager::new(tmp.path());

    let err = mm.read_metrics().expect_err("must fail");
    assert_eq!(err.kind().as_str(), "INVALID_DATA");
}

#[test]
fn directory_with_yaml_name_is_io_error() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("nested.yml")).unwrap();
    let mm = MetricManager::new(tmp.path());

    let err = mm.read_metrics().expect_err("must fail");
    assert_eq!(err.kind().as_str(), "IO");
}

#[test]
fn large_unsigned_value_round_trips() {
    let tmp = TempDir::new().unwrap();
    let mm = MetricManager::new(tmp.path());

    let m = UniqueMetric::new("h", "net.if.in.bytes", u64::MAX, Some(1), None);
    mm.write_metric(&m).unwrap();

    let read = mm.read_metrics().unwrap();
    assert_eq!(read, vec![m]);
    assert_eq!(read[0].value(), &MetricValue::UInt(u64::MAX));
}
