//! Metric payload shape tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use metrod_core::Metric;

#[test]
fn parse_metric_min() {
    let m: Metric = serde_json::from_str(r#"{"name":"cpu","value":42.5}"#).unwrap();
    assert_eq!(m.name, "cpu");
    assert_eq!(m.value, 42.5);
    assert!(m.kind.is_none());
}

#[test]
fn parse_metric_with_type_tag() {
    let m: Metric = serde_json::from_str(r#"{"name":"cpu","type":"gauge","value":0.0}"#).unwrap();
    assert_eq!(m.kind.as_deref(), Some("gauge"));
}

#[test]
fn integer_values_parse_as_floats() {
    let m: Metric = serde_json::from_str(r#"{"name":"requests","value":7}"#).unwrap();
    assert_eq!(m.value, 7.0);
}

#[test]
fn unknown_fields_rejected() {
    let res: Result<Metric, _> =
        serde_json::from_str(r#"{"name":"cpu","value":1.0,"extra":true}"#);
    assert!(res.is_err());
}

#[test]
fn batch_parses_in_order() {
    let batch: Vec<Metric> =
        serde_json::from_str(r#"[{"name":"cpu","value":42.5},{"name":"memory","value":75.0}]"#)
            .unwrap();
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].name, "cpu");
    assert_eq!(batch[1].name, "memory");
}
