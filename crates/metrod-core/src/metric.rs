//! Ingest payload model.

use serde::{Deserialize, Serialize};

/// A single reported measurement.
///
/// Identity is by `name`; the store keeps only the latest value per name,
/// so a `Metric` carries no timestamp and no history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metric {
    /// Metric name (unique key).
    pub name: String,
    /// Optional kind tag (field name is `type` in JSON). Reserved for
    /// forward compatibility; carries no semantics today.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Latest scalar value.
    pub value: f64,
}
