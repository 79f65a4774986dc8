//! Ranking of aggregate distributions.

use cdb_api::models::{AggregateField, AggregatePayload, CodeNames};
use cdb_utils::format::format_percent;

/// One category of a ranked distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// Key as sent by the backend.
    pub key: String,
    /// Text shown on the chart; the key unless a display name was resolved.
    pub label: String,
    pub value: u64,
}

/// Entries sorted by count, highest first. Ties keep payload order.
pub fn rank(payload: &AggregatePayload) -> Vec<RankedEntry> {
    let mut ranked: Vec<RankedEntry> = payload
        .entries
        .iter()
        .map(|(key, value)| RankedEntry {
            key: key.clone(),
            label: key.clone(),
            value: *value,
        })
        .collect();
    ranked.sort_by(|a, b| b.value.cmp(&a.value));
    ranked
}

/// Whether the keys of `field` are vocabulary codes needing a name lookup.
pub fn is_coded_field(field: &str) -> bool {
    field
        .parse::<AggregateField>()
        .map(|f| f.is_coded())
        .unwrap_or(false)
}

/// Replace labels with resolved names; unresolved codes keep the raw key.
pub fn apply_names(entries: &mut [RankedEntry], names: &CodeNames) {
    for entry in entries.iter_mut() {
        if let Some(name) = names.get(&entry.key) {
            entry.label = name.to_string();
        }
    }
}

/// Each value as a share of the total, e.g. `"52.0 %"`.
pub fn percent_labels(entries: &[RankedEntry]) -> Vec<String> {
    let total: u64 = entries.iter().map(|e| e.value).sum();
    entries
        .iter()
        .map(|e| format_percent(e.value, total))
        .collect()
}
