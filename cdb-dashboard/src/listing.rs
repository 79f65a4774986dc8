//! Flattening raw FHIR resources into table rows.

use crate::series::MISSING_LABEL;
use cdb_api::models::ResourceKind;
use serde_json::Value;

/// A table column read from each resource through a JSON pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub pointer: &'static str,
}

const fn col(header: &'static str, pointer: &'static str) -> Column {
    Column { header, pointer }
}

const PATIENT_COLUMNS: &[Column] = &[
    col("Identificativo", "/identifier/0/value"),
    col("Cognome", "/name/0/family"),
    col("Nome", "/name/0/given"),
    col("Genere", "/gender"),
    col("Nascita", "/birthDate"),
    col("Città", "/address/0/city"),
];

const ENCOUNTER_COLUMNS: &[Column] = &[
    col("Identificativo", "/identifier/0/value"),
    col("Stato", "/status"),
    col("Classe", "/class/code"),
    col("Paziente", "/subject/identifier/value"),
    col("Inizio", "/period/start"),
    col("Fine", "/period/end"),
];

const OBSERVATION_COLUMNS: &[Column] = &[
    col("Identificativo", "/identifier/0/value"),
    col("Codice", "/code/coding/0/code"),
    col("Descrizione", "/code/coding/0/display"),
    col("Valore", "/valueQuantity/value"),
    col("Unità", "/valueQuantity/unit"),
    col("Data", "/effectiveDateTime"),
];

const CONDITION_COLUMNS: &[Column] = &[
    col("Identificativo", "/identifier/0/value"),
    col("Codice", "/code/coding/0/code"),
    col("Descrizione", "/code/coding/0/display"),
    col("Paziente", "/subject/identifier/value"),
    col("Registrata", "/recordedDate"),
];

pub fn columns(kind: ResourceKind) -> &'static [Column] {
    match kind {
        ResourceKind::Patient => PATIENT_COLUMNS,
        ResourceKind::Encounter => ENCOUNTER_COLUMNS,
        ResourceKind::Observation => OBSERVATION_COLUMNS,
        ResourceKind::Condition => CONDITION_COLUMNS,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTable {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

pub fn tabulate(kind: ResourceKind, resources: &[Value]) -> ResourceTable {
    let cols = columns(kind);
    ResourceTable {
        headers: cols.iter().map(|c| c.header).collect(),
        rows: resources
            .iter()
            .map(|resource| cols.iter().map(|c| cell(resource.pointer(c.pointer))).collect())
            .collect(),
    }
}

fn cell(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Array(items)) => {
            let parts: Vec<String> = items
                .iter()
                .map(|v| cell(Some(v)))
                .filter(|s| s != MISSING_LABEL)
                .collect();
            if parts.is_empty() {
                MISSING_LABEL.to_string()
            } else {
                parts.join(" ")
            }
        }
        _ => MISSING_LABEL.to_string(),
    }
}
