//! Response payloads, one type per endpoint.
//!
//! Every body is decoded into one of these at the fetch boundary so a
//! malformed payload surfaces as an [`crate::ApiError::Decode`] instead of a
//! silently missing field further down the render path.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Counts shown in the four KPI cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub patients: u64,
    pub encounters: u64,
    pub observations: u64,
    /// Older backends omit this counter.
    #[serde(default)]
    pub conditions: u64,
}

/// A field's value distribution: category key -> occurrence count.
///
/// Entries keep the order in which the backend serialized the object so
/// that ties in a later sort are broken deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregatePayload {
    pub entries: Vec<(String, u64)>,
}

impl AggregatePayload {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<'de> Deserialize<'de> for AggregatePayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = AggregatePayload;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping category to a non-negative count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, count)) = map.next_entry::<String, u64>()? {
                    entries.push((key, count));
                }
                Ok(AggregatePayload { entries })
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Fields the backend can aggregate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateField {
    Gender,
    Status,
    Code,
    AgeGroup,
}

impl AggregateField {
    pub const ALL: [AggregateField; 4] = [
        AggregateField::Gender,
        AggregateField::Status,
        AggregateField::Code,
        AggregateField::AgeGroup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateField::Gender => "gender",
            AggregateField::Status => "status",
            AggregateField::Code => "code",
            AggregateField::AgeGroup => "age_group",
        }
    }

    /// Label shown in the field dropdowns.
    pub fn display_name(&self) -> &'static str {
        match self {
            AggregateField::Gender => "Genere",
            AggregateField::Status => "Stato encounter",
            AggregateField::Code => "Codice osservazione",
            AggregateField::AgeGroup => "Fascia d'età",
        }
    }

    /// Whether category keys are vocabulary codes that need a name lookup.
    pub fn is_coded(&self) -> bool {
        matches!(self, AggregateField::Code)
    }
}

impl FromStr for AggregateField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gender" => Ok(AggregateField::Gender),
            "status" => Ok(AggregateField::Status),
            "code" => Ok(AggregateField::Code),
            "age_group" => Ok(AggregateField::AgeGroup),
            other => Err(format!("unsupported aggregate field: {}", other)),
        }
    }
}

impl fmt::Display for AggregateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the coded-name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDisplay {
    pub code: String,
    pub display: String,
}

/// Resolved display names keyed by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeNames(pub HashMap<String, String>);

impl CodeNames {
    pub fn get(&self, code: &str) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }
}

impl From<Vec<CodeDisplay>> for CodeNames {
    fn from(list: Vec<CodeDisplay>) -> Self {
        CodeNames(
            list.into_iter()
                .filter(|c| !c.display.trim().is_empty())
                .map(|c| (c.code, c.display))
                .collect(),
        )
    }
}

/// New conditions recorded on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyIncidence {
    pub date: String,
    pub value: u64,
}

/// Patients grouped by the province of their first address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceCount {
    #[serde(default)]
    pub province: Option<String>,
    pub value: u64,
}

/// Condition count over one of the two compared periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub period: String,
    pub value: u64,
}

/// Outcome of a CSV or JSON ingestion request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub inserted: u64,
    #[serde(default)]
    pub skipped: u64,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Error body returned by the backend on rejected requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// FHIR resource types the backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Patient,
    Encounter,
    Observation,
    Condition,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Patient => "patient",
            ResourceKind::Encounter => "encounter",
            ResourceKind::Observation => "observation",
            ResourceKind::Condition => "condition",
        }
    }

    /// Segment of the raw listing endpoint; conditions have no listing.
    pub fn listing_segment(&self) -> Option<&'static str> {
        match self {
            ResourceKind::Patient => Some("patients"),
            ResourceKind::Encounter => Some("encounters"),
            ResourceKind::Observation => Some("observations"),
            ResourceKind::Condition => None,
        }
    }

    /// Lower-cased CSV headers the backend requires for ingestion, if it checks them.
    pub fn expected_csv_headers(&self) -> Option<&'static [&'static str]> {
        match self {
            ResourceKind::Patient => Some(&[
                "nome",
                "cognome",
                "codice_fiscale",
                "data_nascita",
                "telefono",
                "indirizzo",
                "cap",
                "citta",
                "gender",
            ]),
            ResourceKind::Encounter => Some(&[
                "encounter_id",
                "codice_fiscale",
                "status",
                "class",
                "data_inizio",
                "data_fine",
            ]),
            ResourceKind::Observation => Some(&[
                "observation_id",
                "codice_fiscale",
                "codice",
                "valore",
                "unita",
                "data_osservazione",
                "descrizione_test",
            ]),
            ResourceKind::Condition => None,
        }
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_end_matches('s') {
            "patient" => Ok(ResourceKind::Patient),
            "encounter" => Ok(ResourceKind::Encounter),
            "observation" => Ok(ResourceKind::Observation),
            "condition" => Ok(ResourceKind::Condition),
            other => Err(format!("unknown resource kind: {}", other)),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an upload is posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadTarget {
    Csv(ResourceKind),
    JsonBulk,
}

impl fmt::Display for UploadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadTarget::Csv(kind) => write!(f, "{} CSV", kind),
            UploadTarget::JsonBulk => f.write_str("JSON"),
        }
    }
}

/// Data-quality checks exposed under `/api/test`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Duplicates,
    EncounterLinks,
    ObservationLinks,
    ObservationValues,
    ObservationDuplicates,
    ObservationLoinc,
}

impl CheckKind {
    pub const ALL: [CheckKind; 6] = [
        CheckKind::Duplicates,
        CheckKind::EncounterLinks,
        CheckKind::ObservationLinks,
        CheckKind::ObservationValues,
        CheckKind::ObservationDuplicates,
        CheckKind::ObservationLoinc,
    ];

    pub fn path_segment(&self) -> &'static str {
        match self {
            CheckKind::Duplicates => "duplicates",
            CheckKind::EncounterLinks => "encounter-links",
            CheckKind::ObservationLinks => "observation-links",
            CheckKind::ObservationValues => "observation-values",
            CheckKind::ObservationDuplicates => "observation-duplicates",
            CheckKind::ObservationLoinc => "observation-loinc",
        }
    }

    /// Name of the counter field in the report body.
    pub fn count_field(&self) -> &'static str {
        match self {
            CheckKind::Duplicates | CheckKind::ObservationDuplicates => "count",
            CheckKind::EncounterLinks | CheckKind::ObservationLinks => "broken_count",
            CheckKind::ObservationValues | CheckKind::ObservationLoinc => "invalid_count",
        }
    }

    /// Name of the field listing the offending entries.
    pub fn entries_field(&self) -> &'static str {
        match self {
            CheckKind::Duplicates | CheckKind::ObservationDuplicates => "duplicates",
            CheckKind::EncounterLinks | CheckKind::ObservationLinks => "broken_links",
            CheckKind::ObservationValues => "invalid_entries",
            CheckKind::ObservationLoinc => "invalid_codes",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CheckKind::Duplicates => "pazienti duplicati",
            CheckKind::EncounterLinks => "Encounter scollegati da pazienti",
            CheckKind::ObservationLinks => "Observation scollegate da pazienti",
            CheckKind::ObservationValues => "Observation con valori non validi",
            CheckKind::ObservationDuplicates => "Observation duplicate",
            CheckKind::ObservationLoinc => "Observation con codici LOINC sconosciuti",
        }
    }
}

impl FromStr for CheckKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckKind::ALL
            .into_iter()
            .find(|k| k.path_segment() == s)
            .ok_or_else(|| format!("unknown check: {}", s))
    }
}

/// Result of a data-quality check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub kind: CheckKind,
    pub count: u64,
    pub entries: Vec<serde_json::Value>,
}
