//! File uploads with CSV header pre-validation.

use crate::notify::LogNotifier;
use crate::ApiArgs;
use anyhow::bail;
use cdb_api::models::{ResourceKind, UploadTarget};
use cdb_api::native::UploadFile;
use cdb_dashboard::{UploadOutcome, Uploader};
use log::info;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// `json` or a resource kind (`patient`, `encounter`, ...).
pub fn parse_target(s: &str) -> Result<UploadTarget, String> {
    if s.eq_ignore_ascii_case("json") {
        return Ok(UploadTarget::JsonBulk);
    }
    ResourceKind::from_str(&s.to_ascii_lowercase()).map(UploadTarget::Csv)
}

/// Required columns of `kind` absent from `headers`, compared trimmed and lower-cased.
pub fn missing_headers(kind: ResourceKind, headers: &csv::StringRecord) -> Vec<&'static str> {
    let Some(expected) = kind.expected_csv_headers() else {
        return Vec::new();
    };
    let present: HashSet<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    expected
        .iter()
        .copied()
        .filter(|h| !present.contains(*h))
        .collect()
}

/// Fail unless the CSV header row carries every column the backend requires for `kind`.
pub fn validate_headers<R: Read>(kind: ResourceKind, source: R) -> anyhow::Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);
    let headers = reader.headers()?.clone();
    let missing = missing_headers(kind, &headers);
    if !missing.is_empty() {
        bail!(
            "{} CSV is missing required columns: {}",
            kind,
            missing.join(", ")
        );
    }
    Ok(())
}

pub async fn run_upload(
    api: &ApiArgs,
    target: UploadTarget,
    path: &Path,
    skip_header_check: bool,
) -> anyhow::Result<()> {
    if let UploadTarget::Csv(kind) = target {
        if skip_header_check {
            info!("Skipping header check for {}", path.display());
        } else {
            validate_headers(kind, File::open(path)?)?;
        }
    }

    let file = UploadFile::from_path(path)?;
    info!("Uploading {} ({} bytes) as {}", file.file_name, file.bytes.len(), target);

    let uploader = Uploader::new(api.client(), LogNotifier, api.config());
    match uploader
        .submit(&path.display().to_string(), target, file)
        .await
    {
        UploadOutcome::Done(result) => {
            println!("Inseriti {} | Scartati {}", result.inserted, result.skipped);
            for error in &result.errors {
                println!("{}", error);
            }
            Ok(())
        }
        UploadOutcome::Failed => bail!("upload of {} failed", path.display()),
        UploadOutcome::Busy => bail!("{} is already being uploaded", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("json"), Ok(UploadTarget::JsonBulk));
        assert_eq!(
            parse_target("Patients"),
            Ok(UploadTarget::Csv(ResourceKind::Patient))
        );
        assert!(parse_target("invoice").is_err());
    }

    #[test]
    fn test_complete_header_passes_in_any_case_and_order() {
        let csv = "GENDER, nome,cognome,codice_fiscale,data_nascita,telefono,indirizzo,cap,citta,extra\n";
        assert!(validate_headers(ResourceKind::Patient, csv.as_bytes()).is_ok());
    }

    #[test]
    fn test_missing_columns_are_named() {
        let csv = "encounter_id,codice_fiscale,status\nE1,RSSMRA80A01H501U,finished\n";
        let err = validate_headers(ResourceKind::Encounter, csv.as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "encounter CSV is missing required columns: class, data_inizio, data_fine"
        );
    }

    #[test]
    fn test_conditions_are_not_checked() {
        let headers = csv::StringRecord::from(vec!["anything"]);
        assert!(missing_headers(ResourceKind::Condition, &headers).is_empty());
    }
}
