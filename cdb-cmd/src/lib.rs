//! Command implementations for the clinical dashboard CLI.
//!
//! Every command goes through the same API client, chart derivation and
//! upload handling as the browser apps; only the transport (`reqwest`) and
//! the output (stdout and log lines) differ.

use cdb_api::models::{AggregateField, CheckKind, ResourceKind, UploadTarget};
use cdb_api::native::ReqwestTransport;
use cdb_api::ApiClient;
use cdb_dashboard::DashboardConfig;
use clap::{Args, Subcommand};
use std::path::PathBuf;

pub mod notify;
pub mod query;
pub mod upload;

/// Backend connection shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Base URL of the backend
    #[arg(long, env = "CDB_BASE_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Condition code tracked by incidence and comparison
    #[arg(long, default_value = "U07.1")]
    pub condition: String,
}

impl ApiArgs {
    pub fn config(&self) -> DashboardConfig {
        DashboardConfig {
            api_base: self.base_url.clone(),
            condition_code: self.condition.clone(),
            ..DashboardConfig::default()
        }
    }

    pub fn client(&self) -> ApiClient<ReqwestTransport> {
        ApiClient::new(ReqwestTransport::new(), self.base_url.as_str())
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the patient, encounter, observation and condition counts
    Stats,

    /// Show the distribution of one field, largest category first
    Aggregate {
        /// gender, status, code or age_group
        field: AggregateField,
    },

    /// New conditions per day over the last N days
    Incidence {
        #[arg(short, long, default_value_t = 30)]
        days: u32,
    },

    /// Patients per province
    Provinces,

    /// Compare two periods; with no dates, the previous week against the current one
    Compare {
        #[arg(long)]
        start1: Option<String>,
        #[arg(long)]
        end1: Option<String>,
        #[arg(long)]
        start2: Option<String>,
        #[arg(long)]
        end2: Option<String>,
    },

    /// Print raw resources as CSV (patients, encounters, observations)
    List {
        kind: ResourceKind,
    },

    /// Run a data-quality check (duplicates, encounter-links, observation-links,
    /// observation-values, observation-duplicates, observation-loinc)
    Check {
        kind: CheckKind,
    },

    /// Upload a CSV (patient, encounter, observation, condition) or a FHIR JSON bundle (json)
    Upload {
        #[arg(value_parser = upload::parse_target)]
        target: UploadTarget,

        /// File to upload
        file: PathBuf,

        /// Send the CSV even if its header lacks required columns
        #[arg(long)]
        skip_header_check: bool,
    },
}

pub async fn run(api: &ApiArgs, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Stats => query::run_stats(api).await,
        Command::Aggregate { field } => query::run_aggregate(api, field).await,
        Command::Incidence { days } => query::run_incidence(api, days).await,
        Command::Provinces => query::run_provinces(api).await,
        Command::Compare {
            start1,
            end1,
            start2,
            end2,
        } => query::run_compare(api, [start1, end1, start2, end2]).await,
        Command::List { kind } => query::run_list(api, kind).await,
        Command::Check { kind } => query::run_check(api, kind).await,
        Command::Upload {
            target,
            file,
            skip_header_check,
        } => upload::run_upload(api, target, &file, skip_header_check).await,
    }
}
