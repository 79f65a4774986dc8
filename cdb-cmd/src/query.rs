//! Read-only commands: KPI counts, distributions, time series, listings, checks.

use crate::notify::LogNotifier;
use crate::ApiArgs;
use anyhow::{anyhow, bail};
use cdb_api::models::{AggregateField, CheckKind, ResourceKind};
use cdb_dashboard::aggregate::{apply_names, is_coded_field, percent_labels, rank};
use cdb_dashboard::checks::run_check as check;
use cdb_dashboard::kpi::KpiSlot;
use cdb_dashboard::listing::tabulate;
use cdb_dashboard::periods::{PeriodInputs, PeriodRequest};
use cdb_dashboard::series::{comparison_points, incidence_points, province_points, SeriesPoint};
use cdb_utils::dates::today;
use cdb_utils::DateRange;
use log::{info, warn};

fn print_points(points: &[SeriesPoint]) {
    let width = points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);
    for point in points {
        println!("{:<width$}  {:>8}", point.label, point.value, width = width);
    }
}

pub async fn run_stats(api: &ApiArgs) -> anyhow::Result<()> {
    let summary = api.client().stats().await?;
    let separator = api.config().thousands_separator;
    for slot in KpiSlot::ALL {
        println!("{:<12} {:>12}", slot.title(), slot.text(&summary, separator));
    }
    Ok(())
}

/// Print a field's distribution sorted by count, with each category's share.
pub async fn run_aggregate(api: &ApiArgs, field: AggregateField) -> anyhow::Result<()> {
    let client = api.client();
    let payload = client.aggregate(field.as_str()).await?;
    if payload.is_empty() {
        warn!("No data for {}", field);
        return Ok(());
    }

    let mut entries = rank(&payload);
    if is_coded_field(field.as_str()) {
        let codes: Vec<String> = entries.iter().map(|e| e.key.clone()).collect();
        match client.code_names(&codes).await {
            Ok(names) => apply_names(&mut entries, &names),
            Err(e) => warn!("Name lookup failed, showing raw codes: {}", e),
        }
    }

    info!("{} categories for {}", entries.len(), field.display_name());
    let shares = percent_labels(&entries);
    for (entry, share) in entries.iter().zip(shares) {
        println!("{:<48} {:>8} {:>8}", entry.label, entry.value, share);
    }
    Ok(())
}

pub async fn run_incidence(api: &ApiArgs, days: u32) -> anyhow::Result<()> {
    let range = DateRange::ending_at(today(), days)?;
    info!(
        "Incidence of {} from {} to {}",
        api.condition,
        range.start_iso(),
        range.end_iso()
    );
    let series = api.client().daily_incidence(&range, &api.condition).await?;
    print_points(&incidence_points(&series));
    Ok(())
}

pub async fn run_provinces(api: &ApiArgs) -> anyhow::Result<()> {
    let rows = api.client().patients_by_province().await?;
    print_points(&province_points(&rows));
    Ok(())
}

/// `dates` are start1, end1, start2, end2; all or none must be given.
pub async fn run_compare(api: &ApiArgs, dates: [Option<String>; 4]) -> anyhow::Result<()> {
    let [start1, end1, start2, end2] = dates.map(Option::unwrap_or_default);
    let inputs = PeriodInputs {
        start1,
        end1,
        start2,
        end2,
    };
    let (first, second) = match inputs.resolve(today())? {
        PeriodRequest::Compare { first, second, .. } => (first, second),
        PeriodRequest::Skip => bail!("give all four dates or none of them"),
    };
    let periods = api
        .client()
        .incidence_comparison(&first, &second, &api.condition)
        .await?;
    print_points(&comparison_points(&periods, &first, &second));
    Ok(())
}

/// Write the flattened listing of `kind` to stdout as CSV.
pub async fn run_list(api: &ApiArgs, kind: ResourceKind) -> anyhow::Result<()> {
    let resources = api.client().list_resources(kind).await?;
    info!("{} {} resources", resources.len(), kind);
    let table = tabulate(kind, &resources);

    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub async fn run_check(api: &ApiArgs, kind: CheckKind) -> anyhow::Result<()> {
    let report = check(&api.client(), &LogNotifier, kind)
        .await
        .ok_or_else(|| anyhow!("check {} could not be run", kind.path_segment()))?;
    println!("{}: {}", kind.description(), report.count);
    for entry in &report.entries {
        println!("{}", serde_json::to_string(entry)?);
    }
    Ok(())
}
