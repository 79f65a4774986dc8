use crate::notify::{check_toast, render_failure_toast, Notifier};
use cdb_api::models::{CheckKind, CheckReport};
use cdb_api::{ApiClient, HttpTransport};
use log::{error, info, warn};

/// Run one data-quality check and toast its verdict.
pub async fn run_check<T: HttpTransport, N: Notifier>(
    client: &ApiClient<T>,
    notifier: &N,
    kind: CheckKind,
) -> Option<CheckReport> {
    match client.run_check(kind).await {
        Ok(report) => {
            info!("Check {}: {} findings", kind.path_segment(), report.count);
            if report.count > 0 {
                warn!(
                    "{}: {}",
                    kind.description(),
                    serde_json::Value::from(report.entries.clone())
                );
            }
            notifier.notify(check_toast(&report));
            Some(report)
        }
        Err(e) => {
            error!("Check {} failed: {}", kind.path_segment(), e);
            notifier.notify(render_failure_toast(
                &format!("il controllo {}", kind.path_segment()),
                &e.detail(),
            ));
            None
        }
    }
}
