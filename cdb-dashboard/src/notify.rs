//! Transient notifications ("toasts") and the texts the dashboard shows in them.

use cdb_api::models::{CheckReport, UploadResult, UploadTarget};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub text: String,
    pub level: ToastLevel,
    /// `None` keeps the toast on screen until closed.
    pub duration_ms: Option<u32>,
}

impl Toast {
    pub fn new(level: ToastLevel, text: impl Into<String>, duration_ms: Option<u32>) -> Self {
        Self {
            text: text.into(),
            level,
            duration_ms,
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.duration_ms.is_none()
    }
}

/// Where toasts go: Toastify in the browser, a log line on the CLI.
pub trait Notifier {
    fn notify(&self, toast: Toast);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, toast: Toast) {
        (**self).notify(toast)
    }
}

/// Toasts for a completed upload.
///
/// The counts toast appears only if something was inserted or skipped; the
/// error list, truncated to `error_limit` rows, stays until dismissed.
pub fn upload_toasts(
    target: UploadTarget,
    result: &UploadResult,
    error_limit: usize,
    success_ms: u32,
) -> Vec<Toast> {
    let mut toasts = Vec::new();
    if result.inserted > 0 || result.skipped > 0 {
        toasts.push(Toast::new(
            ToastLevel::Success,
            format!(
                "{}: Inseriti {} | Scartati {}",
                target, result.inserted, result.skipped
            ),
            Some(success_ms),
        ));
    }
    if !result.errors.is_empty() {
        let shown: Vec<&str> = result
            .errors
            .iter()
            .take(error_limit)
            .map(String::as_str)
            .collect();
        let mut text = format!("{} Errori:\n{}", target, shown.join("\n"));
        let hidden = result.errors.len().saturating_sub(shown.len());
        if hidden > 0 {
            text.push_str(&format!("\n… altri {} errori", hidden));
        }
        toasts.push(Toast::new(ToastLevel::Warning, text, None));
    }
    toasts
}

pub fn upload_failure_toast(target: UploadTarget, reason: &str) -> Toast {
    Toast::new(
        ToastLevel::Error,
        format!("{} Errore: {}", target, reason),
        None,
    )
}

/// A requested render could not complete.
pub fn render_failure_toast(what: &str, reason: &str) -> Toast {
    Toast::new(
        ToastLevel::Error,
        format!("Impossibile caricare {}: {}", what, reason),
        Some(6000),
    )
}

pub fn check_toast(report: &CheckReport) -> Toast {
    if report.count == 0 {
        Toast::new(
            ToastLevel::Success,
            format!("✓ Nessun problema: {}", report.kind.description()),
            Some(5000),
        )
    } else {
        Toast::new(
            ToastLevel::Warning,
            format!("✖ {} {}", report.count, report.kind.description()),
            Some(5000),
        )
    }
}
