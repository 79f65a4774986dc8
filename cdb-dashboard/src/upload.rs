//! Submitting upload forms and reporting their results.

use crate::config::DashboardConfig;
use crate::notify::{upload_failure_toast, upload_toasts, Notifier};
use cdb_api::models::{UploadResult, UploadTarget};
use cdb_api::{ApiClient, HttpTransport};
use log::{error, info, warn};
use std::cell::RefCell;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The form already has a submission in flight; nothing was sent.
    Busy,
    Done(UploadResult),
    Failed,
}

pub struct Uploader<T: HttpTransport, N: Notifier> {
    client: ApiClient<T>,
    notifier: N,
    config: DashboardConfig,
    in_flight: RefCell<HashSet<String>>,
}

/// Clears a form's in-flight mark however the submission ends.
struct InFlight<'a> {
    forms: &'a RefCell<HashSet<String>>,
    form_id: String,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.forms.borrow_mut().remove(&self.form_id);
    }
}

impl<T: HttpTransport, N: Notifier> Uploader<T, N> {
    pub fn new(client: ApiClient<T>, notifier: N, config: DashboardConfig) -> Self {
        Self {
            client,
            notifier,
            config,
            in_flight: RefCell::new(HashSet::new()),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn is_in_flight(&self, form_id: &str) -> bool {
        self.in_flight.borrow().contains(form_id)
    }

    /// Post `form` to the endpoint of `target` on behalf of the form `form_id`.
    ///
    /// Only one submission per form runs at a time.
    pub async fn submit(&self, form_id: &str, target: UploadTarget, form: T::Form) -> UploadOutcome {
        if !self.in_flight.borrow_mut().insert(form_id.to_string()) {
            warn!("Ignoring {} submission: one is already running", form_id);
            return UploadOutcome::Busy;
        }
        let _guard = InFlight {
            forms: &self.in_flight,
            form_id: form_id.to_string(),
        };

        info!("Uploading {} from {}", target, form_id);
        match self.client.upload(target, form).await {
            Ok(result) => {
                info!(
                    "{} upload: {} inserted, {} skipped, {} errors",
                    target,
                    result.inserted,
                    result.skipped,
                    result.errors.len()
                );
                for toast in upload_toasts(
                    target,
                    &result,
                    self.config.error_list_limit,
                    self.config.success_toast_ms,
                ) {
                    self.notifier.notify(toast);
                }
                UploadOutcome::Done(result)
            }
            Err(e) => {
                error!("{} upload failed: {}", target, e);
                self.notifier
                    .notify(upload_failure_toast(target, &e.detail()));
                UploadOutcome::Failed
            }
        }
    }
}
