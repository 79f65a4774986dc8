use cdb_dashboard::notify::{Notifier, Toast, ToastLevel};
use log::{error, info, warn};

/// Sends toasts to the log instead of the screen.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success | ToastLevel::Info => info!("{}", toast.text),
            ToastLevel::Warning => warn!("{}", toast.text),
            ToastLevel::Error => error!("{}", toast.text),
        }
    }
}
