use crate::types::Severity;
use log::{error, info, warn};
#[cfg(any(test, feature = "mock"))]
use mockall::automock;

/// Presents transient messages to the user
#[cfg_attr(any(test, feature = "mock"), automock)]
pub trait Notifier {
    fn show(&self, message: &str, severity: Severity);
}

/// Notifier writing to the log, errors end up on stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Success => info!("{message}"),
            Severity::Warning => warn!("{message}"),
            Severity::Error => error!("{message}"),
        }
    }
}
