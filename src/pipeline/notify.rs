use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// User-facing notices (toasts, status lines). The pipeline only calls this for
/// failure categories the deployment chooses to surface.
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Default notifier: writes notices to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success => info!(target: "salon::notice", "{}", message),
            NoticeLevel::Warning => warn!(target: "salon::notice", "{}", message),
            NoticeLevel::Error => error!(target: "salon::notice", "{}", message),
        }
    }
}
