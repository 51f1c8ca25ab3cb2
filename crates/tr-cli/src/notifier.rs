use tr_session::{Notification, Notifier};

/// Prints notifications to stderr so stdout stays machine-readable.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrNotifier;

impl StderrNotifier {
    pub(crate) fn format(notification: &Notification) -> String {
        if notification.is_error() {
            format!("Error: {}", notification.message)
        } else {
            notification.message.clone()
        }
    }
}

impl Notifier for StderrNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!("{}", Self::format(&notification));
    }
}
