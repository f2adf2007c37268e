use crate::error::TimerError;
use crate::notify::Notifier;
use notify_rust::Notification;

pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn alert(&self, summary: &str, body: &str) -> Result<(), TimerError> {
        Notification::new()
            .summary(summary)
            .body(body)
            .show()
            .map_err(|err| TimerError::io(err.to_string()))?;
        Ok(())
    }
}
