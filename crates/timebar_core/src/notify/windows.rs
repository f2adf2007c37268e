use crate::error::TimerError;
use crate::notify::Notifier;
use tauri_winrt_notification::Toast;

pub struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn alert(&self, summary: &str, body: &str) -> Result<(), TimerError> {
        Toast::new(Toast::POWERSHELL_APP_ID)
            .title(summary)
            .text1(body)
            .show()
            .map_err(|err| TimerError::io(err.to_string()))?;
        Ok(())
    }
}
