use parking_lot::Mutex;
use tracing::warn;

/// Surfaces a message the user has to acknowledge.
pub trait Alerter: Send + Sync {
    fn alert(&self, message: &str);
}

/// Used where no window is available; the message only reaches the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlerter;

impl Alerter for LogAlerter {
    fn alert(&self, message: &str) {
        warn!(message, "alert");
    }
}

#[derive(Debug, Default)]
pub struct RecordingAlerter {
    messages: Mutex<Vec<String>>,
}

impl RecordingAlerter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl Alerter for RecordingAlerter {
    fn alert(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}
