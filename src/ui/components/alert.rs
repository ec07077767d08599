use std::collections::VecDeque;

use eframe::egui;
use parking_lot::Mutex;

use crate::alert::Alerter;

/// Alerts raised by worker threads, shown one at a time.
#[derive(Debug, Default)]
pub struct AlertQueue {
    pending: Mutex<VecDeque<String>>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn front(&self) -> Option<String> {
        self.pending.lock().front().cloned()
    }

    pub fn dismiss(&self) {
        self.pending.lock().pop_front();
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn show(&self, ctx: &egui::Context) {
        let Some(message) = self.front() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("Playback failed")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.dismiss();
        }
    }
}

impl Alerter for AlertQueue {
    fn alert(&self, message: &str) {
        self.pending.lock().push_back(message.to_string());
    }
}
