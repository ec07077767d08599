use eframe::egui;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAnswer {
    Submitted(String),
    Cancelled,
}

/// Modal asking for the user's name before the chart opens.
#[derive(Debug, Default)]
pub struct NamePrompt {
    open: bool,
    text: String,
}

impl NamePrompt {
    pub fn open(&mut self) {
        self.open = true;
        self.text.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<PromptAnswer> {
        if !self.open {
            return None;
        }
        let mut answer = None;
        egui::Window::new("Welcome")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Please enter your name:");
                let response = ui.text_edit_singleline(&mut self.text);
                response.request_focus();
                let submitted =
                    response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || submitted {
                        answer = Some(PromptAnswer::Submitted(self.text.clone()));
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(PromptAnswer::Cancelled);
                    }
                });
            });
        if answer.is_some() {
            self.open = false;
        }
        answer
    }
}
