use eframe::egui;

use crate::chart::ChartElement;

use super::symbol_grid::symbol_button;

#[derive(Default, Debug)]
pub struct FollowAlongOutput {
    pub clear: bool,
    pub replay: bool,
}

pub struct FollowAlongPanel<'a> {
    pub entries: &'a [ChartElement],
    pub is_replaying: bool,
}

impl<'a> FollowAlongPanel<'a> {
    pub fn show(&self, ui: &mut egui::Ui) -> FollowAlongOutput {
        let mut output = FollowAlongOutput::default();
        ui.horizontal(|ui| {
            ui.heading("Follow Along Chart");
            ui.separator();
            if replay_button(ui, self.is_replaying) {
                output.replay = true;
            }
            if ui
                .button("Clear")
                .on_hover_text("Remove every symbol from the follow-along chart.")
                .clicked()
            {
                output.clear = true;
            }
        });
        egui::ScrollArea::horizontal().show(ui, |ui| {
            ui.horizontal(|ui| {
                if self.entries.is_empty() {
                    ui.weak("Click symbols above to build a sequence.");
                }
                for entry in self.entries {
                    symbol_button(ui, entry);
                }
            });
        });
        output
    }
}

fn replay_button(ui: &mut egui::Ui, is_replaying: bool) -> bool {
    let mut clicked = false;
    ui.add_enabled_ui(!is_replaying, |ui| {
        if ui
            .button("Play Selected Sounds")
            .on_hover_text("Plays every symbol in order with a short pause between them.")
            .clicked()
        {
            clicked = true;
        }
    });
    clicked
}
