use eframe::egui;

use crate::chart::{ChartElement, ElementId};

const HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(240, 200, 60);

/// One catalog group as a wrap of buttons labelled `/symbol/`.
pub struct SymbolGrid<'a> {
    pub title: &'a str,
    pub elements: &'a [ChartElement],
}

impl<'a> SymbolGrid<'a> {
    /// Returns the element clicked this frame.
    pub fn show(&self, ui: &mut egui::Ui) -> Option<ElementId> {
        ui.heading(self.title);
        let mut clicked = None;
        ui.horizontal_wrapped(|ui| {
            for element in self.elements {
                if symbol_button(ui, element).clicked() && element.interactive {
                    clicked = Some(element.id);
                }
            }
        });
        clicked
    }
}

pub fn symbol_button(ui: &mut egui::Ui, element: &ChartElement) -> egui::Response {
    let text = egui::RichText::new(element.label()).size(22.0);
    let mut button = egui::Button::new(text).min_size(egui::vec2(56.0, 44.0));
    if element.highlighted {
        button = button.fill(HIGHLIGHT);
    }
    ui.add_enabled(element.interactive, button)
        .on_hover_text(element.audio_path.as_str())
}
