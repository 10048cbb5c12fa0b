//! Control Panel Widget
//! Left side panel with the exercise selector and export controls.

use crate::exercises::ExerciseId;
use egui::{Color32, ComboBox, RichText};

/// Status line shown before anything has happened.
const STATUS_READY: &str = "Listo";

/// Left side control panel with exercise selection and export button.
pub struct ControlPanel {
    pub selected: ExerciseId,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selected: ExerciseId::One,
            status: STATUS_READY.to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 Minima Explorer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Mínimos globales y locales")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Exercise Section =====
        ui.label(RichText::new("Selecciona un ejercicio").size(14.0).strong());
        ui.add_space(5.0);

        ComboBox::from_id_salt("exercise")
            .width(ui.available_width())
            .selected_text(self.selected.label())
            .show_ui(ui, |ui| {
                for id in ExerciseId::ALL {
                    if ui
                        .selectable_label(self.selected == id, id.label())
                        .clicked()
                        && self.selected != id
                    {
                        self.selected = id;
                        action = ControlPanelAction::SelectExercise(id);
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Exportar PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectExercise(ExerciseId),
    ExportPng,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_exercise_with_spanish_status() {
        let panel = ControlPanel::new();
        assert_eq!(panel.selected, ExerciseId::One);
        assert_eq!(panel.status, "Listo");
        assert!(!panel.export_enabled);
    }

    #[test]
    fn set_status_replaces_the_line() {
        let mut panel = ControlPanel::new();
        panel.set_status("Exportado ejercicio_1.png");
        assert_eq!(panel.status, "Exportado ejercicio_1.png");
    }
}
