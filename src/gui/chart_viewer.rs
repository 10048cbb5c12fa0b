//! Chart Viewer Widget
//! Central panel showing the page heading, the exercise explanation and its chart.

use crate::charts::{ChartPlotter, PlotResult};
use crate::exercises::{PAGE_INTRO, PAGE_TITLE};
use egui::{Color32, RichText};

const CARD_MARGIN: f32 = 12.0;
const COLORBAR_SPACE: f32 = 70.0;
const MIN_CHART_HEIGHT: f32 = 300.0;

/// Displays the current `PlotResult`.
/// The result is replaced on every selection and never reused across exercises.
#[derive(Default)]
pub struct ChartViewer {
    pub result: Option<PlotResult>,
    pub error: Option<String>,
    contour_texture: Option<egui::TextureHandle>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_result(&mut self, result: PlotResult) {
        self.contour_texture = None;
        self.error = None;
        self.result = Some(result);
    }

    /// Drop the current chart and show an error instead
    pub fn set_error(&mut self, error: String) {
        self.contour_texture = None;
        self.result = None;
        self.error = Some(error);
    }

    pub fn show(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.heading(RichText::new(PAGE_TITLE).size(24.0).strong());
        ui.add_space(4.0);
        ui.label(PAGE_INTRO);
        ui.add_space(8.0);
        ui.separator();

        if let Some(error) = &self.error {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new(error)
                        .size(16.0)
                        .color(Color32::from_rgb(220, 53, 69)),
                );
            });
            return;
        }

        let Some(result) = &self.result else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Sin datos").size(20.0));
            });
            return;
        };

        // Upload the contour raster once per result
        let contour = result.contour();
        if let Some(field) = contour {
            if self.contour_texture.is_none() {
                self.contour_texture = Some(ctx.load_texture(
                    format!("contour_{}", result.exercise.number()),
                    ChartPlotter::contour_image(field),
                    egui::TextureOptions::NEAREST,
                ));
            }
        }

        ui.add_space(6.0);
        ui.label(RichText::new(&result.subheader).size(18.0).strong());
        ui.add_space(4.0);
        ui.label(&result.explanation);
        ui.add_space(10.0);

        let texture = self.contour_texture.as_ref();
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(CARD_MARGIN)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(&result.title).size(16.0).strong());
                });
                ui.add_space(6.0);

                let height = (ui.available_height() - CARD_MARGIN).max(MIN_CHART_HEIGHT);
                let mut width = ui.available_width();
                if contour.is_some() {
                    width -= COLORBAR_SPACE;
                }

                ui.horizontal(|ui| {
                    ChartPlotter::draw_plot(ui, result, texture, egui::vec2(width, height));
                    if let Some(field) = contour {
                        ui.add_space(8.0);
                        ChartPlotter::draw_colorbar(ui, field, height - 40.0);
                    }
                });
            });
    }
}
