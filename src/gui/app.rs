//! Minima Explorer Main Application
//! Main window with the exercise selector and chart viewer.
//!
//! Selection is synchronous: picking an exercise renders it immediately on the
//! UI thread, and a failed render only affects that selection.

use crate::charts::{PlotResult, StaticChartRenderer};
use crate::config::AppConfig;
use crate::exercises::{ExerciseId, ExerciseRenderer};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use anyhow::Context;
use egui::SidePanel;
use std::path::Path;
use tracing::{error, info};

/// Main application window.
pub struct MinimaApp {
    config: AppConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl MinimaApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let initial = config.initial_exercise();
        let mut app = Self {
            config,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        };
        app.select_exercise(initial);
        app
    }

    /// Render the selected exercise and show it
    fn select_exercise(&mut self, id: ExerciseId) {
        info!(exercise = id.number(), "Exercise selected");
        self.control_panel.selected = id;

        match ExerciseRenderer::render_exercise(id) {
            Ok(result) => {
                self.chart_viewer.set_result(result);
                self.control_panel.export_enabled = true;
                self.control_panel.set_status(&format!("{} listo", id));
            }
            Err(e) => {
                error!(exercise = id.number(), error = %e, "Render failed");
                self.chart_viewer.set_error(e.to_string());
                self.control_panel.export_enabled = false;
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    /// Handle PNG export of the current chart
    fn handle_export_png(&mut self) {
        let Some(result) = self.chart_viewer.result.as_ref() else {
            self.control_panel.set_status("No hay gráfica para exportar");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("Imagen PNG", &["png"])
            .set_file_name(format!("ejercicio_{}.png", result.exercise.number()))
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match Self::export_png(result, &output_path, &self.config) {
            Ok(()) => {
                self.control_panel
                    .set_status(&format!("Exportado {}", output_path.display()));
            }
            Err(e) => {
                error!(error = %format!("{:#}", e), "Export failed");
                self.control_panel.set_status(&format!("Error: {:#}", e));
            }
        }
    }

    fn export_png(result: &PlotResult, path: &Path, config: &AppConfig) -> anyhow::Result<()> {
        StaticChartRenderer::save_png(result, path, config.export_width, config.export_height)
            .with_context(|| format!("No se pudo exportar {}", path.display()))?;

        if config.open_after_export {
            open::that(path).with_context(|| format!("No se pudo abrir {}", path.display()))?;
        }

        Ok(())
    }
}

impl eframe::App for MinimaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(380.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::SelectExercise(id) => self.select_exercise(id),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ctx, ui);
        });
    }
}
