//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::charts::{ContourField, Orientation, PlotLayer, PlotResult, SeriesColor};
use egui::{Color32, RichText};
use egui_plot::{
    Corner, HLine, Legend, Line, LineStyle, MarkerShape, Plot, PlotImage, PlotPoint, PlotPoints,
    Points, Polygon, VLine,
};

/// Width of the colour bar strip
const COLORBAR_WIDTH: f32 = 18.0;

/// Draws `PlotResult`s with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color32(color: SeriesColor) -> Color32 {
        Color32::from_rgb(color.r, color.g, color.b)
    }

    /// Rasterise a contour field, one pixel per sample.
    /// Image rows run top to bottom while field rows run bottom to top.
    pub fn contour_image(field: &ContourField) -> egui::ColorImage {
        let width = field.xs.len();
        let height = field.ys.len();

        let pixels = (0..height)
            .rev()
            .flat_map(|j| (0..width).map(move |i| (i, j)))
            .map(|(i, j)| Self::color32(field.color_for(field.value_at(i, j))))
            .collect();

        egui::ColorImage {
            size: [width, height],
            pixels,
        }
    }

    /// Draw the exercise chart.
    /// The contour texture must come from `contour_image` of the same result.
    pub fn draw_plot(
        ui: &mut egui::Ui,
        result: &PlotResult,
        contour_texture: Option<&egui::TextureHandle>,
        size: egui::Vec2,
    ) {
        let mut plot = Plot::new(format!("exercise_plot_{}", result.exercise.number()))
            .width(size.x)
            .height(size.y)
            .legend(Legend::default().position(Corner::RightTop))
            .x_axis_label(result.x_label.clone())
            .y_axis_label(result.y_label.clone())
            .show_grid(result.show_grid)
            .allow_scroll(false);

        if result.equal_aspect {
            plot = plot.data_aspect(1.0);
        }

        plot.show(ui, |plot_ui| {
            for layer in &result.layers {
                match layer {
                    PlotLayer::Curve {
                        points,
                        color,
                        label,
                    } => {
                        plot_ui.line(
                            Line::new(PlotPoints::from(points.clone()))
                                .color(Self::color32(*color))
                                .width(2.0)
                                .name(label),
                        );
                    }
                    PlotLayer::Markers {
                        points,
                        color,
                        label,
                    } => {
                        plot_ui.points(
                            Points::new(PlotPoints::from(points.clone()))
                                .shape(MarkerShape::Circle)
                                .filled(true)
                                .radius(5.0)
                                .color(Self::color32(*color))
                                .name(label),
                        );
                    }
                    PlotLayer::ReferenceLine {
                        orientation,
                        at,
                        color,
                        width,
                        label,
                    } => {
                        let color = Self::color32(*color);
                        let style = LineStyle::dashed_dense();
                        match orientation {
                            Orientation::Horizontal => {
                                let mut line = HLine::new(*at).color(color).width(*width).style(style);
                                if let Some(label) = label {
                                    line = line.name(label);
                                }
                                plot_ui.hline(line);
                            }
                            Orientation::Vertical => {
                                let mut line = VLine::new(*at).color(color).width(*width).style(style);
                                if let Some(label) = label {
                                    line = line.name(label);
                                }
                                plot_ui.vline(line);
                            }
                        }
                    }
                    PlotLayer::Fill {
                        points,
                        baseline,
                        color,
                        opacity,
                    } => {
                        // egui fills polygons as convex shapes, so shade strip by strip
                        let fill = Self::color32(*color).gamma_multiply(*opacity);
                        for pair in points.windows(2) {
                            let strip = vec![
                                [pair[0][0], *baseline],
                                [pair[0][0], pair[0][1]],
                                [pair[1][0], pair[1][1]],
                                [pair[1][0], *baseline],
                            ];
                            plot_ui.polygon(
                                Polygon::new(PlotPoints::from(strip))
                                    .fill_color(fill)
                                    .stroke(egui::Stroke::new(0.0, fill)),
                            );
                        }
                    }
                    PlotLayer::FilledContour(field) => {
                        let Some(texture) = contour_texture else {
                            continue;
                        };
                        let (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) =
                            (field.xs.first(), field.xs.last(), field.ys.first(), field.ys.last())
                        else {
                            continue;
                        };

                        plot_ui.image(PlotImage::new(
                            texture.id(),
                            PlotPoint::new((x0 + x1) / 2.0, (y0 + y1) / 2.0),
                            egui::vec2((x1 - x0) as f32, (y1 - y0) as f32),
                        ));
                    }
                }
            }
        });
    }

    /// Draw a vertical colour bar for a contour field
    pub fn draw_colorbar(ui: &mut egui::Ui, field: &ContourField, height: f32) {
        ui.vertical(|ui| {
            ui.label(RichText::new(format!("{:.2}", field.max)).size(11.0));

            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(COLORBAR_WIDTH, height), egui::Sense::hover());
            if !field.label.is_empty() {
                response.on_hover_text(&field.label);
            }
            let band_height = rect.height() / field.levels as f32;

            for band in 0..field.levels {
                let top = rect.bottom() - (band + 1) as f32 * band_height;
                let band_rect = egui::Rect::from_min_size(
                    egui::pos2(rect.left(), top),
                    egui::vec2(rect.width(), band_height),
                );
                ui.painter()
                    .rect_filled(band_rect, 0.0, Self::color32(field.band_color(band)));
            }

            ui.label(RichText::new(format!("{:.2}", field.min)).size(11.0));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contour_image_puts_top_row_first() {
        // Value rises with y, so the first image row holds the largest values
        let field = ContourField::new(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0, 0.0, 1.0, 1.0],
            2,
        );
        let image = ChartPlotter::contour_image(&field);

        assert_eq!(image.size, [2, 2]);
        let top = ChartPlotter::color32(field.color_for(1.0));
        let bottom = ChartPlotter::color32(field.color_for(0.0));
        assert_eq!(image.pixels[0], top);
        assert_eq!(image.pixels[1], top);
        assert_eq!(image.pixels[2], bottom);
        assert_ne!(top, bottom);
    }

    #[test]
    fn series_color_converts_to_opaque_color32() {
        let c = ChartPlotter::color32(SeriesColor::ORANGE);
        assert_eq!(c, Color32::from_rgb(255, 165, 0));
        assert_eq!(c.a(), 255);
    }
}
