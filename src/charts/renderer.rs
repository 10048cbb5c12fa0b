//! Static Chart Renderer
//! Renders an exercise chart to a PNG image with plotters.
//!
//! Layout:
//! 1. Title centered above the plot
//! 2. Plot area with curves, markers, dashed guides and shaded regions
//! 3. Legend in the upper right corner
//! 4. Colour bar on the right for filled contours

use crate::charts::{ContourField, Orientation, PlotLayer, PlotResult, SeriesColor};
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Padding added around line charts, as a fraction of the data span
const MARGIN_FRACTION: f64 = 0.05;
/// Horizontal space reserved for the colour bar
const COLORBAR_AREA: u32 = 110;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Chart drawing failed: {0}")]
    Drawing(String),
    #[error("Failed to encode PNG: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid image size {0}x{1}")]
    InvalidSize(u32, u32),
    #[error("Chart has nothing to draw")]
    Empty,
}

fn drawing_error<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::Drawing(err.to_string())
}

/// Filled contour cell: lower-left corner, upper-right corner, fill colour.
pub type ContourCell = ([f64; 2], [f64; 2], SeriesColor);

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render and write a PNG file.
    pub fn save_png(
        result: &PlotResult,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), ExportError> {
        let bytes = Self::render_png_bytes(result, width, height)?;
        std::fs::write(path, &bytes)?;
        info!(
            exercise = result.exercise.number(),
            path = %path.display(),
            bytes = bytes.len(),
            "Chart exported"
        );
        Ok(())
    }

    /// Render to in-memory PNG bytes.
    pub fn render_png_bytes(
        result: &PlotResult,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, ExportError> {
        let rgb = Self::render_rgb(result, width, height)?;
        Self::encode_png(rgb, width, height)
    }

    /// Render to a raw RGB buffer of `width * height * 3` bytes.
    pub fn render_rgb(result: &PlotResult, width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
        if width == 0 || height == 0 {
            return Err(ExportError::InvalidSize(width, height));
        }
        let (x_range, y_range) = Self::axis_ranges(result).ok_or(ExportError::Empty)?;

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(drawing_error)?;

            let plot_area = match result.contour() {
                Some(field) => {
                    let (plot_area, bar_area) =
                        root.split_horizontally(width.saturating_sub(COLORBAR_AREA));
                    Self::draw_colorbar(&bar_area, field)?;
                    plot_area
                }
                None => root.clone(),
            };

            Self::draw_chart(&plot_area, result, x_range, y_range)?;
            root.present().map_err(drawing_error)?;
        }

        Ok(buffer)
    }

    /// Encode a raw RGB buffer as PNG.
    pub fn encode_png(rgb: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
        let image =
            RgbImage::from_raw(width, height, rgb).ok_or(ExportError::InvalidSize(width, height))?;
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Axis ranges for a chart. Line charts get a small margin, contours are tight.
    pub fn axis_ranges(result: &PlotResult) -> Option<(Range<f64>, Range<f64>)> {
        let (x_min, x_max, y_min, y_max) = result.data_bounds()?;
        let margin = if result.contour().is_some() {
            0.0
        } else {
            MARGIN_FRACTION
        };
        Some((
            Self::padded(x_min, x_max, margin),
            Self::padded(y_min, y_max, margin),
        ))
    }

    fn padded(lo: f64, hi: f64, fraction: f64) -> Range<f64> {
        let span = hi - lo;
        if span <= 0.0 {
            return (lo - 0.5)..(hi + 0.5);
        }
        (lo - span * fraction)..(hi + span * fraction)
    }

    /// Split a contour field into coloured grid cells.
    /// Each cell takes the band of the mean of its four corner samples.
    pub fn contour_cells(field: &ContourField) -> Vec<ContourCell> {
        let nx = field.xs.len();
        let ny = field.ys.len();
        if nx < 2 || ny < 2 {
            return Vec::new();
        }

        (0..ny - 1)
            .flat_map(|j| (0..nx - 1).map(move |i| (i, j)))
            .map(|(i, j)| {
                let mean = (field.value_at(i, j)
                    + field.value_at(i + 1, j)
                    + field.value_at(i, j + 1)
                    + field.value_at(i + 1, j + 1))
                    / 4.0;
                (
                    [field.xs[i], field.ys[j]],
                    [field.xs[i + 1], field.ys[j + 1]],
                    field.color_for(mean),
                )
            })
            .collect()
    }

    fn rgb(color: SeriesColor) -> RGBColor {
        RGBColor(color.r, color.g, color.b)
    }

    fn stroke_px(width: f32) -> u32 {
        (width.round() as u32).max(1)
    }

    fn draw_chart<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        result: &PlotResult,
        x_range: Range<f64>,
        y_range: Range<f64>,
    ) -> Result<(), ExportError> {
        let mut chart = ChartBuilder::on(area)
            .caption(&result.title, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(x_range.clone(), y_range.clone())
            .map_err(drawing_error)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(result.x_label.as_str())
            .y_desc(result.y_label.as_str());
        if !result.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(drawing_error)?;

        for layer in &result.layers {
            match layer {
                PlotLayer::Curve {
                    points,
                    color,
                    label,
                } => {
                    let style = Self::rgb(*color).stroke_width(2);
                    chart
                        .draw_series(LineSeries::new(points.iter().map(|p| (p[0], p[1])), style))
                        .map_err(drawing_error)?
                        .label(label.as_str())
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
                }
                PlotLayer::Markers {
                    points,
                    color,
                    label,
                } => {
                    let style = Self::rgb(*color).filled();
                    chart
                        .draw_series(points.iter().map(|p| Circle::new((p[0], p[1]), 6, style)))
                        .map_err(drawing_error)?
                        .label(label.as_str())
                        .legend(move |(x, y)| Circle::new((x + 10, y), 5, style));
                }
                PlotLayer::ReferenceLine {
                    orientation,
                    at,
                    color,
                    width,
                    label,
                } => {
                    let endpoints = match orientation {
                        Orientation::Horizontal => {
                            vec![(x_range.start, *at), (x_range.end, *at)]
                        }
                        Orientation::Vertical => vec![(*at, y_range.start), (*at, y_range.end)],
                    };
                    let style = Self::rgb(*color).stroke_width(Self::stroke_px(*width));
                    let anno = chart
                        .draw_series(DashedLineSeries::new(endpoints, 8, 5, style))
                        .map_err(drawing_error)?;
                    if let Some(label) = label {
                        anno.label(label.as_str()).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], style)
                        });
                    }
                }
                PlotLayer::Fill {
                    points,
                    baseline,
                    color,
                    opacity,
                } => {
                    chart
                        .draw_series(AreaSeries::new(
                            points.iter().map(|p| (p[0], p[1])),
                            *baseline,
                            Self::rgb(*color).mix(f64::from(*opacity)),
                        ))
                        .map_err(drawing_error)?;
                }
                PlotLayer::FilledContour(field) => {
                    chart
                        .draw_series(Self::contour_cells(field).into_iter().map(
                            |(lower, upper, color)| {
                                Rectangle::new(
                                    [(lower[0], lower[1]), (upper[0], upper[1])],
                                    Self::rgb(color).filled(),
                                )
                            },
                        ))
                        .map_err(drawing_error)?;
                }
            }
        }

        if !result.legend_labels().is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.85))
                .border_style(BLACK)
                .label_font(("sans-serif", 14))
                .draw()
                .map_err(drawing_error)?;
        }

        Ok(())
    }

    fn draw_colorbar<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        field: &ContourField,
    ) -> Result<(), ExportError> {
        let (lo, hi) = if field.max > field.min {
            (field.min, field.max)
        } else {
            (field.min, field.min + 1.0)
        };

        let mut bar = ChartBuilder::on(area)
            .margin_top(54)
            .margin_bottom(65)
            .margin_right(10)
            .right_y_label_area_size(55)
            .build_cartesian_2d(0.0..1.0, lo..hi)
            .map_err(drawing_error)?;

        bar.draw_series((0..field.levels).map(|band| {
            Rectangle::new(
                [(0.0, field.band_floor(band)), (1.0, field.band_floor(band + 1))],
                Self::rgb(field.band_color(band)).filled(),
            )
        }))
        .map_err(drawing_error)?;

        bar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(6)
            .draw()
            .map_err(drawing_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::ExerciseRenderer;
    use approx::assert_abs_diff_eq;

    #[test]
    fn line_chart_ranges_are_padded() {
        let result = ExerciseRenderer::render(2).unwrap();
        let (x, y) = StaticChartRenderer::axis_ranges(&result).unwrap();
        // |x| on [-2, 2]: spans 4 on x and 2 on y
        assert_abs_diff_eq!(x.start, -2.2, epsilon = 1e-12);
        assert_abs_diff_eq!(x.end, 2.2, epsilon = 1e-12);
        assert_abs_diff_eq!(y.start, -0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(y.end, 2.1, epsilon = 1e-12);
    }

    #[test]
    fn contour_ranges_are_tight() {
        let result = ExerciseRenderer::render(4).unwrap();
        let (x, y) = StaticChartRenderer::axis_ranges(&result).unwrap();
        assert_eq!(x, -1.0..1.0);
        assert_eq!(y, -1.0..1.0);
    }

    #[test]
    fn contour_cells_tile_the_grid() {
        let result = ExerciseRenderer::render(4).unwrap();
        let field = result.contour().unwrap();
        let cells = StaticChartRenderer::contour_cells(field);
        assert_eq!(cells.len(), 99 * 99);

        // Corner cells sit at the top band, central cells at the bottom band
        let corner = cells[0].2;
        assert_eq!(corner, field.band_color(field.band(field.max * 0.99)));
        let centre = cells[49 * 99 + 49].2;
        assert_eq!(centre, field.band_color(0));
    }

    #[test]
    fn stroke_width_is_at_least_one_pixel() {
        assert_eq!(StaticChartRenderer::stroke_px(0.5), 1);
        assert_eq!(StaticChartRenderer::stroke_px(0.1), 1);
        assert_eq!(StaticChartRenderer::stroke_px(1.5), 2);
    }

    #[test]
    fn encode_png_writes_signature() {
        let png = StaticChartRenderer::encode_png(vec![255; 4 * 3 * 3], 4, 3).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn encode_png_rejects_short_buffer() {
        assert!(matches!(
            StaticChartRenderer::encode_png(vec![0; 5], 4, 3),
            Err(ExportError::InvalidSize(4, 3))
        ));
    }

    #[test]
    fn every_exercise_exports_a_png() {
        for n in 1..=5 {
            let result = ExerciseRenderer::render(n).unwrap();
            let png = StaticChartRenderer::render_png_bytes(&result, 800, 600).unwrap();
            assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        }
    }

    #[test]
    fn exported_contour_contains_viridis_bands() {
        let result = ExerciseRenderer::render(4).unwrap();
        let lowest = result.contour().unwrap().band_color(0);
        let png = StaticChartRenderer::render_png_bytes(&result, 800, 600).unwrap();

        let image = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (800, 600));
        assert!(image
            .pixels()
            .any(|p| p.0 == [lowest.r, lowest.g, lowest.b]));
    }

    #[test]
    fn zero_sized_render_is_rejected() {
        let result = ExerciseRenderer::render(1).unwrap();
        assert!(matches!(
            StaticChartRenderer::render_rgb(&result, 0, 600),
            Err(ExportError::InvalidSize(0, 600))
        ));
    }
}
