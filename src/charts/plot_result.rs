//! Plot Result Module
//! Toolkit-neutral description of a rendered exercise chart.
//!
//! The same `PlotResult` feeds both the interactive egui_plot view and the
//! static plotters export, so neither side knows about exercises.

use crate::exercises::ExerciseId;
use plotters::style::colors::colormaps::ViridisRGB;
use plotters::style::RGBColor;

/// RGB colour shared by the interactive and static backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SeriesColor {
    pub const BLACK: SeriesColor = SeriesColor::rgb(0, 0, 0);
    pub const BLUE: SeriesColor = SeriesColor::rgb(0, 0, 255);
    pub const RED: SeriesColor = SeriesColor::rgb(255, 0, 0);
    pub const GREEN: SeriesColor = SeriesColor::rgb(0, 128, 0);
    pub const ORANGE: SeriesColor = SeriesColor::rgb(255, 165, 0);
    pub const PURPLE: SeriesColor = SeriesColor::rgb(128, 0, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Viridis colour for `t` in `[0, 1]`.
    pub fn viridis(t: f32) -> Self {
        let RGBColor(r, g, b) = ViridisRGB::get_color(t.clamp(0.0, 1.0));
        Self::rgb(r, g, b)
    }
}

/// Orientation of a reference line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Sampled scalar field drawn as a filled contour.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourField {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    /// Row-major: `values[j * xs.len() + i]` is the value at `(xs[i], ys[j])`.
    pub values: Vec<f64>,
    pub levels: usize,
    pub min: f64,
    pub max: f64,
    /// Caption shown with the colour bar
    pub label: String,
}

impl ContourField {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>, values: Vec<f64>, levels: usize) -> Self {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self {
            xs,
            ys,
            values,
            levels: levels.max(1),
            min,
            max,
            label: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Value at column `i`, row `j`.
    pub fn value_at(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.xs.len() + i]
    }

    /// Index of the contour band containing `z`, in `0..levels`.
    pub fn band(&self, z: f64) -> usize {
        let span = self.max - self.min;
        if span <= 0.0 || !z.is_finite() {
            return 0;
        }
        let t = ((z - self.min) / span).clamp(0.0, 1.0);
        ((t * self.levels as f64).floor() as usize).min(self.levels - 1)
    }

    /// Fill colour of a band.
    pub fn band_color(&self, band: usize) -> SeriesColor {
        if self.levels <= 1 {
            return SeriesColor::viridis(0.0);
        }
        SeriesColor::viridis(band as f32 / (self.levels - 1) as f32)
    }

    /// Fill colour for a raw field value.
    pub fn color_for(&self, z: f64) -> SeriesColor {
        self.band_color(self.band(z))
    }

    /// Lower bound of a band, used for colour bar tick labels.
    pub fn band_floor(&self, band: usize) -> f64 {
        self.min + (self.max - self.min) * band as f64 / self.levels as f64
    }
}

/// One drawable element of a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotLayer {
    /// Polyline through the sampled function.
    Curve {
        points: Vec<[f64; 2]>,
        color: SeriesColor,
        label: String,
    },
    /// Scatter markers (minima and contrast points).
    Markers {
        points: Vec<[f64; 2]>,
        color: SeriesColor,
        label: String,
    },
    /// Dashed line spanning the whole plot.
    ReferenceLine {
        orientation: Orientation,
        at: f64,
        color: SeriesColor,
        width: f32,
        label: Option<String>,
    },
    /// Translucent area between `points` and `baseline`.
    Fill {
        points: Vec<[f64; 2]>,
        baseline: f64,
        color: SeriesColor,
        opacity: f32,
    },
    FilledContour(ContourField),
}

/// Chart and explanatory text for one exercise selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotResult {
    pub exercise: ExerciseId,
    pub subheader: String,
    pub explanation: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub layers: Vec<PlotLayer>,
    pub show_grid: bool,
    pub equal_aspect: bool,
}

impl PlotResult {
    /// The filled contour layer, if this chart has one.
    pub fn contour(&self) -> Option<&ContourField> {
        self.layers.iter().find_map(|layer| match layer {
            PlotLayer::FilledContour(field) => Some(field),
            _ => None,
        })
    }

    /// All marker coordinates in drawing order.
    pub fn marker_points(&self) -> Vec<[f64; 2]> {
        self.layers
            .iter()
            .filter_map(|layer| match layer {
                PlotLayer::Markers { points, .. } => Some(points.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Labels that will appear in the legend, in drawing order.
    pub fn legend_labels(&self) -> Vec<&str> {
        self.layers
            .iter()
            .filter_map(|layer| match layer {
                PlotLayer::Curve { label, .. } | PlotLayer::Markers { label, .. } => {
                    Some(label.as_str())
                }
                PlotLayer::ReferenceLine { label, .. } => label.as_deref(),
                _ => None,
            })
            .collect()
    }

    /// Data extent `(x_min, x_max, y_min, y_max)` over every layer.
    ///
    /// Reference lines only widen the axis they cross. Returns `None` for a
    /// chart with no finite coordinates.
    pub fn data_bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut xs: Vec<f64> = Vec::new();
        let mut ys: Vec<f64> = Vec::new();

        for layer in &self.layers {
            match layer {
                PlotLayer::Curve { points, .. } | PlotLayer::Markers { points, .. } => {
                    xs.extend(points.iter().map(|p| p[0]));
                    ys.extend(points.iter().map(|p| p[1]));
                }
                PlotLayer::Fill {
                    points, baseline, ..
                } => {
                    xs.extend(points.iter().map(|p| p[0]));
                    ys.extend(points.iter().map(|p| p[1]));
                    ys.push(*baseline);
                }
                PlotLayer::ReferenceLine {
                    orientation, at, ..
                } => match orientation {
                    Orientation::Horizontal => ys.push(*at),
                    Orientation::Vertical => xs.push(*at),
                },
                PlotLayer::FilledContour(field) => {
                    xs.extend(field.xs.first().into_iter().chain(field.xs.last()));
                    ys.extend(field.ys.first().into_iter().chain(field.ys.last()));
                }
            }
        }

        let (x_min, x_max) = finite_extent(&xs)?;
        let (y_min, y_max) = finite_extent(&ys)?;
        Some((x_min, x_max, y_min, y_max))
    }
}

fn finite_extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn field() -> ContourField {
        ContourField::new(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0, 1.0, 1.0, 2.0],
            4,
        )
    }

    #[test]
    fn contour_field_tracks_extremes() {
        let f = field();
        assert_eq!(f.min, 0.0);
        assert_eq!(f.max, 2.0);
        assert_eq!(f.value_at(1, 1), 2.0);
        assert_eq!(f.value_at(1, 0), 1.0);
    }

    #[test]
    fn bands_cover_range_and_clamp_top() {
        let f = field();
        assert_eq!(f.band(0.0), 0);
        assert_eq!(f.band(0.49), 0);
        assert_eq!(f.band(0.5), 1);
        assert_eq!(f.band(1.99), 3);
        assert_eq!(f.band(2.0), 3);
        assert_eq!(f.band(f64::NAN), 0);
        assert_abs_diff_eq!(f.band_floor(2), 1.0);
    }

    #[test]
    fn viridis_runs_from_dark_purple_to_yellow() {
        let low = SeriesColor::viridis(0.0);
        assert!(low.r < 80 && low.g < 20 && low.b > low.r);
        let high = SeriesColor::viridis(1.0);
        assert!(high.r > 240 && high.g > 220 && high.b < 50);
        assert_eq!(SeriesColor::viridis(-3.0), low);
        assert_eq!(SeriesColor::viridis(7.0), high);
    }

    #[test]
    fn viridis_green_channel_increases_monotonically() {
        let greens: Vec<u8> = (0..=20)
            .map(|i| SeriesColor::viridis(i as f32 / 20.0).g)
            .collect();
        assert!(greens.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn band_colors_span_the_colormap() {
        let f = field();
        assert_eq!(f.band_color(0), SeriesColor::viridis(0.0));
        assert_eq!(f.band_color(3), SeriesColor::viridis(1.0));
    }

    #[test]
    fn flat_field_uses_single_band() {
        let f = ContourField::new(vec![0.0], vec![0.0], vec![3.0], 50);
        assert_eq!(f.band(3.0), 0);
    }

    #[test]
    fn bounds_include_reference_lines_on_their_axis_only() {
        let result = PlotResult {
            exercise: ExerciseId::Two,
            subheader: String::new(),
            explanation: String::new(),
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            layers: vec![
                PlotLayer::Curve {
                    points: vec![[-1.0, 1.0], [1.0, 3.0]],
                    color: SeriesColor::BLUE,
                    label: "curve".into(),
                },
                PlotLayer::ReferenceLine {
                    orientation: Orientation::Horizontal,
                    at: -2.0,
                    color: SeriesColor::BLACK,
                    width: 0.5,
                    label: None,
                },
                PlotLayer::ReferenceLine {
                    orientation: Orientation::Vertical,
                    at: 5.0,
                    color: SeriesColor::RED,
                    width: 1.0,
                    label: Some("x = 5".into()),
                },
            ],
            show_grid: true,
            equal_aspect: false,
        };

        assert_eq!(result.data_bounds(), Some((-1.0, 5.0, -2.0, 3.0)));
        assert_eq!(result.legend_labels(), vec!["curve", "x = 5"]);
        assert!(result.contour().is_none());
    }
}
