//! Exercise Renderer Module
//! Turns a catalog entry into a chart description plus its explanatory text.
//!
//! One generic builder serves every exercise: the catalog record decides the
//! layers, so adding an exercise never adds a plotting branch.

use crate::charts::{ContourField, Orientation, PlotLayer, PlotResult, SeriesColor};
use crate::exercises::catalog::{Domain, ExerciseId, ExerciseSpec, Formula, KnownMinimum};
use crate::exercises::sampling::{linspace, meshgrid};
use thiserror::Error;
use tracing::debug;

/// Opacity of the shaded non-unique minimum region.
const FILL_OPACITY: f32 = 0.3;
/// Width of the thin `y = 0` baseline.
const BASELINE_WIDTH: f32 = 0.5;
/// Width of the red minimum guide lines.
const GUIDE_WIDTH: f32 = 1.5;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Invalid exercise selection: {0} (expected 1 to 5)")]
    InvalidSelection(u8),
    #[error("Unknown exercise label: {0}")]
    UnknownLabel(String),
    #[error("{0}: formula, domain and minimum kinds do not match")]
    DomainMismatch(ExerciseId),
    #[error("{exercise}: formula is not finite at x = {x}")]
    NonFinite { exercise: ExerciseId, x: f64 },
}

/// Builds `PlotResult`s from the exercise catalog.
pub struct ExerciseRenderer;

impl ExerciseRenderer {
    /// Render exercise `1..=5`.
    pub fn render(exercise: u8) -> Result<PlotResult, RenderError> {
        let id = ExerciseId::try_from(exercise)?;
        Self::render_exercise(id)
    }

    /// Render the exercise behind a selector label.
    pub fn render_label(label: &str) -> Result<PlotResult, RenderError> {
        let id = ExerciseId::from_label(label)?;
        Self::render_exercise(id)
    }

    pub fn render_exercise(id: ExerciseId) -> Result<PlotResult, RenderError> {
        Self::build(id.spec())
    }

    /// Evaluate the record's formula over its domain and lay out the chart.
    pub fn build(spec: &ExerciseSpec) -> Result<PlotResult, RenderError> {
        let display = &spec.display;

        let (layers, x_label, y_label, surface) = match (spec.formula, spec.domain) {
            (
                Formula::Univariate(f),
                Domain::Interval {
                    start,
                    end,
                    samples,
                },
            ) => {
                let xs = linspace(start, end, samples);
                (Self::curve_layers(spec, f, &xs)?, "x", "f(x)", false)
            }
            (
                Formula::Bivariate(f),
                Domain::Square {
                    start,
                    end,
                    samples_per_axis,
                    levels,
                },
            ) => (
                Self::surface_layers(spec, f, start, end, samples_per_axis, levels)?,
                "x",
                "y",
                true,
            ),
            _ => return Err(RenderError::DomainMismatch(spec.id)),
        };

        debug!(
            exercise = spec.id.number(),
            samples = spec.domain.sample_count(),
            layers = layers.len(),
            minimum = spec.known_minimum.value(),
            "Built exercise chart"
        );

        Ok(PlotResult {
            exercise: spec.id,
            subheader: display.subheader.to_string(),
            explanation: display.explanation.to_string(),
            title: display.chart_title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            layers,
            show_grid: !surface,
            equal_aspect: surface,
        })
    }

    /// Curve, minimum annotation and guide lines for a 1-D exercise.
    fn curve_layers(
        spec: &ExerciseSpec,
        f: fn(f64) -> f64,
        xs: &[f64],
    ) -> Result<Vec<PlotLayer>, RenderError> {
        let display = &spec.display;

        let points: Vec<[f64; 2]> = xs.iter().map(|&x| [x, f(x)]).collect();
        if let Some(bad) = points.iter().find(|p| !p[1].is_finite()) {
            return Err(RenderError::NonFinite {
                exercise: spec.id,
                x: bad[0],
            });
        }

        let mut layers = vec![PlotLayer::Curve {
            points: points.clone(),
            color: display.color,
            label: display.curve_label.to_string(),
        }];

        match spec.known_minimum {
            KnownMinimum::Point { x, value } => {
                layers.push(PlotLayer::Markers {
                    points: vec![[x, value]],
                    color: SeriesColor::RED,
                    label: display.minimum_label.to_string(),
                });

                if let Some(contrast) = display.contrast {
                    layers.push(PlotLayer::Markers {
                        points: vec![[contrast.x, f(contrast.x)]],
                        color: contrast.color,
                        label: contrast.label.to_string(),
                    });
                }

                layers.push(PlotLayer::ReferenceLine {
                    orientation: Orientation::Horizontal,
                    at: 0.0,
                    color: SeriesColor::BLACK,
                    width: BASELINE_WIDTH,
                    label: None,
                });
                layers.push(PlotLayer::ReferenceLine {
                    orientation: Orientation::Vertical,
                    at: x,
                    color: SeriesColor::RED,
                    width: GUIDE_WIDTH,
                    label: None,
                });
            }
            KnownMinimum::Interval { start, end, value } => {
                layers.push(PlotLayer::ReferenceLine {
                    orientation: Orientation::Horizontal,
                    at: value,
                    color: SeriesColor::RED,
                    width: GUIDE_WIDTH,
                    label: Some(display.minimum_label.to_string()),
                });

                let region: Vec<[f64; 2]> = points
                    .iter()
                    .filter(|p| p[0] >= start && p[0] <= end)
                    .copied()
                    .collect();
                layers.push(PlotLayer::Fill {
                    points: region,
                    baseline: 0.0,
                    color: display.color,
                    opacity: FILL_OPACITY,
                });
            }
            KnownMinimum::PlanePoint { .. } => return Err(RenderError::DomainMismatch(spec.id)),
        }

        Ok(layers)
    }

    /// Filled contour plus minimum marker for a 2-D exercise.
    fn surface_layers(
        spec: &ExerciseSpec,
        f: fn(f64, f64) -> f64,
        start: f64,
        end: f64,
        samples_per_axis: usize,
        levels: usize,
    ) -> Result<Vec<PlotLayer>, RenderError> {
        let KnownMinimum::PlanePoint { x, y, .. } = spec.known_minimum else {
            return Err(RenderError::DomainMismatch(spec.id));
        };

        let (xs, ys, values) = meshgrid(start, end, samples_per_axis, f);
        if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
            return Err(RenderError::NonFinite {
                exercise: spec.id,
                x: xs[idx % xs.len()],
            });
        }

        let display = &spec.display;
        let field =
            ContourField::new(xs, ys, values, levels).with_label(display.curve_label);

        Ok(vec![
            PlotLayer::FilledContour(field),
            PlotLayer::Markers {
                points: vec![[x, y]],
                color: display.color,
                label: display.minimum_label.to_string(),
            },
        ])
    }
}
