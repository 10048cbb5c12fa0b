//! Charts module - Chart description and rendering

mod plot_result;
mod plotter;
mod renderer;

pub use plot_result::{ContourField, Orientation, PlotLayer, PlotResult, SeriesColor};
pub use plotter::ChartPlotter;
pub use renderer::{ExportError, StaticChartRenderer};
