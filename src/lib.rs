//! Minima Explorer - Global & Local Minima Viewer
//!
//! Five fixed exercises, each a closed-form function sampled over a fixed
//! domain with its analytic minimum annotated on the chart.

pub mod charts;
pub mod config;
pub mod exercises;
pub mod gui;
