//! Exercises module - Fixed exercise catalog and chart building

mod catalog;
mod renderer;
mod sampling;

pub use catalog::{
    absolute, max_distance, paraboloid, quadratic, sine, ContrastPoint, DisplayMetadata, Domain,
    ExerciseId, ExerciseSpec, Formula, KnownMinimum, CATALOG, PAGE_INTRO, PAGE_TITLE,
};
pub use renderer::{ExerciseRenderer, RenderError};
pub use sampling::{linspace, meshgrid};
