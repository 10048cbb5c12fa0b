//! Exercise Catalog Module
//! The five fixed exercises: formula, sample domain, known minimum and display text.
//!
//! Every minimum in this table is a literal constant taken from the closed-form
//! analysis of its formula. Nothing here searches for extrema at runtime.

use crate::charts::SeriesColor;
use crate::exercises::RenderError;
use std::f64::consts::PI;
use std::fmt;

/// Page title shown above every exercise.
pub const PAGE_TITLE: &str = "Resolviendo problemas de optimización";

/// Introductory paragraph shown above every exercise.
pub const PAGE_INTRO: &str = "Esta aplicación interactiva te ayudará a visualizar y entender los \
conceptos de mínimos globales y locales en varias funciones matemáticas. A continuación, \
selecciona el ejercicio que deseas explorar:";

/// Identifier of one of the five exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExerciseId {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl ExerciseId {
    /// All exercises in selector order.
    pub const ALL: [ExerciseId; 5] = [
        ExerciseId::One,
        ExerciseId::Two,
        ExerciseId::Three,
        ExerciseId::Four,
        ExerciseId::Five,
    ];

    /// 1-based exercise number.
    pub fn number(self) -> u8 {
        match self {
            ExerciseId::One => 1,
            ExerciseId::Two => 2,
            ExerciseId::Three => 3,
            ExerciseId::Four => 4,
            ExerciseId::Five => 5,
        }
    }

    /// Selector label, exactly as offered to the user.
    pub fn label(self) -> &'static str {
        self.spec().display.selector_label
    }

    /// Resolve a selector label back to its exercise.
    pub fn from_label(label: &str) -> Result<Self, RenderError> {
        Self::ALL
            .into_iter()
            .find(|id| id.label() == label)
            .ok_or_else(|| RenderError::UnknownLabel(label.to_string()))
    }

    /// Catalog entry for this exercise.
    pub fn spec(self) -> &'static ExerciseSpec {
        &CATALOG[usize::from(self.number() - 1)]
    }
}

impl TryFrom<u8> for ExerciseId {
    type Error = RenderError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ExerciseId::One),
            2 => Ok(ExerciseId::Two),
            3 => Ok(ExerciseId::Three),
            4 => Ok(ExerciseId::Four),
            5 => Ok(ExerciseId::Five),
            other => Err(RenderError::InvalidSelection(other)),
        }
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ejercicio {}", self.number())
    }
}

/// Closed-form function of one or two variables.
#[derive(Debug, Clone, Copy)]
pub enum Formula {
    Univariate(fn(f64) -> f64),
    Bivariate(fn(f64, f64) -> f64),
}

/// Fixed, evenly sampled domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    Interval { start: f64, end: f64, samples: usize },
    /// `levels` is the number of filled contour bands.
    Square {
        start: f64,
        end: f64,
        samples_per_axis: usize,
        levels: usize,
    },
}

impl Domain {
    /// Total number of evaluated points.
    pub fn sample_count(&self) -> usize {
        match *self {
            Domain::Interval { samples, .. } => samples,
            Domain::Square {
                samples_per_axis, ..
            } => samples_per_axis * samples_per_axis,
        }
    }
}

/// Analytic minimum of an exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KnownMinimum {
    Point { x: f64, value: f64 },
    PlanePoint { x: f64, y: f64, value: f64 },
    /// Every point of `[start, end]` is annotated as a minimiser.
    Interval { start: f64, end: f64, value: f64 },
}

impl KnownMinimum {
    pub fn value(&self) -> f64 {
        match *self {
            KnownMinimum::Point { value, .. }
            | KnownMinimum::PlanePoint { value, .. }
            | KnownMinimum::Interval { value, .. } => value,
        }
    }
}

/// Point drawn next to the minimum to show what is *not* a minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastPoint {
    pub x: f64,
    pub color: SeriesColor,
    pub label: &'static str,
}

/// Static text and styling for an exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetadata {
    pub selector_label: &'static str,
    pub subheader: &'static str,
    pub explanation: &'static str,
    pub chart_title: &'static str,
    pub curve_label: &'static str,
    pub color: SeriesColor,
    pub minimum_label: &'static str,
    pub contrast: Option<ContrastPoint>,
}

/// One immutable catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct ExerciseSpec {
    pub id: ExerciseId,
    pub formula: Formula,
    pub domain: Domain,
    pub known_minimum: KnownMinimum,
    pub display: DisplayMetadata,
}

pub fn quadratic(x: f64) -> f64 {
    x * x - 4.0 * x + 5.0
}

pub fn absolute(x: f64) -> f64 {
    x.abs()
}

pub fn sine(x: f64) -> f64 {
    x.sin()
}

pub fn paraboloid(x: f64, y: f64) -> f64 {
    x * x + y * y
}

pub fn max_distance(x: f64) -> f64 {
    (x - 1.0).abs().max((x + 1.0).abs())
}

/// The fixed exercise set, indexed by `ExerciseId::number() - 1`.
pub static CATALOG: [ExerciseSpec; 5] = [
    ExerciseSpec {
        id: ExerciseId::One,
        formula: Formula::Univariate(quadratic),
        domain: Domain::Interval {
            start: -2.0,
            end: 6.0,
            samples: 500,
        },
        known_minimum: KnownMinimum::Point { x: 2.0, value: 1.0 },
        display: DisplayMetadata {
            selector_label: "Ejercicio 1: Minimización de $f(x) = x^2 - 4x + 5$",
            subheader: "Minimización de f(x) = x² − 4x + 5",
            explanation: "La función cuadrática f(x) = x² − 4x + 5 tiene un mínimo global en \
x = 2, como se demuestra al reescribir la función en forma estándar: f(x) = (x − 2)² + 1. \
A continuación, puedes ver la gráfica.",
            chart_title: "Gráfica de f(x)",
            curve_label: "f(x) = x² − 4x + 5",
            color: SeriesColor::BLUE,
            minimum_label: "Mínimo global en x=2",
            contrast: Some(ContrastPoint {
                x: 0.0,
                color: SeriesColor::GREEN,
                label: "x=0 no es mínimo",
            }),
        },
    },
    ExerciseSpec {
        id: ExerciseId::Two,
        formula: Formula::Univariate(absolute),
        domain: Domain::Interval {
            start: -2.0,
            end: 2.0,
            samples: 500,
        },
        known_minimum: KnownMinimum::Point { x: 0.0, value: 0.0 },
        display: DisplayMetadata {
            selector_label: "Ejercicio 2: Análisis de $f(x) = |x|$",
            subheader: "Análisis de f(x) = |x|",
            explanation: "La función f(x) = |x| tiene un mínimo global y local en x = 0, ya \
que f(0) = 0 es el menor valor posible en todo el dominio de la función.",
            chart_title: "Gráfica de f(x) = |x|",
            curve_label: "f(x) = |x|",
            color: SeriesColor::ORANGE,
            minimum_label: "Mínimo global en x=0",
            contrast: None,
        },
    },
    ExerciseSpec {
        id: ExerciseId::Three,
        formula: Formula::Univariate(sine),
        domain: Domain::Interval {
            start: 0.0,
            end: PI,
            samples: 500,
        },
        known_minimum: KnownMinimum::Point { x: PI, value: 0.0 },
        display: DisplayMetadata {
            selector_label: r"Ejercicio 3: $f(x) = \sin(x)$ en $[0, \pi]$",
            subheader: "Análisis de f(x) = sin(x) en [0, π]",
            explanation: "En el intervalo [0, π], la función sin(x) alcanza su mínimo global \
en x = π, con un valor de f(π) = 0.",
            chart_title: "Gráfica de f(x) = sin(x)",
            curve_label: "f(x) = sin(x)",
            color: SeriesColor::PURPLE,
            minimum_label: "Mínimo global en x=π",
            contrast: None,
        },
    },
    ExerciseSpec {
        id: ExerciseId::Four,
        formula: Formula::Bivariate(paraboloid),
        domain: Domain::Square {
            start: -1.0,
            end: 1.0,
            samples_per_axis: 100,
            levels: 50,
        },
        known_minimum: KnownMinimum::PlanePoint {
            x: 0.0,
            y: 0.0,
            value: 0.0,
        },
        display: DisplayMetadata {
            selector_label: r"Ejercicio 4: $f(x, y) = x^2 + y^2$ con $x^2 + y^2 \leq 1$",
            subheader: "Análisis de f(x, y) = x² + y²",
            explanation: "La función f(x, y) = x² + y² alcanza su mínimo global en el origen \
(0, 0), donde f(0, 0) = 0.",
            chart_title: "Gráfica de f(x, y) = x² + y²",
            curve_label: "f(x, y) = x² + y²",
            color: SeriesColor::RED,
            minimum_label: "Mínimo global en (0, 0)",
            contrast: None,
        },
    },
    ExerciseSpec {
        id: ExerciseId::Five,
        formula: Formula::Univariate(max_distance),
        domain: Domain::Interval {
            start: -3.0,
            end: 3.0,
            samples: 500,
        },
        known_minimum: KnownMinimum::Interval {
            start: -1.0,
            end: 1.0,
            value: 1.0,
        },
        display: DisplayMetadata {
            selector_label: "Ejercicio 5: Ejemplo con mínimo global no único",
            subheader: "Ejemplo con mínimo global no único",
            explanation: "La función f(x) = max(|x − 1|, |x + 1|) tiene mínimos globales no \
únicos para x ∈ [−1, 1], ya que f(x) = 1 en ese intervalo.",
            chart_title: "Gráfica de f(x)",
            curve_label: "f(x) = max(|x−1|, |x+1|)",
            color: SeriesColor::GREEN,
            minimum_label: "Mínimo global en x ∈ [−1, 1]",
            contrast: None,
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_by_number() {
        for id in ExerciseId::ALL {
            assert_eq!(id.spec().id, id);
            assert_eq!(ExerciseId::try_from(id.number()).ok(), Some(id));
        }
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        for n in [0u8, 6, 42, u8::MAX] {
            assert!(matches!(
                ExerciseId::try_from(n),
                Err(RenderError::InvalidSelection(v)) if v == n
            ));
        }
    }

    #[test]
    fn selector_labels_keep_formula_notation() {
        assert_eq!(
            ExerciseId::Three.label(),
            "Ejercicio 3: $f(x) = \\sin(x)$ en $[0, \\pi]$"
        );
        assert_eq!(
            ExerciseId::Four.label(),
            "Ejercicio 4: $f(x, y) = x^2 + y^2$ con $x^2 + y^2 \\leq 1$"
        );
    }

    #[test]
    fn labels_round_trip_and_unknown_label_fails() {
        for id in ExerciseId::ALL {
            assert_eq!(ExerciseId::from_label(id.label()).ok(), Some(id));
        }
        assert!(matches!(
            ExerciseId::from_label("Ejercicio 6"),
            Err(RenderError::UnknownLabel(_))
        ));
    }

    #[test]
    fn domains_are_bounded() {
        for spec in &CATALOG {
            assert!(spec.domain.sample_count() <= 10_000);
        }
        assert_eq!(ExerciseId::Four.spec().domain.sample_count(), 10_000);
    }

    #[test]
    fn only_the_surface_exercise_carries_contour_levels() {
        for spec in &CATALOG {
            match spec.domain {
                Domain::Square { levels, .. } => {
                    assert_eq!(spec.id, ExerciseId::Four);
                    assert_eq!(levels, 50);
                }
                Domain::Interval { .. } => assert_ne!(spec.id, ExerciseId::Four),
            }
        }
    }

    #[test]
    fn display_uses_exercise_number() {
        assert_eq!(ExerciseId::Five.to_string(), "Ejercicio 5");
    }
}
